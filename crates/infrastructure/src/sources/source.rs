use chrono::{DateTime, Utc};
use hearth_dns_domain::{Action, Category, DomainError, SourceFormat, SourceListConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One categorized list source and its on-disk JSON copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSource {
    pub name: String,
    pub url: String,
    pub action: Action,
    pub categories: Vec<Category>,
    pub last_sync: DateTime<Utc>,
    pub domains: Vec<String>,

    #[serde(skip)]
    pub format: SourceFormat,
}

impl ListSource {
    pub fn from_config(config: &SourceListConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            action: config.action,
            categories: config.categories.clone(),
            last_sync: DateTime::<Utc>::MIN_UTC,
            domains: Vec::new(),
            format: config.format,
        }
    }

    pub fn file_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", self.name.replace('/', "_")))
    }

    pub fn read_from_disk(&mut self, path: &Path) -> Result<(), DomainError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| DomainError::IoError(e.to_string()))?;
        let stored: ListSource =
            serde_json::from_str(&data).map_err(|e| DomainError::IoError(e.to_string()))?;
        self.last_sync = stored.last_sync;
        self.domains = stored.domains;
        Ok(())
    }

    pub fn save_to_disk(&self, path: &Path) -> Result<(), DomainError> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::IoError(e.to_string()))?;
        std::fs::write(path, data).map_err(|e| DomainError::IoError(e.to_string()))
    }

    pub async fn fetch(&mut self, client: &reqwest::Client) -> Result<(), DomainError> {
        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DomainError::SourceFetchError(format!("{}: {e}", self.url)))?;

        if !response.status().is_success() {
            return Err(DomainError::SourceFetchError(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::SourceFetchError(format!("{}: {e}", self.url)))?;

        self.domains = parse_domains(&body, self.format);
        self.last_sync = Utc::now();
        Ok(())
    }
}

/// Extract domains from list text. Blank lines and `#` comments are
/// skipped; entries that do not look like FQDNs are dropped.
pub fn parse_domains(text: &str, format: SourceFormat) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }

            let domain = match format {
                SourceFormat::Domains => line,
                SourceFormat::Hosts => line.split_whitespace().nth(1)?,
            };

            let domain = domain.to_ascii_lowercase();
            looks_like_fqdn(&domain).then_some(domain)
        })
        .collect()
}

fn looks_like_fqdn(domain: &str) -> bool {
    if domain.len() > 253 || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}
