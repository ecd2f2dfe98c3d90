mod source;

pub use source::{parse_domains, ListSource};

use crate::dns::filter::{DomainTrie, PolicyIndex};
use chrono::{Duration as ChronoDuration, Utc};
use hearth_dns_domain::{Config, DomainError};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Disk copies younger than this are served without refetching.
const REFETCH_AFTER_HOURS: i64 = 24;

/// Syncs the configured list sources and publishes a fresh policy index
/// snapshot built from all of them.
pub struct SourceSyncer {
    config: Arc<Config>,
    index: Arc<PolicyIndex>,
    data_dir: PathBuf,
    http: reqwest::Client,
}

impl SourceSyncer {
    pub fn new(config: Arc<Config>, index: Arc<PolicyIndex>) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .user_agent("Hearth-DNS/0.3 (list-sync)")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainError::SourceFetchError(e.to_string()))?;

        let data_dir = PathBuf::from(&config.system.data_dir).join("lists");

        Ok(Self {
            config,
            index,
            data_dir,
            http,
        })
    }

    /// Sync every relevant source and publish the rebuilt index. A source
    /// that fails to fetch or parse is skipped with a warning; the run
    /// continues with the rest.
    pub async fn sync(&self) -> Result<(), DomainError> {
        std::fs::create_dir_all(&self.data_dir)
            .map_err(|e| DomainError::IoError(e.to_string()))?;

        let blocked = self.config.blocked_categories();
        let mut tree = DomainTrie::new();
        let mut loaded = 0usize;

        for list_config in &self.config.sources.lists {
            if !list_config.categories.iter().any(|c| blocked.contains(c)) {
                debug!(list = %list_config.name, "No group or schedule blocks this list's categories, skipping");
                continue;
            }

            let mut source = ListSource::from_config(list_config);
            let path = source.file_path(&self.data_dir);

            let mut fetch = true;
            if path.exists() {
                match source.read_from_disk(&path) {
                    Ok(()) => {
                        fetch = Utc::now() - source.last_sync
                            > ChronoDuration::hours(REFETCH_AFTER_HOURS);
                    }
                    Err(e) => {
                        warn!(list = %source.name, error = %e, "Failed to read cached list, refetching");
                    }
                }
            }

            if fetch {
                info!(list = %source.name, "Fetching list from upstream");
                if let Err(e) = source.fetch(&self.http).await {
                    warn!(list = %source.name, error = %e, "Failed to fetch list, skipping");
                    continue;
                }
                if let Err(e) = source.save_to_disk(&path) {
                    warn!(list = %source.name, error = %e, "Failed to save list locally");
                }
            }

            tree.insert_list(
                &source.name,
                source.action,
                &source.categories,
                &source.domains,
            );
            loaded += 1;
        }

        info!(
            lists = loaded,
            domains = tree.domain_count(),
            "List sources loaded"
        );
        self.index.publish(tree);
        Ok(())
    }
}
