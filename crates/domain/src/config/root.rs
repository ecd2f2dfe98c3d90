use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cache::CacheConfig;
use super::client_lookup::ClientLookupConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::groups::GroupConfig;
use super::logging::LoggingConfig;
use super::querylog::QueryLogConfig;
use super::schedules::ScheduleConfig;
use super::server::ServerConfig;
use super::sources::SourcesConfig;
use super::system::SystemConfig;
use crate::category::Category;

const MIN_UPDATE_INTERVAL_HOURS: u64 = 24;

/// Main configuration for Hearth DNS.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub groups: HashMap<String, GroupConfig>,

    #[serde(default)]
    pub schedules: HashMap<String, ScheduleConfig>,

    #[serde(default)]
    pub querylog: QueryLogConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub client_lookup: ClientLookupConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line switches that override file values.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub data_dir: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hearth-dns.toml in the current directory
    /// 3. /etc/hearth-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("hearth-dns.toml").exists() {
            Self::from_file("hearth-dns.toml")?
        } else if std::path::Path::new("/etc/hearth-dns/config.toml").exists() {
            Self::from_file("/etc/hearth-dns/config.toml")?
        } else {
            // An empty document deserializes to the full set of defaults.
            toml::from_str("").map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        config.apply_cli_overrides(overrides);
        config.finish()?;
        Ok(config)
    }

    /// Parse a TOML document into a ready-to-use configuration.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.finish()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn finish(&mut self) -> Result<(), ConfigError> {
        self.normalize();
        self.precompute()
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(dir) = overrides.data_dir {
            self.system.data_dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Fill in behavioral defaults that serde cannot express: the implicit
    /// "all" group and the lower bounds on sync and look-back intervals.
    fn normalize(&mut self) {
        if self.groups.is_empty() {
            self.groups.insert(
                "all".to_string(),
                GroupConfig::new(Vec::new(), vec![Category::Ads, Category::Malware], false),
            );
        }

        if self.sources.update_interval_hours < MIN_UPDATE_INTERVAL_HOURS {
            self.sources.update_interval_hours = MIN_UPDATE_INTERVAL_HOURS;
        }

        if self.cache.query_patterns.look_back_days < 1 {
            self.cache.query_patterns.look_back_days = 1;
        }
    }

    /// Build the O(1) lookup sets groups and schedules are matched with.
    fn precompute(&mut self) -> Result<(), ConfigError> {
        self.system.precompute()?;
        for group in self.groups.values_mut() {
            group.precompute();
        }
        for schedule in self.schedules.values_mut() {
            schedule.precompute()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.dns.upstreams.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        if self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "Cache capacity cannot be 0".to_string(),
            ));
        }

        for (name, schedule) in &self.schedules {
            for group in &schedule.apply_to {
                if !self.groups.contains_key(group) {
                    return Err(ConfigError::Validation(format!(
                        "Schedule '{}' applies to unknown group '{}'",
                        name, group
                    )));
                }
            }
        }

        Ok(())
    }

    /// Every category blocked by any group or schedule. List sources whose
    /// categories never appear here are not worth syncing.
    pub fn blocked_categories(&self) -> Vec<Category> {
        let mut blocked = Vec::new();
        for group in self.groups.values() {
            blocked.extend(group.block.iter().copied());
        }
        for schedule in self.schedules.values() {
            blocked.extend(schedule.block.iter().copied());
        }
        blocked
    }
}
