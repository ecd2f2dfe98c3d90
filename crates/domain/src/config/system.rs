use super::errors::ConfigError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemConfig {
    /// IANA timezone name; schedule windows are evaluated in this zone.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Directory for the query log database and cached list sources.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(skip)]
    tz: Option<Tz>,
}

impl SystemConfig {
    pub(super) fn precompute(&mut self) -> Result<(), ConfigError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone(self.timezone.clone()))?;
        self.tz = Some(tz);
        Ok(())
    }

    pub fn tz(&self) -> Tz {
        self.tz.unwrap_or(chrono_tz::UTC)
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            data_dir: default_data_dir(),
            tz: None,
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_data_dir() -> String {
    "/var/lib/hearth-dns".to_string()
}
