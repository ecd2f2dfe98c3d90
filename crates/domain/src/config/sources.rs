use crate::category::{Action, Category};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Hours between list syncs. Clamped to at least 24.
    #[serde(rename = "update_interval", default = "default_update_interval_hours")]
    pub update_interval_hours: u64,

    #[serde(default = "default_sources")]
    pub lists: Vec<SourceListConfig>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            update_interval_hours: default_update_interval_hours(),
            lists: default_sources(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceListConfig {
    pub name: String,
    pub url: String,
    pub categories: Vec<Category>,
    pub action: Action,
    pub format: SourceFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// One domain per line.
    #[default]
    Domains,
    /// `/etc/hosts` style: address then domain.
    Hosts,
}

fn default_update_interval_hours() -> u64 {
    24
}

/// The stock list catalog. Blocklists cover every category; allowlists trim
/// the worst false positives out of the broad ones.
fn default_sources() -> Vec<SourceListConfig> {
    let block = |name: &str, url: &str, category: Category, format: SourceFormat| {
        SourceListConfig {
            name: name.to_string(),
            url: url.to_string(),
            categories: vec![category],
            action: Action::Block,
            format,
        }
    };
    let allow = |name: &str, url: &str, category: Category| SourceListConfig {
        name: name.to_string(),
        url: url.to_string(),
        categories: vec![category],
        action: Action::Allow,
        format: SourceFormat::Domains,
    };

    vec![
        block(
            "olbat:ut1-blacklists:publicite",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/publicite/domains",
            Category::Ads,
            SourceFormat::Domains,
        ),
        block(
            "peter-lowe:adservers",
            "https://pgl.yoyo.org/adservers/serverlist.php?hostformat=hosts",
            Category::Ads,
            SourceFormat::Hosts,
        ),
        block(
            "olbat:ut1-blacklists:malware",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/malware/domains",
            Category::Malware,
            SourceFormat::Domains,
        ),
        block(
            "olbat:ut1-blacklists:phishing",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/phishing/domains",
            Category::Malware,
            SourceFormat::Domains,
        ),
        block(
            "sinfonietta:hostfiles:pornography-hosts",
            "https://raw.githubusercontent.com/Sinfonietta/hostfiles/master/pornography-hosts",
            Category::Adult,
            SourceFormat::Hosts,
        ),
        block(
            "olbat:ut1-blacklists:dating",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/dating/domains",
            Category::Dating,
            SourceFormat::Domains,
        ),
        block(
            "olbat:ut1-blacklists:social_networks",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/social_networks/domains",
            Category::SocialMedia,
            SourceFormat::Domains,
        ),
        block(
            "hearth-dns-lists:blocklists:video-streaming",
            "https://raw.githubusercontent.com/hearth-net/hearth-dns-lists/main/blocklists/video-streaming",
            Category::VideoStreaming,
            SourceFormat::Domains,
        ),
        block(
            "olbat:ut1-blacklists:gambling",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/gambling/domains",
            Category::Gambling,
            SourceFormat::Domains,
        ),
        block(
            "olbat:ut1-blacklists:games",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/games/domains",
            Category::Gaming,
            SourceFormat::Domains,
        ),
        block(
            "hagezi:dns-blocklists:anti.piracy-onlydomains",
            "https://raw.githubusercontent.com/hagezi/dns-blocklists/main/wildcard/anti.piracy-onlydomains.txt",
            Category::Piracy,
            SourceFormat::Domains,
        ),
        block(
            "olbat:ut1-blacklists:drugs",
            "https://raw.githubusercontent.com/olbat/ut1-blacklists/master/blacklists/drogue/domains",
            Category::Drugs,
            SourceFormat::Domains,
        ),
        allow(
            "hearth-dns-lists:allowlists:ads",
            "https://raw.githubusercontent.com/hearth-net/hearth-dns-lists/main/allowlists/ads",
            Category::Ads,
        ),
        allow(
            "hearth-dns-lists:allowlists:malware",
            "https://raw.githubusercontent.com/hearth-net/hearth-dns-lists/main/allowlists/malware",
            Category::Malware,
        ),
        allow(
            "hearth-dns-lists:allowlists:social-media",
            "https://raw.githubusercontent.com/hearth-net/hearth-dns-lists/main/allowlists/social-media",
            Category::SocialMedia,
        ),
    ]
}
