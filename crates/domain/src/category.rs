use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of policy-visible content labels. Every blocklist source
/// and every group/schedule block set is tagged with one or more of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Ads,
    Malware,
    Adult,
    Dating,
    SocialMedia,
    VideoStreaming,
    Gambling,
    Gaming,
    Piracy,
    Drugs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ads => "ads",
            Self::Malware => "malware",
            Self::Adult => "adult",
            Self::Dating => "dating",
            Self::SocialMedia => "social-media",
            Self::VideoStreaming => "video-streaming",
            Self::Gambling => "gambling",
            Self::Gaming => "gaming",
            Self::Piracy => "piracy",
            Self::Drugs => "drugs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a matched rule does to a query: let it through, or refuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Block,
    Allow,
}
