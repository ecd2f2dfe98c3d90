use serde::{Deserialize, Serialize};
use std::fmt;

/// Record types the resolver understands end to end. Anything else is
/// forwarded verbatim but logged as `UNKNOWN` and excluded from pattern
/// mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    PTR,
    SRV,
    SOA,
    NS,
    HTTPS,
    Unknown,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CNAME => "CNAME",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::PTR => "PTR",
            Self::SRV => "SRV",
            Self::SOA => "SOA",
            Self::NS => "NS",
            Self::HTTPS => "HTTPS",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "A" => Self::A,
            "AAAA" => Self::AAAA,
            "CNAME" => Self::CNAME,
            "MX" => Self::MX,
            "TXT" => Self::TXT,
            "PTR" => Self::PTR,
            "SRV" => Self::SRV,
            "SOA" => Self::SOA,
            "NS" => Self::NS,
            "HTTPS" => Self::HTTPS,
            _ => Self::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
