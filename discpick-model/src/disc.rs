use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which backend queue a disc belongs to.
///
/// Only the video kinds carry metadata candidates today, but the backend
/// reports other kinds (audio CDs, data discs) through the same status
/// endpoint, so unknown values are preserved instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiscKind {
    /// Standard-definition optical video (`dvd-video`)
    DvdVideo,
    /// High-definition optical video (`bd-video`)
    BdVideo,
    /// Any other kind reported by the backend, kept verbatim
    Other(String),
}

impl DiscKind {
    pub fn as_str(&self) -> &str {
        match self {
            DiscKind::DvdVideo => "dvd-video",
            DiscKind::BdVideo => "bd-video",
            DiscKind::Other(raw) => raw,
        }
    }

    /// The kinds a coordinator handles when nothing else is configured.
    pub fn video_kinds() -> Vec<DiscKind> {
        vec![DiscKind::DvdVideo, DiscKind::BdVideo]
    }
}

impl From<&str> for DiscKind {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dvd-video" => DiscKind::DvdVideo,
            "bd-video" => DiscKind::BdVideo,
            _ => DiscKind::Other(value.to_string()),
        }
    }
}

impl From<String> for DiscKind {
    fn from(value: String) -> Self {
        DiscKind::from(value.as_str())
    }
}

impl From<DiscKind> for String {
    fn from(value: DiscKind) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for DiscKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DiscKind::from(s))
    }
}

impl Display for DiscKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the candidates are movies or series. Affects presentation text only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[serde(rename = "tv", alias = "series")]
    Series,
    #[default]
    #[serde(other)]
    Movie,
}

impl MediaKind {
    /// Plural noun used in prompts ("Multiple movies found").
    pub fn plural_noun(self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Series => "TV series",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "Series"),
        }
    }
}
