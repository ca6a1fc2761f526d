use serde::{Deserialize, Serialize};
use std::fmt;

/// Routing label suggested for a new episode of care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EpisodeType {
    /// Neurological caseload
    Neuro,
    /// Musculoskeletal caseload
    Msk,
    /// Nothing matched; a human decides
    Unknown,
}

impl EpisodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeType::Neuro => "NEURO",
            EpisodeType::Msk => "MSK",
            EpisodeType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for EpisodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
