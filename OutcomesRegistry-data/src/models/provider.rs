use serde::{Deserialize, Serialize};

/// Storage model for a row of `primary_care_providers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryCareProvider {
    pub id: String,
    pub name: String,
    pub practice_name: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
}

impl PrimaryCareProvider {
    /// Case-insensitive match against the provider or practice name.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .practice_name
                .as_deref()
                .map(|p| p.to_lowercase().contains(needle))
                .unwrap_or(false)
    }
}
