use serde::{Deserialize, Serialize};

/// Referring primary-care provider
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

/// Result of a debounced directory search
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProviderSearchOutcome {
    /// A newer search from the same client replaced this one
    pub superseded: bool,
    pub results: Vec<PrimaryCareProvider>,
}
