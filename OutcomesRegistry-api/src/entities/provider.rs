use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use outcomes_registry_domain::entities::provider::{PrimaryCareProvider, ProviderSearchOutcome};

/// Public representation of a primary-care provider
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderResponse {
    pub id: String,
    pub name: String,
    pub practice_name: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
}

impl From<PrimaryCareProvider> for ProviderResponse {
    fn from(p: PrimaryCareProvider) -> Self {
        Self {
            id: p.id,
            name: p.name,
            practice_name: p.practice_name,
            phone: p.phone,
            fax: p.fax,
            email: p.email,
            city: p.city,
        }
    }
}

/// Request payload for adding a provider to the directory
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProviderRequest {
    pub name: String,
    pub practice_name: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
}

impl CreateProviderRequest {
    pub fn into_domain(self, id: String) -> PrimaryCareProvider {
        PrimaryCareProvider {
            id,
            name: self.name.trim().to_string(),
            practice_name: self.practice_name,
            phone: self.phone,
            fax: self.fax,
            email: self.email,
            city: self.city,
        }
    }
}

/// Debounced search result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProviderSearchResponse {
    /// A newer search from the same client replaced this one; `results` is empty
    pub superseded: bool,
    pub results: Vec<ProviderResponse>,
}

impl From<ProviderSearchOutcome> for ProviderSearchResponse {
    fn from(outcome: ProviderSearchOutcome) -> Self {
        Self {
            superseded: outcome.superseded,
            results: outcome.results.into_iter().map(ProviderResponse::from).collect(),
        }
    }
}
