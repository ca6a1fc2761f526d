use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use outcomes_registry_data::repository::{ProviderRepository, ProviderRepositoryTrait, RepositoryError};

use crate::debounce::Debouncer;
use crate::entities::conversions::{convert_to_data_provider, convert_to_domain_provider};
use crate::entities::provider::{PrimaryCareProvider, ProviderSearchOutcome};

/// Queries shorter than this return nothing
pub const MIN_QUERY_LENGTH: usize = 2;

/// Maximum matches returned per search
pub const SEARCH_LIMIT: usize = 10;

/// Provider lookup errors
#[derive(Debug, Error)]
pub enum ProviderLookupError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<RepositoryError> for ProviderLookupError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => ProviderLookupError::ValidationError(msg),
            other => ProviderLookupError::RepositoryError(other.to_string()),
        }
    }
}

/// Trait for the primary-care provider directory
#[async_trait]
pub trait ProviderLookupServiceTrait: Send + Sync {
    /// Debounced search on behalf of one client's search box
    async fn search(&self, client_key: &str, query: &str) -> Result<ProviderSearchOutcome, ProviderLookupError>;

    /// Add a provider to the directory
    async fn add_provider(&self, provider: PrimaryCareProvider) -> Result<PrimaryCareProvider, ProviderLookupError>;
}

/// Provider lookup service for domain logic
pub struct ProviderLookupService<R: ProviderRepositoryTrait> {
    repository: R,
    debouncer: Debouncer,
}

impl<R: ProviderRepositoryTrait> ProviderLookupService<R> {
    pub fn new(repository: R, debouncer: Debouncer) -> Self {
        Self { repository, debouncer }
    }
}

#[async_trait]
impl<R: ProviderRepositoryTrait> ProviderLookupServiceTrait for ProviderLookupService<R> {
    async fn search(&self, client_key: &str, query: &str) -> Result<ProviderSearchOutcome, ProviderLookupError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            // the box was cleared; pending searches are stale
            self.debouncer.supersede(client_key);
            return Ok(ProviderSearchOutcome::default());
        }

        if !self.debouncer.settle(client_key).await {
            debug!("Provider search '{}' superseded for client {}", query, client_key);
            return Ok(ProviderSearchOutcome {
                superseded: true,
                results: Vec::new(),
            });
        }

        let results = self
            .repository
            .search(query, SEARCH_LIMIT)
            .await?
            .into_iter()
            .map(convert_to_domain_provider)
            .collect();

        Ok(ProviderSearchOutcome {
            superseded: false,
            results,
        })
    }

    async fn add_provider(&self, provider: PrimaryCareProvider) -> Result<PrimaryCareProvider, ProviderLookupError> {
        if provider.name.trim().is_empty() {
            return Err(ProviderLookupError::ValidationError("provider name is required".to_string()));
        }
        let row = self.repository.add(convert_to_data_provider(&provider)).await?;
        Ok(convert_to_domain_provider(row))
    }
}

/// Provider lookup over the default repository with the standard delay
pub fn create_default_provider_lookup_service() -> ProviderLookupService<ProviderRepository> {
    ProviderLookupService::new(ProviderRepository::new(), Debouncer::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn provider(id: &str, name: &str, practice: Option<&str>) -> PrimaryCareProvider {
        PrimaryCareProvider {
            id: id.to_string(),
            name: name.to_string(),
            practice_name: practice.map(str::to_string),
            phone: None,
            fax: None,
            email: None,
            city: None,
        }
    }

    async fn seeded() -> Arc<ProviderLookupService<ProviderRepository>> {
        let service = ProviderLookupService::new(ProviderRepository::new(), Debouncer::new(Duration::from_millis(300)));
        service.add_provider(provider("p1", "Dr. Maria Alvarez", Some("Lakeside Family Medicine"))).await.unwrap();
        service.add_provider(provider("p2", "Dr. Tom Becker", Some("Alvarado Clinic"))).await.unwrap();
        service.add_provider(provider("p3", "Dr. Ana Chu", None)).await.unwrap();
        Arc::new(service)
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_returns_immediately() {
        let service = seeded().await;
        let outcome = service.search("client", " a ").await.unwrap();
        assert!(!outcome.superseded);
        assert!(outcome.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_matches_name_and_practice() {
        let service = seeded().await;
        let outcome = service.search("client", "ALVA").await.unwrap();
        assert!(!outcome.superseded);
        let ids: Vec<_> = outcome.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"p1"));
        assert!(ids.contains(&"p2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_only_runs_last_query() {
        let service = seeded().await;

        let first = {
            let s = service.clone();
            tokio::spawn(async move { s.search("client", "Dr").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = {
            let s = service.clone();
            tokio::spawn(async move { s.search("client", "Chu").await })
        };

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert!(first.superseded);
        assert!(first.results.is_empty());
        assert!(!second.superseded);
        assert_eq!(second.results.len(), 1);
        assert_eq!(second.results[0].id, "p3");
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let service = ProviderLookupService::new(ProviderRepository::new(), Debouncer::default());
        assert!(service.add_provider(provider("p9", "  ", None)).await.is_err());
    }
}
