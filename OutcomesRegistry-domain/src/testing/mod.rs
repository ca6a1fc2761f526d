// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use outcomes_registry_data::models::delivery::{ComparisonReportDelivery, DeliveryEngagement, NewComparisonReportDelivery};
use outcomes_registry_data::repository::{DeliveryRepositoryTrait, RepositoryError};

use crate::email::{EmailError, EmailProvider};
use crate::entities::email::EmailMessage;
use crate::health::{overall_status, ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth};

/// Email provider that accepts everything and remembers what it was given
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailProvider {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingEmailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages handed to the provider so far
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl EmailProvider for RecordingEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<String, EmailError> {
        let mut sent = self.sent.lock().unwrap_or_else(|p| p.into_inner());
        sent.push(message.clone());
        Ok(format!("mock-email-{}", sent.len()))
    }
}

/// Email provider that always answers with a provider error
#[derive(Debug, Clone)]
pub struct FailingEmailProvider {
    message: String,
}

impl FailingEmailProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Default for FailingEmailProvider {
    fn default() -> Self {
        Self::new("mock provider is configured to fail")
    }
}

#[async_trait]
impl EmailProvider for FailingEmailProvider {
    async fn send(&self, _message: &EmailMessage) -> Result<String, EmailError> {
        Err(EmailError::Provider(self.message.clone()))
    }
}

/// Delivery repository whose every call fails, for exercising the
/// tracking endpoints' error paths
#[derive(Debug, Clone, Default)]
pub struct FailingDeliveryRepository;

#[async_trait]
impl DeliveryRepositoryTrait for FailingDeliveryRepository {
    async fn create(&self, _new: NewComparisonReportDelivery) -> Result<ComparisonReportDelivery, RepositoryError> {
        Err(RepositoryError::Lock("mock repository is configured to fail".to_string()))
    }

    async fn get_by_tracking_id(&self, _tracking_id: &str) -> Result<Option<ComparisonReportDelivery>, RepositoryError> {
        Err(RepositoryError::Lock("mock repository is configured to fail".to_string()))
    }

    async fn update_engagement(&self, _id: &str, _engagement: &DeliveryEngagement) -> Result<(), RepositoryError> {
        Err(RepositoryError::Lock("mock repository is configured to fail".to_string()))
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Database component status
    database_status: ComponentStatus,
    /// Additional components
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            database_status: ComponentStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with a degraded database
    pub fn with_degraded_database(mut self) -> Self {
        self.database_status = ComponentStatus::Degraded;
        self
    }

    /// Configure the mock with an unhealthy database
    pub fn with_unhealthy_database(mut self) -> Self {
        self.database_status = ComponentStatus::Unhealthy;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components.insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            "database".to_string(),
            HealthComponent {
                status: self.database_status.clone(),
                details: match self.database_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Database is experiencing high load".to_string()),
                    ComponentStatus::Unhealthy => Some("Database connection failed".to_string()),
                },
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        SystemHealth {
            status: overall_status(components.values()),
            components,
        }
    }

    async fn check_database_status(&self) -> Result<bool, String> {
        match self.database_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Database connection failed".to_string()),
        }
    }
}
