use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

use outcomes_registry_data::models::notification::NewNotificationRecord;
use outcomes_registry_data::repository::{ClinicSettingsRepositoryTrait, NotificationRepositoryTrait};

use crate::email::templates::{render_approval, render_decline, RenderedEmail};
use crate::email::{from_address_from_env, EmailError, EmailProvider};
use crate::entities::email::{
    ApprovalEmailRequest, ClinicContact, DeclineEmailRequest, EmailKind, EmailMessage, SentEmail,
};
use crate::services::validation_message;

/// Trait for lead notification emails
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Tell a lead they have been accepted
    async fn send_approval(&self, request: ApprovalEmailRequest) -> Result<SentEmail, EmailError>;

    /// Tell a lead they have not been accepted
    async fn send_decline(&self, request: DeclineEmailRequest) -> Result<SentEmail, EmailError>;
}

/// Renders, sends and logs lead emails
pub struct EmailService<P, N, C>
where
    P: EmailProvider,
    N: NotificationRepositoryTrait,
    C: ClinicSettingsRepositoryTrait,
{
    provider: P,
    notifications: N,
    clinic_settings: C,
    /// Fixed sender; `None` reads `EMAIL_FROM` per message
    from_address: Option<String>,
}

impl<P, N, C> EmailService<P, N, C>
where
    P: EmailProvider,
    N: NotificationRepositoryTrait,
    C: ClinicSettingsRepositoryTrait,
{
    pub fn new(provider: P, notifications: N, clinic_settings: C) -> Self {
        Self {
            provider,
            notifications,
            clinic_settings,
            from_address: None,
        }
    }

    /// Use a fixed sender address instead of `EMAIL_FROM`
    pub fn with_from_address(mut self, from: impl Into<String>) -> Self {
        self.from_address = Some(from.into());
        self
    }

    /// Clinic identity: explicit name, then stored settings, then the generic default
    async fn resolve_clinic(&self, requested_name: Option<&str>) -> ClinicContact {
        let settings = match self.clinic_settings.get_current().await {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not load clinic settings, using defaults: {}", e);
                None
            }
        };

        let mut contact = match settings {
            Some(s) => ClinicContact {
                name: s.clinic_name,
                phone: s.phone,
                email: s.email,
            },
            None => ClinicContact::default(),
        };

        if let Some(name) = requested_name.map(str::trim).filter(|n| !n.is_empty()) {
            contact.name = name.to_string();
        }
        contact
    }

    async fn deliver(
        &self,
        kind: EmailKind,
        recipient: &str,
        rendered: RenderedEmail,
    ) -> Result<SentEmail, EmailError> {
        let message = EmailMessage {
            from: self.from_address.clone().unwrap_or_else(from_address_from_env),
            to: vec![recipient.to_string()],
            subject: rendered.subject,
            html: rendered.html,
        };

        let result = self.provider.send(&message).await;

        let history = match &result {
            Ok(id) => NewNotificationRecord {
                notification_type: kind.as_str().to_string(),
                recipient_email: recipient.to_string(),
                subject: message.subject.clone(),
                status: "sent".to_string(),
                provider_message_id: Some(id.clone()),
                error_message: None,
            },
            Err(e) => NewNotificationRecord {
                notification_type: kind.as_str().to_string(),
                recipient_email: recipient.to_string(),
                subject: message.subject.clone(),
                status: "failed".to_string(),
                provider_message_id: None,
                error_message: Some(e.to_string()),
            },
        };
        if let Err(e) = self.notifications.record(history).await {
            error!("Failed to record {} email in notification history: {}", kind, e);
        }

        match result {
            Ok(id) => {
                info!("Sent {} email, provider id {}", kind, id);
                Ok(SentEmail { id })
            },
            Err(e) => {
                error!("Failed to send {} email: {}", kind, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<P, N, C> EmailServiceTrait for EmailService<P, N, C>
where
    P: EmailProvider,
    N: NotificationRepositoryTrait,
    C: ClinicSettingsRepositoryTrait,
{
    async fn send_approval(&self, request: ApprovalEmailRequest) -> Result<SentEmail, EmailError> {
        request
            .validate()
            .map_err(|e| EmailError::Validation(validation_message(&e)))?;

        let clinic = self.resolve_clinic(request.clinic_name.as_deref()).await;
        let rendered = render_approval(&request, &clinic)?;
        self.deliver(EmailKind::Approval, &request.email, rendered).await
    }

    async fn send_decline(&self, request: DeclineEmailRequest) -> Result<SentEmail, EmailError> {
        request
            .validate()
            .map_err(|e| EmailError::Validation(validation_message(&e)))?;

        let clinic = self.resolve_clinic(request.clinic_name.as_deref()).await;
        let rendered = render_decline(&request, &clinic)?;
        self.deliver(EmailKind::Decline, &request.email, rendered).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::MockEmailProvider;
    use outcomes_registry_data::models::clinic::ClinicSettings;
    use outcomes_registry_data::repository::{ClinicSettingsRepository, NotificationRepository};

    fn approval(email: &str) -> ApprovalEmailRequest {
        ApprovalEmailRequest {
            email: email.to_string(),
            name: "Riley".to_string(),
            clinic_name: None,
            appointment_details: None,
        }
    }

    #[tokio::test]
    async fn test_approval_sent_and_logged() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .withf(|m| m.to == vec!["riley@example.com".to_string()] && m.subject.contains("Summit PT"))
            .times(1)
            .returning(|_| Ok("msg-123".to_string()));

        let notifications = NotificationRepository::new();
        let clinic = ClinicSettingsRepository::new();
        clinic
            .save(ClinicSettings {
                id: "c1".to_string(),
                clinic_name: "Summit PT".to_string(),
                phone: None,
                email: None,
                address: None,
                website: None,
                updated_at: "2024-01-01T00:00:00+00:00".to_string(),
            })
            .await
            .unwrap();

        let service = EmailService::new(provider, notifications.clone(), clinic)
            .with_from_address("Summit PT <hello@summit.example>");

        let sent = service.send_approval(approval("riley@example.com")).await.unwrap();
        assert_eq!(sent.id, "msg-123");

        let history = notifications.list_for_recipient("riley@example.com").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, "sent");
        assert_eq!(history[0].notification_type, "approval");
        assert_eq!(history[0].provider_message_id.as_deref(), Some("msg-123"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_returned_and_logged() {
        let mut provider = MockEmailProvider::new();
        provider
            .expect_send()
            .returning(|_| Err(EmailError::Provider("422: domain not verified".to_string())));

        let notifications = NotificationRepository::new();
        let service = EmailService::new(provider, notifications.clone(), ClinicSettingsRepository::new())
            .with_from_address("noreply@example.com");

        let request = DeclineEmailRequest {
            email: "lead@example.com".to_string(),
            name: "Riley".to_string(),
            clinic_name: Some("Harbor Physio".to_string()),
            reason: None,
        };
        let err = service.send_decline(request).await.unwrap_err();
        assert!(err.to_string().contains("domain not verified"));

        let history = notifications.list_for_recipient("lead@example.com").await.unwrap();
        assert_eq!(history[0].status, "failed");
        assert!(history[0].subject.contains("Harbor Physio"));
    }

    #[tokio::test]
    async fn test_invalid_email_never_reaches_provider() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let service = EmailService::new(provider, NotificationRepository::new(), ClinicSettingsRepository::new());
        let err = service.send_approval(approval("not-an-email")).await.unwrap_err();
        assert!(matches!(err, EmailError::Validation(_)));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let mut provider = MockEmailProvider::new();
        provider.expect_send().times(0);

        let service = EmailService::new(provider, NotificationRepository::new(), ClinicSettingsRepository::new());
        let request = DeclineEmailRequest {
            email: "lead@example.com".to_string(),
            name: "    ".to_string(),
            clinic_name: None,
            reason: None,
        };

        match service.send_decline(request).await {
            Err(EmailError::Validation(msg)) => assert_eq!(msg, "name: Name is required"),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }
}
