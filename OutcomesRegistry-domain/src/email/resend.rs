use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::{EmailError, EmailProvider};
use crate::entities::email::EmailMessage;

const DEFAULT_API_URL: &str = "https://api.resend.com/emails";

/// Resend REST client
#[derive(Debug, Clone)]
pub struct ResendEmailProvider {
    client: Client,
    api_url: String,
    /// Fixed key; when `None` the key is read from `RESEND_API_KEY` on every send
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ResendEmailProvider {
    /// Create a client with an explicit endpoint and key
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    /// Create a client whose endpoint comes from `EMAIL_API_URL` and whose key
    /// is looked up per request
    pub fn from_env() -> Self {
        let api_url = std::env::var("EMAIL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(api_url, None)
    }

    fn api_key(&self) -> Result<String, EmailError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("RESEND_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| EmailError::Configuration("RESEND_API_KEY is not set".to_string()))
    }
}

#[async_trait]
impl EmailProvider for ResendEmailProvider {
    async fn send(&self, message: &EmailMessage) -> Result<String, EmailError> {
        let api_key = self.api_key()?;
        debug!("Sending email '{}' to {} recipient(s)", message.subject, message.to.len());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.json::<SendResponse>().await?;
            return Ok(body.id);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or(text);

        error!("Email provider rejected message: {} {}", status, detail);
        Err(EmailError::Provider(format!("{}: {}", status.as_u16(), detail)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_key_fails_before_any_request() {
        let provider = ResendEmailProvider::new("http://127.0.0.1:9/emails", Some("  ".to_string()));
        let message = EmailMessage {
            from: "a@example.com".to_string(),
            to: vec!["b@example.com".to_string()],
            subject: "hi".to_string(),
            html: "<p>hi</p>".to_string(),
        };

        let result = provider.send(&message).await;
        assert!(matches!(result, Err(EmailError::Configuration(_))));
    }
}
