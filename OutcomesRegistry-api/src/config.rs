use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3000;

/// Settings read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// `APP_ENV`, reported by the health check
    pub environment: String,
    /// Externally reachable base URL used in tracking links
    pub public_base_url: String,
    /// Where click redirects go when the target is missing or unsafe
    pub default_redirect_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let public_base_url = format!("http://localhost:{}", DEFAULT_PORT);
        Self {
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            default_redirect_url: public_base_url.clone(),
            public_base_url,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let port = match non_empty_var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got '{}'", raw))?,
            None => DEFAULT_PORT,
        };

        let public_base_url = non_empty_var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            port,
            environment: non_empty_var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            default_redirect_url: non_empty_var("DEFAULT_REDIRECT_URL").unwrap_or_else(|| public_base_url.clone()),
            public_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.default_redirect_url, "http://localhost:3000");
    }
}
