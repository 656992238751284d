use std::env;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GROQ_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base_url: String,
    pub email_user: String,
    pub email_pass: String,
    pub mail_from: String,
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let server_port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        let smtp_port = match lookup("SMTP_PORT") {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::InvalidSmtpPort)?),
            None => None,
        };

        let email_user = required("EMAIL_USER")?;

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            groq_api_key: required("GROQ_API_KEY")?,
            groq_model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            groq_base_url: lookup("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            email_pass: required("EMAIL_PASS")?,
            mail_from: lookup("MAIL_FROM").unwrap_or_else(|| email_user.clone()),
            email_user,
            smtp_host: lookup("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Invalid SMTP port")]
    InvalidSmtpPort,
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("GROQ_API_KEY", "gsk_test"),
        ("EMAIL_USER", "me@example.com"),
        ("EMAIL_PASS", "app-password"),
    ];

    #[test]
    fn defaults_apply_when_optional_vars_unset() {
        let config = assert_ok!(Config::from_lookup(lookup_from(REQUIRED)));

        assert_eq!(config.server_port, DEFAULT_PORT);
        assert_eq!(config.server_addr(), "0.0.0.0:5000");
        assert_eq!(config.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.smtp_host, DEFAULT_SMTP_HOST);
        assert_eq!(config.smtp_port, None);
        assert_eq!(config.mail_from, "me@example.com");
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "8081"));
        pairs.push(("MAIL_FROM", "Drafts <drafts@example.com>"));
        pairs.push(("SMTP_PORT", "587"));

        let config = assert_ok!(Config::from_lookup(lookup_from(&pairs)));

        assert_eq!(config.server_port, 8081);
        assert_eq!(config.mail_from, "Drafts <drafts@example.com>");
        assert_eq!(config.smtp_port, Some(587));
    }

    #[test]
    fn missing_api_key_is_reported() {
        let pairs = [("EMAIL_USER", "me@example.com"), ("EMAIL_PASS", "x")];
        let err = assert_err!(Config::from_lookup(lookup_from(&pairs)));
        assert!(matches!(err, ConfigError::Missing("GROQ_API_KEY")));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "not-a-port"));
        let err = assert_err!(Config::from_lookup(lookup_from(&pairs)));
        assert!(matches!(err, ConfigError::InvalidPort));
    }
}
