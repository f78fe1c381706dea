use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Process configuration, loaded once at startup and carried in the router
/// state. Secrets stay `Option` so each handler can fail closed with a
/// configuration error instead of touching the upstream.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub google_api_key: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl AppConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            host,
            port,
            google_api_key: read_secret("GOOGLE_API_KEY"),
            telegram_bot_token: read_secret("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: read_secret("TELEGRAM_USER_ID"),
        }
    }

    /// The Google API key, if one is configured and non-empty.
    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Both Telegram credentials, or `None` if either is missing.
    pub fn telegram_credentials(&self) -> Option<(&str, &str)> {
        let token = self.telegram_bot_token.as_deref().filter(|t| !t.is_empty())?;
        let chat_id = self.telegram_chat_id.as_deref().filter(|c| !c.is_empty())?;
        Some((token, chat_id))
    }
}

fn read_secret(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Render a secret as a short prefix plus its length, safe for logs.
/// The raw value must never appear in any log line or response.
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}… ({} chars)", prefix, secret.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret_keeps_only_prefix() {
        let masked = mask_secret("AIzaSyExampleExampleExample");
        assert!(masked.starts_with("AIza"));
        assert!(masked.contains("27 chars"));
        assert!(!masked.contains("Example"));
    }

    #[test]
    fn test_mask_secret_short_value() {
        assert_eq!(mask_secret("ab"), "ab… (2 chars)");
    }

    #[test]
    fn test_empty_secrets_count_as_missing() {
        let config = AppConfig {
            google_api_key: Some(String::new()),
            telegram_bot_token: Some("token".to_string()),
            telegram_chat_id: None,
            ..Default::default()
        };
        assert!(config.google_api_key().is_none());
        assert!(config.telegram_credentials().is_none());
    }

    #[test]
    fn test_telegram_credentials_require_both() {
        let config = AppConfig {
            telegram_bot_token: Some("123:abc".to_string()),
            telegram_chat_id: Some("42".to_string()),
            ..Default::default()
        };
        assert_eq!(config.telegram_credentials(), Some(("123:abc", "42")));
    }
}
