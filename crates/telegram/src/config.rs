use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::error::{Error, Result};

/// Environment variable holding the bot token.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Configuration for the bot process.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Long-poll timeout requested from the Bot API (seconds).
    pub poll_timeout_secs: u32,

    /// Upper bound on a single attachment download (seconds).
    pub fetch_timeout_secs: u64,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            poll_timeout_secs: 30,
            fetch_timeout_secs: 30,
        }
    }
}

impl TelegramConfig {
    /// Load configuration from the process environment. The token is
    /// required; startup aborts without it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let token = lookup(TOKEN_ENV)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "{TOKEN_ENV} is not set (export it or add it to a .env file)"
                ))
            })?;
        Ok(Self {
            token: Secret::new(token),
            ..Self::default()
        })
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_a_config_error() {
        let err = TelegramConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn blank_token_is_a_config_error() {
        let err = TelegramConfig::from_lookup(|_| Some("   ".into())).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn token_is_read_from_the_environment() {
        let cfg = TelegramConfig::from_lookup(|name| {
            (name == TOKEN_ENV).then(|| "123:ABC".to_string())
        })
        .unwrap();
        assert_eq!(cfg.token.expose_secret(), "123:ABC");
        assert_eq!(cfg.poll_timeout_secs, 30);
    }

    #[test]
    fn debug_redacts_the_token() {
        let cfg = TelegramConfig {
            token: Secret::new("123:ABC".into()),
            ..Default::default()
        };
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("123:ABC"));
    }

    #[test]
    fn serialize_roundtrip() {
        let cfg = TelegramConfig {
            token: Secret::new("tok".into()),
            poll_timeout_secs: 10,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: TelegramConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.token.expose_secret(), "tok");
        assert_eq!(cfg2.poll_timeout_secs, 10);
    }
}
