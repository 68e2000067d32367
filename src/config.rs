use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::groq::DEFAULT_MODEL;

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_SUMMARIZE_TTL_SECS: u64 = 600;

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    Missing(&'static str),
    /// A variable is present but malformed.
    Invalid { var: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(var) => {
                write!(f, "required environment variable {var} is not set")
            }
            Self::Invalid { var, reason } => {
                write!(f, "environment variable {var} is invalid: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub telegram_bot_token: String,
    pub groq_api_key: String,
    pub groq_model: String,
    /// Port for the web chat endpoint.
    pub http_port: u16,
    /// When set, logs are also appended to `<dir>/tldrbot.log`.
    pub log_dir: Option<PathBuf>,
    /// Expiry for summarize-pending flags. None = never expire.
    pub summarize_ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let telegram_bot_token = require(&get, "TELEGRAM_BOT_TOKEN")?;

        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = telegram_bot_token.split(':').collect();
        if token_parts.len() != 2
            || token_parts[0].parse::<u64>().is_err()
            || token_parts[1].is_empty()
        {
            return Err(ConfigError::Invalid {
                var: "TELEGRAM_BOT_TOKEN",
                reason: "expected format 123456789:ABCdefGHI...".into(),
            });
        }

        let groq_api_key = require(&get, "GROQ_API_KEY")?;

        let groq_model = get("GROQ_MODEL")
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let http_port = match get("HTTP_PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "HTTP_PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        let log_dir = get("LOG_DIR").filter(|d| !d.is_empty()).map(PathBuf::from);

        let ttl_secs = match get("SUMMARIZE_TTL_SECS").filter(|t| !t.is_empty()) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                var: "SUMMARIZE_TTL_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_SUMMARIZE_TTL_SECS,
        };
        // 0 keeps flags forever, matching a user who never follows up.
        let summarize_ttl = (ttl_secs != 0).then(|| Duration::from_secs(ttl_secs));

        Ok(Self {
            telegram_bot_token,
            groq_api_key,
            groq_model,
            http_port,
            log_dir,
            summarize_ttl,
        })
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    get(var)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(var))
}
