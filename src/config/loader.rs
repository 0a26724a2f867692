use std::{env, time::Duration};

use url::Url;

use super::env::{
    AppConfig, ConfigError, Credentials, LoggingConfig, PollerConfig, DEFAULT_ENDPOINT,
};

const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

/// Logging settings never fail to load, so tracing can be up before credentials are checked.
pub fn load_logging_config() -> LoggingConfig {
    LoggingConfig::from_lookup(|key| env::var(key).ok())
}

/// Names of the required credentials that are absent or empty.
pub fn check_tokens<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID]
        .into_iter()
        .filter(|key| non_empty(&lookup, key).is_none())
        .collect()
}

impl AppConfig {
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = check_tokens(&lookup);
        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        let credentials = Credentials {
            practicum_token: non_empty(&lookup, PRACTICUM_TOKEN).unwrap_or_default(),
            telegram_token: non_empty(&lookup, TELEGRAM_TOKEN).unwrap_or_default(),
            telegram_chat_id: non_empty(&lookup, TELEGRAM_CHAT_ID).unwrap_or_default(),
        };

        let raw_endpoint =
            non_empty(&lookup, "PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(&raw_endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            value: raw_endpoint.clone(),
            source,
        })?;

        let poller = PollerConfig {
            endpoint,
            retry_period: Duration::from_secs(parse_secs(&lookup, "RETRY_PERIOD_SECS", 600)),
            request_timeout: Duration::from_secs(parse_secs(&lookup, "REQUEST_TIMEOUT_SECS", 30)),
        };

        Ok(Self {
            credentials,
            poller,
            logging: LoggingConfig::from_lookup(&lookup),
        })
    }
}

impl LoggingConfig {
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: non_empty(&lookup, "LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            logs_dir: non_empty(&lookup, "LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
