//! Environment-backed runtime configuration for the inbox host.

use std::{env, error::Error, fmt};

use messaging_core::ViewportClass;

const DEFAULT_CURRENT_USER_ID: &str = "u-self";
const DEFAULT_VIEWPORT: ViewportClass = ViewportClass::Wide;
const DEFAULT_FEED_INTERVAL_MS: u64 = 2_000;
const DEFAULT_RECORDING_TICK_MS: u64 = 1_000;
const DEFAULT_DEMO_TICKS: u32 = 6;

/// Runtime configuration used by the inbox host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxConfig {
    /// Identity assumed to be supplied by an external auth layer.
    pub current_user_id: String,
    /// Viewport class the demo starts in.
    pub start_viewport: ViewportClass,
    /// Interval of the simulated activity feed.
    pub feed_interval_ms: u64,
    /// Interval of the recording elapsed-seconds ticker.
    pub recording_tick_ms: u64,
    /// Number of feed ticks the demo run waits for before exiting.
    pub demo_ticks: u32,
}

impl InboxConfig {
    /// Parse configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let current_user_id = optional_trimmed_env("CARELINK_USER", &mut lookup)
            .unwrap_or_else(|| DEFAULT_CURRENT_USER_ID.to_owned());

        let start_viewport = match optional_trimmed_env("CARELINK_VIEWPORT", &mut lookup) {
            None => DEFAULT_VIEWPORT,
            Some(value) => match value.to_lowercase().as_str() {
                "narrow" => ViewportClass::Narrow,
                "wide" => ViewportClass::Wide,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "CARELINK_VIEWPORT",
                        value,
                        reason: "expected 'narrow' or 'wide'".to_owned(),
                    });
                }
            },
        };

        let feed_interval_ms = parse_optional_u64(
            "CARELINK_FEED_INTERVAL_MS",
            DEFAULT_FEED_INTERVAL_MS,
            &mut lookup,
        )?;
        let recording_tick_ms = parse_optional_u64(
            "CARELINK_RECORDING_TICK_MS",
            DEFAULT_RECORDING_TICK_MS,
            &mut lookup,
        )?;
        let demo_ticks =
            parse_optional_u32("CARELINK_DEMO_TICKS", DEFAULT_DEMO_TICKS, &mut lookup)?;

        if feed_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CARELINK_FEED_INTERVAL_MS",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }
        if recording_tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CARELINK_RECORDING_TICK_MS",
                value: "0".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }

        Ok(Self {
            current_user_id,
            start_viewport,
            feed_interval_ms,
            recording_tick_ms,
            demo_ticks,
        })
    }
}

/// Errors produced while parsing runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid {key}='{value}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

fn optional_trimmed_env<F>(key: &'static str, lookup: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_optional_u64<F>(
    key: &'static str,
    default: u64,
    lookup: &mut F,
) -> Result<u64, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    value
        .parse::<u64>()
        .map_err(|err| ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        })
}

fn parse_optional_u32<F>(
    key: &'static str,
    default: u32,
    lookup: &mut F,
) -> Result<u32, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(default);
    };
    value
        .parse::<u32>()
        .map_err(|err| ConfigError::InvalidValue {
            key,
            value,
            reason: err.to_string(),
        })
}
