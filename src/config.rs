use std::env;

use chrono::FixedOffset;

use crate::chart::DisplayZone;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Temperature backend
    pub backend_base_url: String,
    pub backend_timeout_seconds: u64,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Chart session
    pub display_zone: DisplayZone,
    pub initial_device_ids: Option<Vec<i64>>,

    // Caching
    pub device_cache_ttl_seconds: u64,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a required variable is not set and
    /// `ConfigError::Invalid` if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Temperature backend
            backend_base_url: env::var("TEMPERATURE_API_BASE_URL")
                .map_err(|_| ConfigError::Missing("TEMPERATURE_API_BASE_URL"))?
                .trim_end_matches('/')
                .to_string(),
            backend_timeout_seconds: env::var("TEMPERATURE_API_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Chart session
            display_zone: parse_display_zone(
                &env::var("DISPLAY_TIMEZONE").unwrap_or_else(|_| "local".to_string()),
            )?,
            initial_device_ids: match env::var("INITIAL_DEVICE_IDS") {
                Ok(raw) if !raw.trim().is_empty() => Some(parse_device_ids(&raw)?),
                _ => None,
            },

            // Caching
            device_cache_ttl_seconds: env::var("DEVICE_CACHE_TTL_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse `local`, `utc`, or a `±HH:MM` offset.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for anything else.
pub fn parse_display_zone(raw: &str) -> Result<DisplayZone, ConfigError> {
    let raw = raw.trim();
    match raw.to_lowercase().as_str() {
        "local" | "" => return Ok(DisplayZone::Local),
        "utc" | "z" => return Ok(DisplayZone::Utc),
        _ => {}
    }

    let invalid = || ConfigError::Invalid("DISPLAY_TIMEZONE", raw.to_string());
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours = parse_two_digits(hours).ok_or_else(invalid)?;
    let minutes = parse_two_digits(minutes).ok_or_else(invalid)?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(DisplayZone::Fixed)
        .ok_or_else(invalid)
}

/// Exactly two ASCII digits, so signs and whitespace inside `±HH:MM` are rejected.
fn parse_two_digits(part: &str) -> Option<i32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a comma-separated device id list such as `1,2,7`.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` if any entry is not an integer.
pub fn parse_device_ids(raw: &str) -> Result<Vec<i64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ConfigError::Invalid("INITIAL_DEVICE_IDS", raw.to_string()))
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
