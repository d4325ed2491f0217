use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_UPSTREAM_API_BASE: &str = "https://groupietrackers.herokuapp.com/api";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_GEOCODER_USER_AGENT: &str =
    "groupie-tracker/0.1 (+https://github.com/groupie-tracker)";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub upstream_api_base: String,
    pub static_dir: String,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderConfig {
    pub url: String,
    /// Sent as `User-Agent`; the geocoding service rejects anonymous callers
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum spacing between two outbound lookups, process-wide
    pub pacing: Duration,
    /// Upper bound on a single artist's batch; `None` lets it run to completion
    pub batch_budget: Option<Duration>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: DEFAULT_GEOCODER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            pacing: Duration::from_millis(300),
            batch_budget: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let user_agent = env::var("GEOCODER_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            bail!("GEOCODER_USER_AGENT must not be empty");
        }

        let pacing_ms: u64 = parse_var("GEOCODER_PACING_MS", 300)?;
        if pacing_ms == 0 {
            bail!("GEOCODER_PACING_MS must be greater than zero");
        }

        let batch_budget = match env::var("GEOCODE_BATCH_BUDGET_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().context(
                "GEOCODE_BATCH_BUDGET_SECS must be a whole number of seconds",
            )?)),
            Err(_) => None,
        };

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_var("SERVER_PORT", 8000)
                .context("SERVER_PORT must be a valid port number")?,
            upstream_api_base: env::var("UPSTREAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_API_BASE.to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            geocoder: GeocoderConfig {
                url: env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string()),
                user_agent,
                timeout: Duration::from_secs(parse_var("GEOCODER_TIMEOUT_SECS", 10)?),
                pacing: Duration::from_millis(pacing_ms),
                batch_budget,
            },
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
