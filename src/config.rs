use anyhow::{anyhow, Context};
use reqwest::Url;
use std::{env, net::SocketAddr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TRIP_API_BASE_URL: &str = "https://safarilog.onrender.com/api/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub trip_api_base_url: Url,
    pub trip_api_timeout: Duration,
}

impl Config {
    /// Reads `PORT`, `TRIP_API_BASE_URL` and `TRIP_API_TIMEOUT_SECS`, honouring a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port = parse_or_default("PORT", env::var("PORT").ok(), DEFAULT_PORT);
        let timeout_secs = parse_or_default(
            "TRIP_API_TIMEOUT_SECS",
            env::var("TRIP_API_TIMEOUT_SECS").ok(),
            DEFAULT_TIMEOUT_SECS,
        );
        let base = env::var("TRIP_API_BASE_URL").unwrap_or_else(|_| DEFAULT_TRIP_API_BASE_URL.to_string());

        Ok(Self {
            port,
            trip_api_base_url: parse_base_url(&base)?,
            trip_api_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn log(&self) {
        info!(
            port = self.port,
            trip_api = %self.trip_api_base_url,
            timeout_secs = self.trip_api_timeout.as_secs(),
            "configuration loaded"
        );
    }
}

/// The base must be an absolute http(s) URL; a trailing slash is added so
/// relative joins stay under the API prefix.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url: Url = normalized
        .parse()
        .with_context(|| format!("TRIP_API_BASE_URL {raw:?} is not a valid url"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("TRIP_API_BASE_URL must use http or https, got {other}")),
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("{name}={value:?} is not valid, using the default");
            default
        }),
    }
}
