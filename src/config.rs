// config.rs
use crate::errors::ServerError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Sleeps between outbound calls. The Places API rejects a page token that is
/// used too soon, the rest just keeps us polite.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub page_token: Duration,
    pub between_queries: Duration,
    pub between_details: Duration,
    pub between_sites: Duration,
    pub between_pages: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_token: Duration::from_secs(2),
            between_queries: Duration::from_millis(200),
            between_details: Duration::from_millis(120),
            between_sites: Duration::from_millis(150),
            between_pages: Duration::from_millis(250),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            page_token: Duration::ZERO,
            between_queries: Duration::ZERO,
            between_details: Duration::ZERO,
            between_sites: Duration::ZERO,
            between_pages: Duration::ZERO,
        }
    }
}

/// Sleep unless the delay is zero.
pub fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub workers: usize,
    /// Fallback key when the form leaves the field empty.
    pub api_key: Option<String>,
    pub places_base_url: String,
    pub pacing: Pacing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            workers: DEFAULT_WORKERS,
            api_key: None,
            places_base_url: DEFAULT_PLACES_BASE_URL.to_string(),
            pacing: Pacing::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_raw = lookup("LEAD_FINDER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e| ServerError::Config(format!("LEAD_FINDER_ADDR '{addr_raw}': {e}")))?;

        let workers = match lookup("LEAD_FINDER_WORKERS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ServerError::Config(format!(
                        "LEAD_FINDER_WORKERS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_WORKERS,
        };

        let api_key = lookup("GOOGLE_PLACES_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let places_base_url = lookup("PLACES_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string());

        Ok(Self {
            addr,
            workers,
            api_key,
            places_base_url,
            pacing: Pacing::default(),
        })
    }

    /// Pick the key typed into the form, else the remembered one, else the configured one.
    pub fn resolve_api_key(
        &self,
        from_form: Option<&str>,
        remembered: Option<&str>,
    ) -> Result<String, ServerError> {
        from_form
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(remembered)
            .or(self.api_key.as_deref())
            .map(str::to_string)
            .ok_or_else(|| ServerError::Config("Please enter your Google API key.".into()))
    }
}
