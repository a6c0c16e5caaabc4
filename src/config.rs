use std::path::PathBuf;
use std::time::Duration;

/// Default origin of the scoring API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Default location of the portal session file.
pub const DEFAULT_SESSION_FILE: &str = ".portal_session.json";

/// Settings of the scoring API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            body_limit_bytes: 1024 * 1024,
            rate_limit_per_second: 10,
            rate_limit_burst: 20,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let config = Self {
            port: parse_var("PORT", defaults.port)
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            body_limit_bytes: parse_var("BODY_LIMIT_BYTES", defaults.body_limit_bytes)
                .map_err(|_| anyhow::anyhow!("BODY_LIMIT_BYTES must be a positive number"))?,
            rate_limit_per_second: parse_var(
                "RATE_LIMIT_PER_SECOND",
                defaults.rate_limit_per_second,
            )
            .and_then(|v| {
                if v == 0 {
                    anyhow::bail!("zero");
                }
                Ok(v)
            })
            .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a number above 0"))?,
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", defaults.rate_limit_burst)
                .and_then(|v| {
                    if v == 0 {
                        anyhow::bail!("zero");
                    }
                    Ok(v)
                })
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a number above 0"))?,
        };

        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!(
            "Rate limit: {}/s, burst {}",
            config.rate_limit_per_second,
            config.rate_limit_burst
        );

        Ok(config)
    }
}

/// Settings of the portal client.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Origin every endpoint path is appended to.
    pub api_base_url: String,
    pub session_file: PathBuf,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout: None,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_base_url: std::env::var("PORTAL_API_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(validate_base_url)
                .transpose()?
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            session_file: std::env::var("PORTAL_SESSION_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            request_timeout: match std::env::var("PORTAL_REQUEST_TIMEOUT_SECS") {
                Ok(secs) if !secs.trim().is_empty() => {
                    let secs: u64 = secs.trim().parse().map_err(|_| {
                        anyhow::anyhow!("PORTAL_REQUEST_TIMEOUT_SECS must be a whole number")
                    })?;
                    Some(Duration::from_secs(secs))
                }
                _ => None,
            },
        };

        tracing::debug!("Portal API base URL: {}", config.api_base_url);
        tracing::debug!("Portal session file: {}", config.session_file.display());

        Ok(config)
    }
}

/// Checks that `url` is an absolute http(s) origin and strips a trailing slash.
pub fn validate_base_url(url: String) -> anyhow::Result<String> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("PORTAL_API_BASE_URL must start with http:// or https://");
    }
    url::Url::parse(url)
        .map_err(|e| anyhow::anyhow!("PORTAL_API_BASE_URL is not a valid URL: {}", e))?;
    Ok(url.trim_end_matches('/').to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not valid", name)),
        _ => Ok(default),
    }
}
