use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Prefix joined in front of every endpoint path, e.g. `http://host/api`.
    /// Set MYERP__API__BASE_URL in production.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// JSON file holding the persisted session keys.
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_timeout_ms() -> u64 { 10_000 }
fn default_session_path() -> String { "./.myerp/session.json".to_string() }

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

pub fn validate(cfg: &Config) -> Result<()> {
    let url = reqwest::Url::parse(&cfg.api.base_url).map_err(|e| {
        anyhow::anyhow!("CONFIG ERROR: invalid api.base_url '{}': {}", cfg.api.base_url, e)
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "CONFIG ERROR: api.base_url must use http or https (got '{}')",
            url.scheme()
        );
    }

    if cfg.api.timeout_ms == 0 {
        anyhow::bail!("CONFIG ERROR: api.timeout_ms must be greater than zero");
    }

    if cfg.session.path.trim().is_empty() {
        anyhow::bail!("CONFIG ERROR: session.path cannot be empty");
    }

    tracing::debug!("Configuration validation passed");
    Ok(())
}

pub fn load() -> Result<Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name("myerp").required(false))
        .add_source(config::Environment::with_prefix("MYERP").separator("__"))
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_ms", 10_000)?
        .set_default("session.path", "./.myerp/session.json")?
        .build()?
        .try_deserialize()?;

    validate(&cfg)?;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(base_url: &str, timeout_ms: u64) -> Config {
        Config {
            api: ApiConfig { base_url: base_url.to_string(), timeout_ms },
            session: SessionConfig { path: "./session.json".to_string() },
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&sample(DEFAULT_BASE_URL, 10_000)).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(validate(&sample("ftp://example.com/api", 10_000)).is_err());
    }

    #[test]
    fn test_rejects_unparseable_url() {
        assert!(validate(&sample("not a url", 10_000)).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(validate(&sample("https://erp.example.com/api", 0)).is_err());
    }
}
