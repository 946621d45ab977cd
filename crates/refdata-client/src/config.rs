//! Client configuration.
//!
//! A single base URL for the `/api` root plus a request timeout. Defaults
//! point at a locally running backend.

use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the RefData backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL of the `/api` root, always ending in `/`.
    pub api_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for an explicit API root.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url("api_url", api_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REFDATA_API_URL` (default: `http://127.0.0.1:8000/api/`)
    /// - `REFDATA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("REFDATA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self {
            api_url: parse_api_url("REFDATA_API_URL", &raw)?,
            timeout_secs: std::env::var("REFDATA_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration for a backend listening on `127.0.0.1:<port>`.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        let mut config = Self::new(&format!("http://127.0.0.1:{port}/api/"))?;
        config.timeout_secs = 5;
        Ok(config)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Parse `raw` and make sure its path ends in `/` so that relative joins
/// stay under it.
fn parse_api_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            source.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_builds_api_root() {
        let cfg = ClientConfig::local(9100).unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9100/api/");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn trailing_slash_is_added() {
        let cfg = ClientConfig::new("https://refdata.example.com/api").unwrap();
        assert_eq!(cfg.api_url.as_str(), "https://refdata.example.com/api/");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn existing_trailing_slash_is_kept() {
        let cfg = ClientConfig::new("http://localhost:8000/api/").unwrap();
        assert_eq!(cfg.api_url.path(), "/api/");
    }

    #[test]
    fn invalid_url_is_rejected() {
        let err = ClientConfig::new("not a url").unwrap_err();
        assert!(err.to_string().starts_with("invalid URL for api_url"));
    }

    #[test]
    fn non_base_url_is_rejected() {
        assert!(ClientConfig::new("mailto:ops@example.com").is_err());
    }
}
