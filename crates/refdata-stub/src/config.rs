//! Stub server configuration.

/// Log output format of the stub binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is text.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            log_format: LogFormat::Text,
        }
    }
}

impl StubConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REFDATA_STUB_PORT` (default: 8000)
    /// - `REFDATA_LOG_FORMAT` (`text` or `json`, default: `text`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: std::env::var("REFDATA_STUB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            log_format: std::env::var("REFDATA_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Text);
    }

    #[test]
    fn defaults() {
        let cfg = StubConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }
}
