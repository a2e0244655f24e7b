use crate::error::ApiError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const SANDBOX_BASE_URL: &str = "https://api-sandbox.gocardless.com";
const LIVE_BASE_URL: &str = "https://api.gocardless.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GoCardless environment selecting the API host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }

    /// The API base URL for this environment.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Live => LIVE_BASE_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "live" => Ok(Self::Live),
            other => Err(ApiError::Config(format!(
                "unknown GoCardless environment '{other}' (expected 'sandbox' or 'live')"
            ))),
        }
    }
}

/// Everything needed to build a [`crate::GoCardlessClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub access_token: String,
    pub environment: Environment,
    /// Replaces the environment's base URL (proxies, tests).
    pub base_url: Option<Url>,
    pub timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(access_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Effective base URL: the override if set, otherwise the environment's host.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot serve as a base (e.g. `mailto:`), or is not http(s).
    pub fn resolved_base_url(&self) -> Result<Url, ApiError> {
        let url = match &self.base_url {
            Some(u) => u.clone(),
            None => Url::parse(self.environment.base_url())
                .map_err(|e| ApiError::Config(format!("invalid built-in base URL: {e}")))?,
        };
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "base URL '{url}' must be an absolute http(s) URL"
            )));
        }
        Ok(url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"***")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_case_insensitively() {
        assert_eq!("sandbox".parse::<Environment>().ok(), Some(Environment::Sandbox));
        assert_eq!(" LIVE ".parse::<Environment>().ok(), Some(Environment::Live));
    }

    #[test]
    fn unknown_environment_is_a_config_error() {
        let err = "production".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
        assert!(err.to_string().contains("'production'"));
    }

    #[test]
    fn base_url_follows_environment_unless_overridden() {
        let cfg = ClientConfig::new("t", Environment::Live);
        assert_eq!(
            cfg.resolved_base_url().expect("url").as_str(),
            "https://api.gocardless.com/"
        );

        let cfg = ClientConfig::new("t", Environment::Live)
            .with_base_url(Url::parse("http://127.0.0.1:9999/gc").expect("url"));
        assert_eq!(
            cfg.resolved_base_url().expect("url").as_str(),
            "http://127.0.0.1:9999/gc"
        );
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let cfg = ClientConfig::new("t", Environment::Sandbox)
            .with_base_url(Url::parse("ftp://example.com/").expect("url"));
        assert!(cfg.resolved_base_url().is_err());
    }

    #[test]
    fn debug_output_hides_the_token() {
        let cfg = ClientConfig::new("live_secret_token", Environment::Sandbox);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("live_secret_token"));
    }
}
