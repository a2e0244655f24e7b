use crate::error::ToolError;
use clap::{Parser, ValueEnum};
use gocardless_api::config::DEFAULT_TIMEOUT;
use gocardless_api::{ClientConfig, Environment};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// MCP streamable HTTP at `/mcp`.
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "gocardless-mcp",
    version,
    about = "Expose the GoCardless API as MCP tools"
)]
pub struct Cli {
    /// GoCardless access token. Tool calls fail until one is provided.
    #[arg(long, env = "GOCARDLESS_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// GoCardless environment: `sandbox` or `live`.
    #[arg(long, env = "GOCARDLESS_ENVIRONMENT", default_value = "sandbox")]
    pub environment: Environment,

    /// Override the API base URL (proxies, local testing).
    #[arg(long, env = "GOCARDLESS_BASE_URL")]
    pub base_url: Option<Url>,

    /// Per-request timeout towards the GoCardless API.
    #[arg(long, env = "GOCARDLESS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[arg(long, env = "GOCARDLESS_MCP_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Listen address for `--transport http`.
    #[arg(long, env = "GOCARDLESS_MCP_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Log filter (`RUST_LOG` takes precedence when set).
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    #[must_use]
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            access_token: self
                .access_token
                .clone()
                .filter(|t| !t.trim().is_empty()),
            environment: self.environment,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Provider connection settings captured at startup.
///
/// A client is built from these on every tool call and never cached.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    pub access_token: Option<String>,
    pub environment: Environment,
    pub base_url: Option<Url>,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Client config for one tool call.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingAccessToken`] when no token is configured.
    pub fn client_config(&self) -> Result<ClientConfig, ToolError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ToolError::MissingAccessToken)?;

        let mut cfg = ClientConfig::new(token, self.environment);
        if let Some(url) = &self.base_url {
            cfg = cfg.with_base_url(url.clone());
        }
        if !self.timeout.is_zero() {
            cfg = cfg.with_timeout(self.timeout);
        }
        Ok(cfg)
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .finish()
    }
}
