//! MCP server exposing GoCardless customers, payments, mandates, subscriptions and payouts as
//! tools.

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod tools;
pub mod transport;
pub mod views;

pub use config::{Cli, LogFormat, ProviderSettings, Transport};
pub use error::ToolError;
pub use server::GoCardlessServer;
pub use tools::ToolGateway;
