//! Minimal typed client for the GoCardless REST API.
//!
//! This crate is used by `gocardless-mcp` to back its tools. It covers only what the tools need:
//! - `list` (first page only), `get` and `create` for customers and payments
//! - `list` and `get` for mandates and subscriptions
//! - `list` for payouts
//!
//! It intentionally contains **no** retries, pagination cursors, idempotency keys or caching.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resources;
pub mod safety;

pub use client::GoCardlessClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, Result};
pub use reqwest::Method;
