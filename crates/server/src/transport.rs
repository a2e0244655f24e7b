//! stdio and streamable HTTP transports.

use crate::server::GoCardlessServer;
use anyhow::Context as _;
use axum::Router;
use axum::routing::get;
use rmcp::ServiceExt as _;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Serve one MCP session over stdin/stdout until the client disconnects.
///
/// # Errors
///
/// Returns an error if the session fails to initialize or terminates abnormally.
pub async fn serve_stdio(server: GoCardlessServer) -> anyhow::Result<()> {
    info!("serving MCP over stdio");
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .context("initialize stdio session")?;
    let reason = running.waiting().await.context("stdio session")?;
    info!(?reason, "stdio session closed");
    Ok(())
}

/// `/mcp` (streamable HTTP) plus `/health`.
pub fn http_router(server: GoCardlessServer) -> Router {
    let mcp = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", mcp)
}

/// Serve MCP over HTTP until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve_http(server: GoCardlessServer, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    let local = listener.local_addr().context("local_addr")?;
    info!(%local, "serving MCP over streamable HTTP at /mcp");

    axum::serve(listener, http_router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;

    info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
