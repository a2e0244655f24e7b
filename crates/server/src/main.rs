use clap::Parser as _;
use gocardless_mcp::{Cli, GoCardlessServer, ToolGateway, Transport, logging, transport};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_format);

    let settings = cli.provider_settings();
    if settings.access_token.is_none() {
        warn!("GOCARDLESS_ACCESS_TOKEN is not set; every tool call will fail until it is");
    }
    info!(
        environment = %settings.environment,
        base_url = settings.base_url.as_ref().map(url::Url::as_str),
        "starting gocardless-mcp {}",
        env!("CARGO_PKG_VERSION")
    );

    let server = GoCardlessServer::new(ToolGateway::new(settings));
    match cli.transport {
        Transport::Stdio => transport::serve_stdio(server).await,
        Transport::Http => transport::serve_http(server, cli.bind).await,
    }
}
