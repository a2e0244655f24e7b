use anyhow::Context as _;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

pub use gocardless_test_support::{KillOnDrop, MockGoCardless};

pub fn pick_unused_port() -> anyhow::Result<u16> {
    gocardless_test_support::pick_unused_port()
}

pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    gocardless_test_support::wait_http_ok(url, timeout_dur).await
}

pub fn spawn_server(api_base_url: &str, port: u16) -> anyhow::Result<Child> {
    let bin = env!("CARGO_BIN_EXE_gocardless-mcp");
    Command::new(bin)
        .env_remove("RUST_LOG")
        .env_remove("GOCARDLESS_ACCESS_TOKEN")
        .arg("--transport")
        .arg("http")
        .arg("--bind")
        .arg(format!("127.0.0.1:{port}"))
        .arg("--base-url")
        .arg(api_base_url)
        .arg("--access-token")
        .arg("sandbox_integration_token")
        .arg("--log-level")
        .arg("info")
        .stdout(Stdio::null())
        .spawn()
        .context("spawn gocardless-mcp")
}

pub async fn start_server(api_base_url: &str) -> anyhow::Result<(String, KillOnDrop)> {
    let port = pick_unused_port()?;
    let child = KillOnDrop(spawn_server(api_base_url, port)?);

    let base_url = format!("http://127.0.0.1:{port}");
    wait_http_ok(&format!("{base_url}/health"), Duration::from_secs(20)).await?;

    Ok((base_url, child))
}
