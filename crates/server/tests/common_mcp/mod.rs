use anyhow::Context as _;
use futures::StreamExt as _;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::io::AsyncBufReadExt as _;
use tokio_util::io::StreamReader;

/// Test-only MCP client for the `/mcp` streamable HTTP endpoint.
pub struct McpHttpSession {
    client: reqwest::Client,
    endpoint: String,
    session_id: String,
    next_id: u64,
}

impl McpHttpSession {
    /// `initialize` followed by `notifications/initialized`.
    pub async fn connect(base_url: &str) -> anyhow::Result<(Self, Value)> {
        let client = reqwest::Client::new();
        let endpoint = format!("{}/mcp", base_url.trim_end_matches('/'));

        let resp = post(
            &client,
            &endpoint,
            None,
            &json!({
                "jsonrpc": "2.0",
                "id": 0,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": { "name": "gocardless-mcp-integration-tests", "version": "0" }
                }
            }),
        )
        .await?;

        let session_id = resp
            .headers()
            .get("Mcp-Session-Id")
            .and_then(|h| h.to_str().ok())
            .context("initialize response has no Mcp-Session-Id")?
            .to_string();
        let init = first_sse_message(resp).await?;
        anyhow::ensure!(init.get("id") == Some(&json!(0)), "unexpected initialize id");

        let ack = post(
            &client,
            &endpoint,
            Some(&session_id),
            &json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await?;
        anyhow::ensure!(
            ack.status().as_u16() == 202,
            "notifications/initialized returned {}",
            ack.status()
        );

        let session = Self {
            client,
            endpoint,
            session_id,
            next_id: 1,
        };
        Ok((session, init))
    }

    pub async fn request(&mut self, method: &str, params: Value) -> anyhow::Result<Value> {
        let id = self.next_id;
        self.next_id += 1;

        let resp = post(
            &self.client,
            &self.endpoint,
            Some(&self.session_id),
            &json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}),
        )
        .await?;

        let msg = tokio::time::timeout(Duration::from_secs(15), first_sse_message(resp))
            .await
            .context("timeout waiting for event-stream response")??;
        anyhow::ensure!(msg.get("id") == Some(&json!(id)), "response id mismatch: {msg}");
        Ok(msg)
    }

    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> anyhow::Result<ToolOutput> {
        let msg = self
            .request("tools/call", json!({"name": name, "arguments": arguments}))
            .await?;
        ToolOutput::from_message(&msg)
    }
}

/// The single text block of a `tools/call` result.
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn from_message(msg: &Value) -> anyhow::Result<Self> {
        let result = msg.get("result").with_context(|| format!("no result: {msg}"))?;
        let text = result
            .pointer("/content/0/text")
            .and_then(Value::as_str)
            .context("tools/call result has no content[0].text")?
            .to_string();
        let is_error = result
            .get("isError")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(Self { text, is_error })
    }
}

async fn post(
    client: &reqwest::Client,
    endpoint: &str,
    session_id: Option<&str>,
    body: &Value,
) -> anyhow::Result<reqwest::Response> {
    let mut req = client
        .post(endpoint)
        .header("Accept", "application/json, text/event-stream")
        .header("Content-Type", "application/json")
        .json(body);
    if let Some(session_id) = session_id {
        req = req.header("Mcp-Session-Id", session_id);
    }

    req.send()
        .await
        .context("POST /mcp")?
        .error_for_status()
        .context("POST /mcp status")
}

async fn first_sse_message(resp: reqwest::Response) -> anyhow::Result<Value> {
    let bytes = resp
        .bytes_stream()
        .map(|chunk| chunk.map_err(std::io::Error::other));
    let mut lines = tokio::io::BufReader::new(StreamReader::new(bytes)).lines();

    let mut data: Vec<String> = Vec::new();
    while let Some(line) = lines.next_line().await.context("read event-stream")? {
        let line = line.trim_end();
        if line.is_empty() {
            // Priming events carry no JSON payload.
            if let Ok(value) = serde_json::from_str::<Value>(&data.join("\n")) {
                return Ok(value);
            }
            data.clear();
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data.push(rest.trim().to_string());
        }
    }

    anyhow::bail!("event-stream ended without a JSON message")
}
