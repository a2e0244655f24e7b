//! In-process stand-in for the GoCardless REST API.
//!
//! Routes are exact `(method, path)` matches registered up front. Unregistered routes answer
//! `404` with a GoCardless-style error envelope. Every request is recorded so tests can assert
//! on the calls a tool made and in which order.

use anyhow::Context as _;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::any;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string (empty when absent).
    pub query: String,
    /// Header names are lowercase.
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Query pairs as sent (no percent-decoding).
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .split('&')
            .filter(|kv| !kv.is_empty())
            .map(|kv| match kv.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (kv.to_string(), String::new()),
            })
            .collect()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

type Routes = HashMap<(String, String), (u16, Value)>;

#[derive(Default)]
struct MockState {
    routes: Routes,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Default)]
pub struct MockGoCardlessBuilder {
    routes: Routes,
}

impl MockGoCardlessBuilder {
    /// Respond to `method path` with `status` and a JSON `body`.
    #[must_use]
    pub fn respond(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(
            (method.to_ascii_uppercase(), path.to_string()),
            (status, body),
        );
        self
    }

    /// `GET path` → `200 body`.
    #[must_use]
    pub fn get(self, path: &str, body: Value) -> Self {
        self.respond("GET", path, 200, body)
    }

    /// `POST path` → `201 body`.
    #[must_use]
    pub fn post(self, path: &str, body: Value) -> Self {
        self.respond("POST", path, 201, body)
    }

    /// Bind an ephemeral loopback port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start(self) -> anyhow::Result<MockGoCardless> {
        let state = Arc::new(MockState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/{*path}", any(handle))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind mock GoCardless API")?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(MockGoCardless {
            base_url: format!("http://{addr}"),
            state,
            shutdown: Some(shutdown_tx),
        })
    }
}

/// A running mock API. Stops serving when dropped.
pub struct MockGoCardless {
    base_url: String,
    state: Arc<MockState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockGoCardless {
    #[must_use]
    pub fn builder() -> MockGoCardlessBuilder {
        MockGoCardlessBuilder::default()
    }

    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// `METHOD /path` of every request received so far.
    #[must_use]
    pub fn request_lines(&self) -> Vec<String> {
        self.state
            .requests
            .lock()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for MockGoCardless {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().push(recorded);

    let key = (method.as_str().to_string(), uri.path().to_string());
    match state.routes.get(&key) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            axum::Json(body.clone()),
        ),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": {
                    "message": "Resource not found",
                    "type": "invalid_api_usage",
                    "code": 404,
                    "request_id": "mock",
                    "errors": [{"reason": "resource_not_found", "message": "Resource not found"}]
                }
            })),
        ),
    }
}
