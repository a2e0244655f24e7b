//! HTTP plumbing shared by all resources.
//!
//! Every GoCardless response wraps its payload in an envelope keyed by the resource name
//! (`{"customers": [...]}` for lists, `{"customers": {...}}` for single records), and every
//! request body is wrapped the same way.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::resources::{Customers, Mandates, Payments, Payouts, Subscriptions};
use crate::safety::redact_url;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// API version pinned by every request.
pub const API_VERSION: &str = "2015-07-06";

const USER_AGENT: &str = concat!("gocardless-mcp/", env!("CARGO_PKG_VERSION"));

/// A GoCardless API client.
///
/// Cheap to build; callers are expected to build one per unit of work.
#[derive(Debug, Clone)]
pub struct GoCardlessClient {
    http: Client,
    base_url: Url,
    access_token: String,
    timeout: Duration,
}

impl GoCardlessClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the access token is empty, the base URL is unusable, or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(ApiError::Config("access token must not be empty".to_string()));
        }
        let base_url = config.resolved_base_url()?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url,
            access_token: config.access_token.clone(),
            timeout: config.timeout,
        })
    }

    #[must_use]
    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    #[must_use]
    pub fn payments(&self) -> Payments<'_> {
        Payments::new(self)
    }

    #[must_use]
    pub fn mandates(&self) -> Mandates<'_> {
        Mandates::new(self)
    }

    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    #[must_use]
    pub fn payouts(&self) -> Payouts<'_> {
        Payouts::new(self)
    }

    /// `GET /<resource>?<params>`: the first page of records.
    pub(crate) async fn list<T, P>(&self, resource: &str, params: &P) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let url = self.url(&[resource])?;
        let request = self.request(Method::GET, url).query(params);
        let body = self.send(request).await?;
        unwrap_envelope(body, resource)
    }

    /// `GET /<resource>/<id>`.
    pub(crate) async fn get<T>(&self, resource: &str, id: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(&[resource, id])?;
        let body = self.send(self.request(Method::GET, url)).await?;
        unwrap_envelope(body, resource)
    }

    /// `POST /<resource>` with the body wrapped in the resource envelope.
    pub(crate) async fn create<T, B>(&self, resource: &str, record: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(&[resource])?;
        let mut envelope = Map::new();
        envelope.insert(resource.to_string(), serde_json::to_value(record)?);

        let request = self
            .request(Method::POST, url)
            .json(&Value::Object(envelope));
        let body = self.send(request).await?;
        unwrap_envelope(body, resource)
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::Config(format!("base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .header("GoCardless-Version", API_VERSION)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(self.timeout)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = redact_url(request.url());

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%method, url = %url, status = status.as_u16(), "gocardless request");

        let bytes = response.bytes().await?;
        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(|e| {
                ApiError::Decode(format!("response from {method} {url} is not JSON: {e}"))
            });
        }

        Err(api_error(status, &bytes))
    }
}

fn unwrap_envelope<T: DeserializeOwned>(mut body: Value, resource: &str) -> Result<T> {
    let payload = body
        .get_mut(resource)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("response is missing the '{resource}' envelope")))?;
    serde_json::from_value(payload)
        .map_err(|e| ApiError::Decode(format!("invalid '{resource}' payload: {e}")))
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<u16>,
    request_id: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    field: Option<String>,
    message: String,
}

fn api_error(status: reqwest::StatusCode, bytes: &[u8]) -> ApiError {
    let status_code = status.as_u16();

    if let Ok(ErrorEnvelope { error }) = serde_json::from_slice::<ErrorEnvelope>(bytes) {
        let code = error.code.unwrap_or(status_code);
        let mut message = match &error.kind {
            Some(kind) => format!("{} ({kind}, status {code})", error.message),
            None => format!("{} (status {code})", error.message),
        };
        for fe in &error.errors {
            match &fe.field {
                Some(field) => message.push_str(&format!("; {field} {}", fe.message)),
                None => message.push_str(&format!("; {}", fe.message)),
            }
        }
        return ApiError::Api {
            status: status_code,
            message,
            request_id: error.request_id,
        };
    }

    let reason = status.canonical_reason().unwrap_or("Unknown");
    let body = String::from_utf8_lossy(bytes);
    ApiError::Api {
        status: status_code,
        message: format!("API returned {status_code} {reason}: {}", body.trim()),
        request_id: None,
    }
}
