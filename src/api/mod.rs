//! REST client for the ERP backend.
//!
//! Every call resolves to an `ApiResponse` envelope, whatever the HTTP status:
//! callers branch on `status`. Only transport failures (no HTTP response at
//! all) come back as `Err(AppError::Transport)`.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

pub mod catalog;
pub mod client;
pub mod home;
pub mod installer;
pub mod inventory;
pub mod order;
pub mod staff;

/// Supplies the bearer credential for outgoing requests.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Token source for callers that never authenticate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

impl TokenSource for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T = Value> {
    pub status: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl ApiResponse<Value> {
    /// The backend's `detail` message, present on most error bodies.
    pub fn detail(&self) -> Option<&str> {
        self.data.get("detail").and_then(Value::as_str)
    }

    pub fn parse<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl HttpClient {
    pub fn new(cfg: &ApiConfig, tokens: Arc<dyn TokenSource>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(concat!("myerp-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL and path are concatenated, so a base with a path prefix
    /// (`http://host/api`) keeps it.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match self.tokens.token() {
            Some(token) => req.header(AUTHORIZATION, format!("JWT {}", token)),
            None => req,
        }
    }

    pub async fn get(&self, path: &str) -> AppResult<ApiResponse> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_with<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> AppResult<ApiResponse> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    /// Paged list endpoint: `?page=N` plus any extra filters.
    pub async fn get_page<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        page: u32,
        query: &Q,
    ) -> AppResult<ApiResponse> {
        let req = self
            .request(Method::GET, path)
            .query(&[("page", page)])
            .query(query);
        self.send(req).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<ApiResponse> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<ApiResponse> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<ApiResponse> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// Raw-bytes GET for file exports.
    pub async fn download(&self, path: &str) -> AppResult<ApiResponse<Vec<u8>>> {
        let resp = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(transport_failure)?;
        let status = resp.status().as_u16();
        let data = resp.bytes().await.map_err(transport_failure)?.to_vec();
        log_status(status, path);
        Ok(ApiResponse { status, data })
    }

    async fn send(&self, req: RequestBuilder) -> AppResult<ApiResponse> {
        let resp = req.send().await.map_err(transport_failure)?;
        let status = resp.status().as_u16();
        let path = resp.url().path().to_string();
        let bytes = resp.bytes().await.map_err(transport_failure)?;
        log_status(status, &path);
        Ok(ApiResponse { status, data: parse_body(&bytes) })
    }
}

fn transport_failure(e: reqwest::Error) -> AppError {
    tracing::warn!("Request failed before a response was received: {}", e);
    AppError::Transport(e)
}

fn log_status(status: u16, path: &str) {
    if status == 401 {
        tracing::warn!(path, "Backend rejected credentials (401)");
    } else {
        tracing::debug!(path, status, "Backend responded");
    }
}

/// JSON when the body parses, the text as a JSON string otherwise, `null` when empty.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
