use std::borrow::Cow;
use std::io;
use std::time::{Duration, Instant};

use actix_web::web::Bytes;
use awc::error::{ConnectError, PayloadError, SendRequestError};
use awc::http::header;
use serde_json::{Map, Value};

pub use awc::http::{Method, StatusCode};

use crate::config::TargetConfig;
use crate::report::Reporter;

/// Transport-level failures; never escapes a test case
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Connection error - is server running at {base_url}?")]
    Connect { base_url: String, reason: String },
    #[error("Request failed: timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("Request failed: invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Request failed: could not read response body: {0}")]
    Body(#[from] PayloadError),
}

/// Optional parts of a request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    json: Option<Value>,
    bearer: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `body` as the JSON request body
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Send `Authorization: Bearer <token>`
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// A fully read response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
    json: Option<Value>,
}

impl ApiResponse {
    /// Wrap a status and raw body, decoding the body as JSON when it is JSON
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        let json = serde_json::from_slice(&body).ok();

        Self { status, body, json }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body as text, lossy for non UTF-8 payloads
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Decoded body when it is a JSON object
    pub fn object(&self) -> Option<&Map<String, Value>> {
        self.json.as_ref().and_then(Value::as_object)
    }
}

/// HTTP client bound to the target's base URL
pub struct ApiClient {
    http: awc::Client,
    target: TargetConfig,
}

impl ApiClient {
    pub fn new(config: &TargetConfig) -> Self {
        let connector = awc::Connector::new().timeout(config.connect_timeout());

        let http = awc::Client::builder()
            .timeout(config.timeout())
            .connector(connector)
            .add_default_header((header::USER_AGENT, config.user_agent.clone()))
            .finish();

        Self {
            http,
            target: config.clone(),
        }
    }

    /// Perform one request against `base_url + path`
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.target.url(path);
        let start = Instant::now();

        let mut request = self.http.request(method.clone(), url.as_str());
        if let Some(token) = &options.bearer {
            request = request.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
        }

        let sent = match &options.json {
            Some(body) => request.send_json(body).await,
            None => request.send().await,
        };

        let mut response = sent.map_err(|e| self.classify(&url, e))?;
        let status = response.status();
        let body = response.body().limit(self.target.max_body_size).await?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(ApiResponse::new(status, body))
    }

    /// Perform one request, recording a transport failure instead of returning it.
    ///
    /// `Ok(None)` means the failure was already counted and the caller should
    /// skip its remaining assertions. Only console write errors are returned.
    pub async fn make_request(
        &self,
        report: &mut Reporter,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> io::Result<Option<ApiResponse>> {
        match self.send(method.clone(), path, &options).await {
            Ok(response) => Ok(Some(response)),
            Err(e) => {
                tracing::warn!(method = %method, path, "Request failed: {:?}", e);

                report.fail(&e)?;
                Ok(None)
            }
        }
    }

    fn classify(&self, url: &str, error: SendRequestError) -> ClientError {
        match error {
            SendRequestError::Timeout | SendRequestError::Connect(ConnectError::Timeout) => {
                ClientError::Timeout(self.target.timeout())
            }
            SendRequestError::Connect(e) => ClientError::Connect {
                base_url: self.target.base_url.clone(),
                reason: e.to_string(),
            },
            SendRequestError::Url(e) => ClientError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            },
            e => ClientError::Request(e.to_string()),
        }
    }
}
