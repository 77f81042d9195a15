// Request gateway: turns an `ApiRequest` into an HTTP call against the
// configured backend and normalizes every failure into an `ApiError`.
//
// The actual network round-trip sits behind the `Transport` trait so the
// header/error rules can be exercised without a server.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, CliError};
use crate::session::Session;

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Paths that must never carry the session token.
const AUTH_PATHS: [&str; 2] = [REGISTER_PATH, LOGIN_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An abstract request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, CliError> {
        let value = serde_json::to_value(body)
            .map_err(|e| CliError::Unexpected(format!("could not encode request body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a header that overrides the gateway defaults of the same name.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// A fully resolved request, ready for a `Transport`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as seen by the gateway: status and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round-trip. `Err` means the request never got a
/// response (DNS, refused connection, timeout) and carries a description.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String>;
}

/// Blocking reqwest transport used by the real binary.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let res = builder.send().map_err(|e| e.to_string())?;
        let status = res.status().as_u16();
        // The status has arrived; a body cut short still reports it.
        let body = res.text().unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

/// Gateway to the product/user API.
#[derive(Clone)]
pub struct ApiClient<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl ApiClient<HttpTransport> {
    /// Create a client for `config.base_url` backed by reqwest.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_transport(&config.base_url, HttpTransport::new()?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        ApiClient {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve URL and headers for `request`.
    ///
    /// Defaults are `Content-Type: application/json` plus the session bearer
    /// token on every path except the two auth endpoints; headers supplied
    /// on the request replace defaults with the same name.
    pub fn prepare(&self, session: &Session, request: &ApiRequest) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = session.token() {
            if !AUTH_PATHS.contains(&request.path.as_str()) {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }
        for (name, value) in &request.headers {
            headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }

        HttpRequest {
            method: request.method,
            url: format!("{}{}", self.base_url, request.path),
            headers,
            query: request.query.clone(),
            body: request.body.as_ref().map(Value::to_string),
        }
    }

    /// Send `request` and return the decoded JSON body, or `None` when the
    /// server answered with an empty body.
    pub fn send(&self, session: &Session, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let prepared = self.prepare(session, &request);
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            authorized = prepared.header("authorization").is_some(),
            "sending request"
        );

        let response = self.transport.execute(&prepared).map_err(|message| {
            warn!(path = %request.path, error = %message, "transport failure");
            ApiError::Transport {
                path: request.path.clone(),
                message,
            }
        })?;
        debug!(path = %request.path, status = response.status, "response received");

        if !response.is_success() {
            let message = error_message(&response.body);
            warn!(path = %request.path, status = response.status, %message, "request rejected");
            return Err(ApiError::Http {
                status: response.status,
                path: request.path,
                message,
            });
        }

        Ok(decode_body(&response.body))
    }
}

/// Prefer the JSON `message` field of an error body, else the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v.get("message") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
        .unwrap_or_else(|| body.to_string())
}

/// Empty bodies decode to `None`. A body that is not JSON is kept as a
/// string value so plain-text confirmations still reach the caller.
fn decode_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}
