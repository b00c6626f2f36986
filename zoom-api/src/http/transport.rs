//! The single HTTP request primitive shared by OAuth and REST API calls.

use std::time::Duration;

use log::*;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::{status_error, transport_error, Error, ErrorKind, TransportErrorKind};

/// Transport configuration for a single call.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Overall request timeout.
    pub timeout: Duration,
    /// Connect timeout, if any.
    pub connect_timeout: Option<Duration>,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// User agent string.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: crate::config::DEFAULT_TIMEOUT,
            connect_timeout: None,
            accept_invalid_certs: false,
            user_agent: format!("zoom-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// An outgoing HTTP request.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Query parameters, sent in insertion order.
    pub query: Vec<(String, String)>,
    /// URL-encoded form body, sent in insertion order.
    pub form: Option<Vec<(String, String)>>,
}

impl HttpRequest {
    /// Create a request that accepts JSON.
    pub fn new(method: Method, url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            method,
            url,
            headers,
            query: Vec::new(),
            form: None,
        }
    }

    /// Set the `Authorization` header, marked sensitive so it never shows in debug output.
    pub fn with_authorization(mut self, value: &str) -> Result<Self, Error> {
        let mut header_value = HeaderValue::from_str(value).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Transport(TransportErrorKind::Builder),
        })?;
        header_value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, header_value);
        Ok(self)
    }

    /// Set the query parameters.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Set the URL-encoded form body.
    pub fn with_form(mut self, form: Vec<(String, String)>) -> Self {
        self.form = Some(form);
        self
    }
}

/// A response with its status, header block, and body kept apart.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Parse the body as JSON.
    ///
    /// Non-success statuses and empty bodies are errors; a body that is
    /// present but malformed is a decode error.
    pub fn into_json(self) -> Result<Value, Error> {
        if !self.status.is_success() {
            warn!("Zoom responded with status {}", self.status);
            return Err(status_error(self.status.as_u16(), &self.body));
        }

        if self.body.trim().is_empty() {
            warn!("Zoom responded with an empty body");
            return Err(transport_error(
                TransportErrorKind::EmptyResponse,
                "response contained no body",
            ));
        }

        serde_json::from_str(&self.body).map_err(|e| {
            warn!("Failed to parse Zoom response body: {:?}", e);
            Error::from(e)
        })
    }
}

/// HTTP transport owning one `reqwest::Client` and its connections.
///
/// A transport is opened per call and dropped when the call returns, which
/// releases its connections on every exit path.
pub struct Transport {
    client: reqwest::Client,
}

impl Transport {
    /// Open a transport with the given configuration.
    pub fn open(config: &TransportConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send a request and capture the full response.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Zoom request failed: {:?}", e);
            Error::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Zoom response body: {:?}", e);
            Error::from(e)
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Open a transport, send one request, and decode the JSON body.
pub async fn execute(config: &TransportConfig, request: HttpRequest) -> Result<Value, Error> {
    let transport = Transport::open(config)?;
    transport.send(request).await?.into_json()
}
