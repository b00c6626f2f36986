//! Client configuration and Zoom endpoint URLs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{configuration_error, ConfigurationErrorKind, Error};

/// Base URL of the Zoom REST API.
pub const API_URL: &str = "https://api.zoom.us/v2/";

/// Zoom OAuth authorization endpoint (browser redirect).
pub const OAUTH_AUTHORIZE_URL: &str = "https://zoom.us/oauth/authorize";

/// Zoom OAuth token endpoint.
pub const OAUTH_TOKEN_URL: &str = "https://zoom.us/oauth/token";

/// Zoom OAuth token revocation endpoint.
pub const OAUTH_REVOKE_URL: &str = "https://zoom.us/oauth/revoke";

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(90_000);

/// Default connect timeout for REST API calls.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(20_000);

/// Endpoint URLs used by the client.
///
/// Defaults to Zoom's production endpoints. Override to point the client at
/// another server.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomUrls {
    /// REST API root that endpoint paths are joined onto. A missing trailing
    /// `/` is added at call time.
    pub api_base: String,
    pub authorize_url: String,
    pub token_url: String,
    pub revoke_url: String,
}

impl Default for ZoomUrls {
    fn default() -> Self {
        Self {
            api_base: API_URL.to_string(),
            authorize_url: OAUTH_AUTHORIZE_URL.to_string(),
            token_url: OAUTH_TOKEN_URL.to_string(),
            revoke_url: OAUTH_REVOKE_URL.to_string(),
        }
    }
}

impl ZoomUrls {
    /// Point every endpoint at a single server, keeping Zoom's path layout.
    ///
    /// `server_url` is a scheme + host (+ port), e.g. `http://127.0.0.1:1234`.
    pub fn for_server(server_url: &str) -> Self {
        let server_url = server_url.trim_end_matches('/');
        Self {
            api_base: format!("{}/v2/", server_url),
            authorize_url: format!("{}/oauth/authorize", server_url),
            token_url: format!("{}/oauth/token", server_url),
            revoke_url: format!("{}/oauth/revoke", server_url),
        }
    }
}

/// OAuth app credentials and transport settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth client ID.
    pub app_id: String,
    /// OAuth client secret.
    pub app_secret: SecretString,
    /// Redirect URI registered with the Zoom app.
    pub redirect_uri: String,
    /// Overall request timeout.
    pub timeout: Duration,
    /// Connect timeout, applied to REST API calls only.
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
    /// Endpoint URLs.
    pub urls: ZoomUrls,
}

impl ClientConfig {
    /// Create a configuration with default timeouts and Zoom's endpoints.
    pub fn new(app_id: &str, app_secret: &str, redirect_uri: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            app_secret: SecretString::new(app_secret.to_string()),
            redirect_uri: redirect_uri.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            accept_invalid_certs: false,
            urls: ZoomUrls::default(),
        }
    }

    /// Set the overall request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Disable TLS certificate verification.
    pub fn with_accept_invalid_certs(mut self, accept_invalid_certs: bool) -> Self {
        self.accept_invalid_certs = accept_invalid_certs;
        self
    }

    /// Set the endpoint URLs.
    pub fn with_urls(mut self, urls: ZoomUrls) -> Self {
        self.urls = urls;
        self
    }

    /// Check that the required credentials are present.
    pub fn validate(&self) -> Result<(), Error> {
        if self.app_id.trim().is_empty() {
            return Err(configuration_error(
                ConfigurationErrorKind::MissingAppId,
                "appId is required",
            ));
        }
        if self.app_secret.expose_secret().trim().is_empty() {
            return Err(configuration_error(
                ConfigurationErrorKind::MissingAppSecret,
                "appSecret is required",
            ));
        }
        if self.redirect_uri.trim().is_empty() {
            return Err(configuration_error(
                ConfigurationErrorKind::MissingRedirectUri,
                "redirectUri is required",
            ));
        }
        Ok(())
    }
}
