//! The Zoom client: credentials, access token, and the two call paths.
//!
//! A `ZoomClient` is owned by one logical session. Setters take `&mut self`, so
//! sharing a client between tasks needs the caller's own synchronization for
//! writes; concurrent reads are safe once configuration is settled.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use log::*;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, ZoomUrls, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use crate::error::{authentication_required, configuration_error, ConfigurationErrorKind, Error};
use crate::http::{self, HttpRequest, TransportConfig};
use crate::oauth::{authorization_url, AccessToken, PkceChallenge};

/// Client for Zoom's OAuth and REST APIs.
///
/// Built either from app credentials ([`ZoomClient::new`]) or from a bare
/// access token for read-only use ([`ZoomClient::with_access_token`]).
#[derive(Debug, Clone)]
pub struct ZoomClient {
    app_id: Option<String>,
    app_secret: Option<SecretString>,
    redirect_uri: Option<String>,
    access_token: Option<AccessToken>,
    timeout: Duration,
    connect_timeout: Duration,
    accept_invalid_certs: bool,
    urls: ZoomUrls,
}

impl ZoomClient {
    /// Create a client from OAuth app credentials.
    ///
    /// Fails with a configuration error if any of the app id, secret, or
    /// redirect URI is empty. The client starts without an access token.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            app_id: Some(config.app_id),
            app_secret: Some(config.app_secret),
            redirect_uri: Some(config.redirect_uri),
            access_token: None,
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            accept_invalid_certs: config.accept_invalid_certs,
            urls: config.urls,
        })
    }

    /// Create a read-only client around an existing access token.
    ///
    /// Operations that need app credentials fail on this client until they
    /// are set explicitly.
    pub fn with_access_token(token: impl Into<AccessToken>) -> Self {
        Self {
            app_id: None,
            app_secret: None,
            redirect_uri: None,
            access_token: Some(token.into()),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            accept_invalid_certs: false,
            urls: ZoomUrls::default(),
        }
    }

    /// Replace the endpoint URLs.
    pub fn with_urls(mut self, urls: ZoomUrls) -> Self {
        self.urls = urls;
        self
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Set the token used by authenticated calls.
    ///
    /// Token exchange never calls this; pass the result of
    /// [`ZoomClient::oauth_token`] here to use it.
    pub fn set_access_token(&mut self, token: impl Into<AccessToken>) {
        self.access_token = Some(token.into());
    }

    /// Forget the current access token.
    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    pub fn set_app_id(&mut self, app_id: &str) {
        self.app_id = Some(app_id.to_string());
    }

    pub fn app_secret(&self) -> Option<&SecretString> {
        self.app_secret.as_ref()
    }

    pub fn set_app_secret(&mut self, app_secret: &str) {
        self.app_secret = Some(SecretString::new(app_secret.to_string()));
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: &str) {
        self.redirect_uri = Some(redirect_uri.to_string());
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn set_connect_timeout(&mut self, connect_timeout: Duration) {
        self.connect_timeout = connect_timeout;
    }

    /// Disable (or re-enable) TLS certificate verification.
    pub fn set_accept_invalid_certs(&mut self, accept_invalid_certs: bool) {
        self.accept_invalid_certs = accept_invalid_certs;
    }

    pub fn urls(&self) -> &ZoomUrls {
        &self.urls
    }

    /// Build the OAuth authorization URL to redirect the user to.
    ///
    /// `state` is appended when it is non-empty. No network call is made.
    pub fn login_url(&self, state: Option<&str>) -> Result<String, Error> {
        self.build_login_url(state, None)
    }

    /// Build the OAuth authorization URL with a PKCE code challenge.
    pub fn login_url_with_pkce(
        &self,
        state: Option<&str>,
        challenge: &PkceChallenge,
    ) -> Result<String, Error> {
        self.build_login_url(state, Some(challenge))
    }

    fn build_login_url(
        &self,
        state: Option<&str>,
        challenge: Option<&PkceChallenge>,
    ) -> Result<String, Error> {
        Ok(authorization_url(
            &self.urls.authorize_url,
            self.require_app_id()?,
            self.require_redirect_uri()?,
            state,
            challenge,
        ))
    }

    pub(crate) fn require_app_id(&self) -> Result<&str, Error> {
        self.app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                configuration_error(ConfigurationErrorKind::MissingAppId, "appId is not set")
            })
    }

    pub(crate) fn require_redirect_uri(&self) -> Result<&str, Error> {
        self.redirect_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                configuration_error(
                    ConfigurationErrorKind::MissingRedirectUri,
                    "redirectUri is not set",
                )
            })
    }

    /// `Basic base64(app_id:app_secret)` for the token endpoints.
    pub(crate) fn basic_authorization(&self) -> Result<String, Error> {
        let app_id = self.require_app_id()?;
        let app_secret = self
            .app_secret
            .as_ref()
            .map(|secret| secret.expose_secret())
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                configuration_error(
                    ConfigurationErrorKind::MissingAppSecret,
                    "appSecret is not set",
                )
            })?;

        Ok(format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", app_id, app_secret))
        ))
    }

    /// Transport settings for OAuth calls: overall timeout only.
    fn oauth_transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            connect_timeout: None,
            accept_invalid_certs: self.accept_invalid_certs,
            ..TransportConfig::default()
        }
    }

    /// Transport settings for REST API calls: connect and overall timeouts.
    fn api_transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            connect_timeout: Some(self.connect_timeout),
            accept_invalid_certs: self.accept_invalid_certs,
            ..TransportConfig::default()
        }
    }

    /// Issue an authenticated GET against the REST API.
    ///
    /// `endpoint` is relative to the API base (e.g. `users/me`). Parameters
    /// are sent as a query string in the given order. Fails without touching
    /// the network when no access token is set.
    pub async fn get(&self, endpoint: &str, params: Vec<(String, String)>) -> Result<Value, Error> {
        let token = self.access_token.as_ref().ok_or_else(|| {
            warn!("No access token set for call to {}", endpoint);
            authentication_required(endpoint)
        })?;

        let url = api_base_url(&self.urls.api_base)?.join(endpoint.trim_start_matches('/'))?;
        let request = HttpRequest::new(Method::GET, url)
            .with_authorization(&format!("Bearer {}", token.secret()))?
            .with_query(params);

        http::execute(&self.api_transport(), request).await
    }

    /// POST a form to one of the OAuth endpoints with Basic authorization.
    pub(crate) async fn oauth_post(
        &self,
        endpoint_url: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, Error> {
        let authorization = self.basic_authorization()?;
        let url = Url::parse(endpoint_url)?;
        let request = HttpRequest::new(Method::POST, url)
            .with_authorization(&authorization)?
            .with_form(params);

        http::execute(&self.oauth_transport(), request).await
    }
}

/// Parse the API base as a directory, so joining keeps its last segment
/// (`https://api.zoom.us/v2` and `https://api.zoom.us/v2/` behave the same).
fn api_base_url(api_base: &str) -> Result<Url, Error> {
    let mut url = Url::parse(api_base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
