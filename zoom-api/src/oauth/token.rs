//! OAuth token types.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Token response from Zoom's OAuth token endpoint.
///
/// Fields Zoom adds beyond the standard ones are kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Refresh token for obtaining new access tokens. Zoom rotates it on every refresh.
    #[serde(default)]
    pub refresh_token: Option<SecretString>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Token type (usually "bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
    /// Any other fields returned by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// When this response was parsed.
    #[serde(skip, default = "Utc::now")]
    pub received_at: DateTime<Utc>,
}

impl TokenResponse {
    /// Parse a token response from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// When the access token expires, if the server said.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|seconds| self.received_at + Duration::seconds(seconds))
    }

    /// Check if the access token is expired or about to expire soon.
    ///
    /// Returns true if token is expired or will expire within 5 minutes.
    pub fn is_expired(&self) -> bool {
        self.expires_at()
            .map(|expires| expires <= Utc::now() + Duration::minutes(5))
            .unwrap_or(false)
    }

    /// Granted scopes as a list.
    pub fn scopes(&self) -> Vec<String> {
        self.scope
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// The access token used for authenticated calls.
#[derive(Debug, Clone)]
pub enum AccessToken {
    /// A raw token string injected for read-only use.
    Raw(SecretString),
    /// A token response obtained from an exchange or refresh.
    Issued(TokenResponse),
}

impl AccessToken {
    /// The bearer value sent with authenticated calls.
    pub fn secret(&self) -> &str {
        match self {
            AccessToken::Raw(token) => token.expose_secret(),
            AccessToken::Issued(tokens) => tokens.access_token.expose_secret(),
        }
    }

    /// The full token response, if this token came from an exchange.
    pub fn token_response(&self) -> Option<&TokenResponse> {
        match self {
            AccessToken::Raw(_) => None,
            AccessToken::Issued(tokens) => Some(tokens),
        }
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken::Raw(SecretString::new(token))
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        AccessToken::Raw(SecretString::new(token.to_string()))
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(tokens: TokenResponse) -> Self {
        AccessToken::Issued(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_response(expires_in: Option<i64>) -> TokenResponse {
        TokenResponse::from_value(json!({
            "access_token": "access",
            "refresh_token": "refresh",
            "expires_in": expires_in,
            "token_type": "bearer",
            "scope": "meeting:read user:read",
            "api_url": "https://api.zoom.us"
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_token_response() {
        let tokens = token_response(Some(3599));
        assert_eq!(tokens.access_token.expose_secret(), "access");
        assert_eq!(
            tokens.refresh_token.as_ref().unwrap().expose_secret(),
            "refresh"
        );
        assert_eq!(tokens.expires_in, Some(3599));
        assert_eq!(tokens.token_type.as_deref(), Some("bearer"));
        assert_eq!(tokens.extra.get("api_url"), Some(&json!("https://api.zoom.us")));
    }

    #[test]
    fn test_parse_requires_access_token() {
        let result = TokenResponse::from_value(json!({"reason": "Invalid authorization code"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let tokens = token_response(Some(3599));
        let debug = format!("{:?}", tokens);
        assert!(!debug.contains("\"access\""));
        assert!(!debug.contains("\"refresh\""));
    }

    #[test]
    fn test_token_not_expired() {
        let tokens = token_response(Some(3600));
        assert!(!tokens.is_expired());
    }

    #[test]
    fn test_token_expired() {
        let mut tokens = token_response(Some(3600));
        tokens.received_at = Utc::now() - Duration::hours(2);
        assert!(tokens.is_expired());
    }

    #[test]
    fn test_token_expiring_soon() {
        let tokens = token_response(Some(180));
        assert!(tokens.is_expired());
    }

    #[test]
    fn test_token_without_expiry_never_expires() {
        let tokens = token_response(None);
        assert!(tokens.expires_at().is_none());
        assert!(!tokens.is_expired());
    }

    #[test]
    fn test_scopes_split_on_whitespace() {
        let tokens = token_response(Some(3600));
        assert_eq!(tokens.scopes(), vec!["meeting:read", "user:read"]);
    }

    #[test]
    fn test_access_token_secret() {
        let raw = AccessToken::from("raw-token");
        assert_eq!(raw.secret(), "raw-token");
        assert!(raw.token_response().is_none());

        let issued = AccessToken::from(token_response(Some(3600)));
        assert_eq!(issued.secret(), "access");
        assert!(issued.token_response().is_some());
    }
}
