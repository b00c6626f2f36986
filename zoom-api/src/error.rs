//! Error types for the `zoom-api` crate.
//!
//! A root `Error` struct holds the error kind and an optional source for error chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for zoom-api crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in zoom-api.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    /// Missing or invalid construction input.
    Configuration(ConfigurationErrorKind),
    /// An authenticated call was attempted with no access token set.
    /// Holds the endpoint that was being called.
    AuthenticationRequired(String),
    /// The request never produced a usable response.
    Transport(TransportErrorKind),
    /// The response body is not valid JSON.
    Decode,
    /// The server answered with a non-success status code.
    HttpStatus(u16),
}

/// Errors from client configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigurationErrorKind {
    MissingAppId,
    MissingAppSecret,
    MissingRedirectUri,
    InvalidUrl,
    /// Empty or a dot segment; it would not name a `users/{userId}` resource.
    InvalidUserId,
    /// Not 43-128 characters from the RFC 7636 unreserved set.
    InvalidCodeVerifier,
}

/// Errors from the HTTP transport.
#[derive(Debug, PartialEq)]
pub enum TransportErrorKind {
    Builder,
    Connect,
    Timeout,
    Request,
    EmptyResponse,
}

impl Error {
    /// Returns true if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.error_kind, ErrorKind::Configuration(_))
    }

    /// Returns true if this is a transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self.error_kind, ErrorKind::Transport(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Configuration(kind) => write!(f, "Configuration error: {:?}", kind)?,
            ErrorKind::AuthenticationRequired(endpoint) => write!(
                f,
                "Authentication required: {} needs an access token",
                endpoint
            )?,
            ErrorKind::Transport(kind) => write!(f, "Transport error: {:?}", kind)?,
            ErrorKind::Decode => write!(f, "Decode error: response body is not valid JSON")?,
            ErrorKind::HttpStatus(status) => write!(f, "HTTP error: status {}", status)?,
        }

        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_builder() {
            TransportErrorKind::Builder
        } else if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Request
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Transport(kind),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Decode,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Configuration(ConfigurationErrorKind::InvalidUrl),
        }
    }
}

/// Helper function to create configuration errors.
pub fn configuration_error(kind: ConfigurationErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Configuration(kind),
    }
}

/// Helper function to create the error raised when no access token is set.
pub fn authentication_required(endpoint: &str) -> Error {
    Error {
        source: None,
        error_kind: ErrorKind::AuthenticationRequired(endpoint.to_string()),
    }
}

/// Helper function to create transport errors.
pub fn transport_error(kind: TransportErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Transport(kind),
    }
}

/// Helper function to create errors for non-success HTTP statuses.
///
/// The response body is kept as the error source so callers can read Zoom's
/// own error payload.
pub fn status_error(status: u16, body: &str) -> Error {
    Error {
        source: Some(body.to_string().into()),
        error_kind: ErrorKind::HttpStatus(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source_message() {
        let err = configuration_error(ConfigurationErrorKind::MissingAppId, "appId is required");
        assert_eq!(
            err.to_string(),
            "Configuration error: MissingAppId (appId is required)"
        );
    }

    #[test]
    fn test_authentication_required_names_endpoint() {
        let err = authentication_required("users/u1/meetings");
        assert_eq!(
            err.error_kind,
            ErrorKind::AuthenticationRequired("users/u1/meetings".to_string())
        );
        assert!(err.to_string().contains("users/u1/meetings"));
    }

    #[test]
    fn test_decode_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.error_kind, ErrorKind::Decode);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_url_parse_error_is_configuration() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = status_error(401, r#"{"reason":"Invalid access token."}"#);
        assert_eq!(err.error_kind, ErrorKind::HttpStatus(401));
        assert!(err.to_string().contains("Invalid access token."));
    }
}
