//! # zoom-api
//!
//! Minimal client for Zoom's OAuth and REST APIs:
//! - OAuth authorization URL construction (with optional PKCE)
//! - Authorization code and refresh token exchange, token revocation
//! - Authenticated REST calls (user meetings, webinars, profile)
//!
//! Responses are passed through as `serde_json::Value`. Token persistence,
//! refresh-on-expiry, rate limiting, and pagination are left to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zoom_api::{api::{MeetingType, Page}, ClientConfig, ZoomClient};
//!
//! let mut client = ZoomClient::new(ClientConfig::new(app_id, app_secret, redirect_uri))?;
//! let url = client.login_url(Some(&state))?;
//! // ... user is redirected back with `code` ...
//! let tokens = client.oauth_token(&code).await?;
//! client.set_access_token(tokens);
//! let meetings = client.user_meetings("me", MeetingType::Live, Page::default()).await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use client::ZoomClient;
pub use config::{ClientConfig, ZoomUrls};
pub use error::{Error, ErrorKind};
