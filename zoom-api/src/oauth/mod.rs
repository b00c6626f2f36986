//! OAuth 2.0 authorization code flow against Zoom.
//!
//! Covers the authorization URL, code exchange, refresh, and revocation.
//! Tokens returned by the token endpoint are handed back to the caller and are
//! never stored on the client implicitly.

mod authorize;
mod flow;
mod pkce;
mod state;
mod token;

pub use authorize::authorization_url;
pub use pkce::{PkceChallenge, PkceVerifier};
pub use state::generate_state;
pub use token::{AccessToken, TokenResponse};
