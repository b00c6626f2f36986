//! Token exchange, refresh, and revocation against Zoom's OAuth endpoints.

use log::*;
use serde_json::Value;

use super::{PkceVerifier, TokenResponse};
use crate::client::ZoomClient;
use crate::error::Error;

impl ZoomClient {
    /// Exchange an authorization code from the redirect callback for tokens.
    ///
    /// The returned tokens are not stored on the client; call
    /// [`ZoomClient::set_access_token`] to use them for API calls.
    pub async fn oauth_token(&self, code: &str) -> Result<TokenResponse, Error> {
        self.exchange_code(code, None).await
    }

    /// Exchange an authorization code obtained with a PKCE challenge.
    pub async fn oauth_token_with_pkce(
        &self,
        code: &str,
        verifier: &PkceVerifier,
    ) -> Result<TokenResponse, Error> {
        self.exchange_code(code, Some(verifier)).await
    }

    async fn exchange_code(
        &self,
        code: &str,
        verifier: Option<&PkceVerifier>,
    ) -> Result<TokenResponse, Error> {
        let mut params = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            (
                "redirect_uri".to_string(),
                self.require_redirect_uri()?.to_string(),
            ),
            ("code".to_string(), code.to_string()),
        ];
        if let Some(verifier) = verifier {
            params.push(("code_verifier".to_string(), verifier.as_str().to_string()));
        }

        debug!("Exchanging Zoom OAuth code for tokens");
        let token_url = self.urls().token_url.clone();
        let tokens = parse_tokens(self.oauth_post(&token_url, params).await?)?;
        info!("Successfully exchanged Zoom OAuth code for tokens");
        Ok(tokens)
    }

    /// Obtain a new access token with a refresh token.
    ///
    /// Zoom rotates refresh tokens: the response carries a new one and the old
    /// one stops working.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let params = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];

        debug!("Refreshing Zoom access token");
        let token_url = self.urls().token_url.clone();
        let tokens = parse_tokens(self.oauth_post(&token_url, params).await?)?;
        info!("Successfully refreshed Zoom access token");
        Ok(tokens)
    }

    /// Revoke an access or refresh token.
    ///
    /// Returns Zoom's response verbatim (`{"status":"success"}` on success).
    pub async fn revoke_token(&self, token: &str) -> Result<Value, Error> {
        let params = vec![("token".to_string(), token.to_string())];

        debug!("Revoking Zoom token");
        let revoke_url = self.urls().revoke_url.clone();
        self.oauth_post(&revoke_url, params).await
    }
}

fn parse_tokens(value: Value) -> Result<TokenResponse, Error> {
    TokenResponse::from_value(value).map_err(|e| {
        warn!("Failed to parse Zoom token response: {:?}", e);
        Error::from(e)
    })
}
