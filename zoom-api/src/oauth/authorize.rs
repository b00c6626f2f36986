//! Authorization URL construction.

use super::pkce::{PkceChallenge, CHALLENGE_METHOD};

/// Build the URL the user's browser is redirected to for consent.
///
/// `state` is appended only when it is non-empty.
pub fn authorization_url(
    authorize_url: &str,
    client_id: &str,
    redirect_uri: &str,
    state: Option<&str>,
    pkce_challenge: Option<&PkceChallenge>,
) -> String {
    let mut url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code",
        authorize_url,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
    );

    if let Some(state) = state.filter(|s| !s.is_empty()) {
        url.push_str("&state=");
        url.push_str(&urlencoding::encode(state));
    }

    if let Some(challenge) = pkce_challenge {
        url.push_str("&code_challenge=");
        url.push_str(challenge.as_str());
        url.push_str("&code_challenge_method=");
        url.push_str(CHALLENGE_METHOD);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OAUTH_AUTHORIZE_URL;
    use crate::oauth::PkceVerifier;

    #[test]
    fn test_authorization_url_without_state() {
        let url = authorization_url(OAUTH_AUTHORIZE_URL, "abc", "https://x.test/cb", None, None);
        assert_eq!(
            url,
            "https://zoom.us/oauth/authorize?client_id=abc&redirect_uri=https%3A%2F%2Fx.test%2Fcb&response_type=code"
        );
    }

    #[test]
    fn test_authorization_url_with_state() {
        let url = authorization_url(
            OAUTH_AUTHORIZE_URL,
            "abc",
            "https://x.test/cb",
            Some("xyz"),
            None,
        );
        assert!(url.ends_with("&response_type=code&state=xyz"));
    }

    #[test]
    fn test_authorization_url_ignores_empty_state() {
        let url = authorization_url(OAUTH_AUTHORIZE_URL, "abc", "https://x.test/cb", Some(""), None);
        assert!(!url.contains("state="));
    }

    #[test]
    fn test_authorization_url_with_pkce() {
        let verifier: PkceVerifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk".parse().unwrap();
        let url = authorization_url(
            OAUTH_AUTHORIZE_URL,
            "abc",
            "https://x.test/cb",
            Some("xyz"),
            Some(&verifier.challenge()),
        );
        assert!(url.ends_with(
            "&state=xyz&code_challenge=E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM&code_challenge_method=S256"
        ));
    }
}
