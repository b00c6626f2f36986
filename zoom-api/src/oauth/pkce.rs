//! Proof Key for Code Exchange (RFC 7636), `S256` method only.
//!
//! The verifier is generated when the login URL is built and must be kept by
//! the caller until the redirect comes back with a code. Zoom checks the
//! verifier sent with the code exchange against the challenge it saw in the
//! authorization URL.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::{configuration_error, ConfigurationErrorKind, Error};

/// Challenge method sent alongside the code challenge.
pub const CHALLENGE_METHOD: &str = "S256";

const MIN_VERIFIER_LEN: usize = 43;
const MAX_VERIFIER_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceVerifier(String);

impl PkceVerifier {
    /// 32 random bytes, base64url encoded: always 43 characters.
    pub fn generate() -> Self {
        let entropy: [u8; 32] = rand::thread_rng().gen();
        Self(URL_SAFE_NO_PAD.encode(entropy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn challenge(&self) -> PkceChallenge {
        PkceChallenge(URL_SAFE_NO_PAD.encode(Sha256::digest(self.0.as_bytes())))
    }
}

/// Parses a verifier the caller kept between the redirect and the exchange.
impl FromStr for PkceVerifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
        if !(MIN_VERIFIER_LEN..=MAX_VERIFIER_LEN).contains(&s.len()) || !s.chars().all(unreserved)
        {
            return Err(configuration_error(
                ConfigurationErrorKind::InvalidCodeVerifier,
                "code verifier must be 43-128 characters of [A-Za-z0-9-._~]",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for PkceVerifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `base64url(SHA256(verifier))` without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge(String);

impl PkceChallenge {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const RFC_VERIFIER: &str = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";

    #[test]
    fn test_generated_verifier_is_valid_and_unique() {
        let first = PkceVerifier::generate();
        let second = PkceVerifier::generate();

        assert_eq!(first.as_str().len(), 43);
        assert_eq!(first.as_str().parse::<PkceVerifier>().unwrap(), first);
        assert_ne!(first, second);
    }

    #[test]
    fn test_challenge_matches_rfc7636_appendix_b() {
        let verifier: PkceVerifier = RFC_VERIFIER.parse().unwrap();
        assert_eq!(
            verifier.challenge().as_str(),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_parse_accepts_length_bounds() {
        assert!("a".repeat(43).parse::<PkceVerifier>().is_ok());
        assert!("~._-".repeat(32).parse::<PkceVerifier>().is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_verifiers() {
        for verifier in [
            "too-short".to_string(),
            "a".repeat(42),
            "a".repeat(129),
            format!("{}+", "a".repeat(43)),
            format!("{} ", "a".repeat(43)),
        ] {
            let err = verifier.parse::<PkceVerifier>().unwrap_err();
            assert_eq!(
                err.error_kind,
                ErrorKind::Configuration(ConfigurationErrorKind::InvalidCodeVerifier),
                "{verifier:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_is_the_verifier() {
        let verifier: PkceVerifier = RFC_VERIFIER.parse().unwrap();
        assert_eq!(verifier.to_string(), RFC_VERIFIER);
    }
}
