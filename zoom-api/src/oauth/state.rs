//! CSRF state values for the authorization redirect.
//!
//! The host application stores the value in its session and compares it with
//! the `state` query parameter Zoom sends back to the redirect URI.

use rand::Rng;

/// Generate a cryptographically random state token (32 bytes, hex encoded).
pub fn generate_state() -> String {
    let random_bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_state() {
        let state = generate_state();
        assert_eq!(state.len(), 64);
        assert!(state.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_state_is_random() {
        assert_ne!(generate_state(), generate_state());
    }
}
