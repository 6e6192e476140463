//! Zeroizing wrapper for long-lived secret material held in configuration.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wiped from memory on drop and redacted from `Debug` output.
///
/// Used for secrets that outlive any single token refresh, such as the
/// long-lived identity key in [`IssuerConfig`](crate::issuer::IssuerConfig).
/// Serializes transparently as a plain string so configuration files stay
/// unchanged.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the secret for use at a call site that needs it
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is absent
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for SecretString {
    fn from(secret: &str) -> Self {
        Self(secret.to_string())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::new("verySecret");
        assert_eq!(format!("{secret:?}"), "<redacted>");
    }

    #[test]
    fn test_expose_returns_the_secret() {
        let secret = SecretString::new("verySecret");
        assert_eq!(secret.expose(), "verySecret");
        assert!(!secret.is_empty());
        assert!(SecretString::default().is_empty());
    }

    #[test]
    fn test_serde_is_transparent() {
        let secret = SecretString::new("verySecret");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"verySecret\"");

        let restored: SecretString = serde_json::from_str("\"verySecret\"").unwrap();
        assert_eq!(restored, secret);
    }
}
