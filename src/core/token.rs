//! Obtained security token: serialized credentials plus scheme, expiration,
//! and the attribute map folded into the backend configuration at publish time.

use std::collections::HashMap;

use super::Credentials;

/// Attribute keys understood by the shared backend configuration.
pub mod keys {
    /// Region of the target storage backend
    pub const BACKEND_REGION: &str = "fs.region";

    /// Comma-separated list of credential supplier names the storage client
    /// consults at request-signing time
    pub const CREDENTIALS_SUPPLIER: &str = "fs.credentials.supplier";
}

/// A security token obtained from the trust service for one backend scheme.
///
/// Carries the credential payload in its serialized transport form, the
/// absolute expiration instant, and additional attributes (e.g. the backend
/// region) that must reach the storage client's runtime configuration.
#[derive(Clone)]
pub struct ObtainedToken {
    scheme: String,
    token: Vec<u8>,
    expiration_epoch_millis: i64,
    addition: HashMap<String, String>,
}

impl ObtainedToken {
    /// Create a token for `scheme` wrapping an encoded [`Credentials`] payload
    pub fn new(
        scheme: impl Into<String>,
        token: Vec<u8>,
        expiration_epoch_millis: i64,
        addition: HashMap<String, String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            token,
            expiration_epoch_millis,
            addition,
        }
    }

    /// Backend scheme this token was obtained for
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Serialized credential payload
    pub fn payload(&self) -> &[u8] {
        &self.token
    }

    /// Absolute expiration instant, epoch milliseconds
    pub fn expiration_epoch_millis(&self) -> i64 {
        self.expiration_epoch_millis
    }

    /// Additional attributes destined for the backend configuration
    pub fn addition(&self) -> &HashMap<String, String> {
        &self.addition
    }

    /// Decode the credential payload
    pub fn credentials(&self) -> Result<Credentials, serde_json::Error> {
        Credentials::from_json(&self.token)
    }
}

impl std::fmt::Debug for ObtainedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The payload holds secret material; show only its size.
        f.debug_struct("ObtainedToken")
            .field("scheme", &self.scheme)
            .field("payload_len", &self.token.len())
            .field("expiration_epoch_millis", &self.expiration_epoch_millis)
            .field("addition", &self.addition)
            .finish()
    }
}
