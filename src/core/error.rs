//! Error taxonomy for token issuance, storage, and supply.
//!
//! Three families, matching who reacts to them: `ConfigError` is fatal at
//! construction and never retried; `IssuerError` goes to the refresh driver,
//! which owns retry/backoff policy; `StoreError` reaches the storage SDK so a
//! read before the first publish surfaces as an explicit "not ready" signal
//! instead of an unsigned request.

use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration
    #[error("Missing required configuration: {field}")]
    MissingRequired { field: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors from the token-exchange round trip.
///
/// The issuer performs no internal retry; every variant propagates to the
/// refresh driver with the underlying cause attached.
#[derive(Debug, Error)]
pub enum IssuerError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Token exchange transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The trust service answered with a non-success status
    #[error("Token exchange rejected with status {status}: {message}")]
    Service { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Malformed token exchange response: {reason}")]
    MalformedResponse { reason: String },

    /// The expiration timestamp could not be parsed as RFC 3339
    #[error("Invalid expiration timestamp {value:?}")]
    InvalidExpiration {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Errors from the snapshot store and its consumers
#[derive(Debug, Error)]
pub enum StoreError {
    /// No token has ever been published for this scheme
    #[error("Credentials for scheme {scheme:?} are not ready; no token has been published yet")]
    NotReady { scheme: String },

    /// A published token carried an undecodable credential payload
    #[error("Credential payload for scheme {scheme:?} is not decodable")]
    InvalidPayload {
        scheme: String,
        #[source]
        source: serde_json::Error,
    },
}
