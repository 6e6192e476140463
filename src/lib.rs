//! Short-lived security token plumbing for object-storage backends.
//!
//! This crate keeps an object-storage client supplied with temporary, scoped
//! credentials without ever embedding long-lived secrets in the request path.
//!
//! # Components
//!
//! - **[`TokenIssuer`]** - exchanges a long-lived identity for a time-bounded
//!   credential set at an STS-style trust service; stateless request/response
//! - **[`TokenStore`]** - single atomic holder of the current credential
//!   snapshot for one backend scheme; one logical writer, many lock-free readers
//! - **[`TokenSupplier`]** - the synchronous pull adapter the storage SDK calls
//!   at request-signing time; never performs I/O, fails fast before the first
//!   publish
//!
//! A refresh driver (owned by the embedding application) periodically obtains
//! a fresh token and pushes it into the store. Storage threads read the latest
//! snapshot inline with their I/O and never wait on a refresh in flight.
//!
//! # Example
//!
//! ```no_run
//! use objstore_token::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let issuer = TokenIssuer::new(IssuerConfig {
//!     secret_id: std::env::var("STORAGE_SECRET_ID")?,
//!     secret_key: std::env::var("STORAGE_SECRET_KEY")?.into(),
//!     role_arn: "qcs::cam::uin/100000:roleName/ingest".into(),
//!     sts_region: "ap-guangzhou".into(),
//!     region: "ap-guangzhou".into(),
//!     ..Default::default()
//! })?;
//!
//! let backend = Arc::new(BackendConfig::new());
//! let store = Arc::new(TokenStore::new("mybackend", backend));
//!
//! // Refresh driver, out of band from request traffic.
//! let token = issuer.obtain("mybackend").await?;
//! store.publish(&token)?;
//!
//! // Storage SDK side, synchronous hot path.
//! let supplier = TokenSupplier::new(Arc::clone(&store));
//! let credentials = supplier.get_credentials()?;
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![forbid(unsafe_code)]

/// Core types and the error taxonomy
pub mod core;
/// Token issuance against the trust service
pub mod issuer;
/// Process-wide snapshot store and shared backend configuration
pub mod store;
/// Pull-based credential supply for the storage SDK
pub mod supplier;

// ── Root re-exports ─────────────────────────────────────────────────────────

pub use crate::core::{
    ConfigError, Credentials, IssuerError, ObtainedToken, SecretString, StoreError, keys,
};
pub use crate::issuer::{IssuerConfig, TokenIssuer};
pub use crate::store::{BackendConfig, TokenSnapshot, TokenStore};
pub use crate::supplier::{CredentialSupplier, SupplierRegistry, TokenSupplier};

/// Commonly used types and traits
pub mod prelude {
    pub use crate::core::{
        ConfigError, Credentials, IssuerError, ObtainedToken, SecretString, StoreError, keys,
    };
    pub use crate::issuer::{IssuerConfig, TokenIssuer};
    pub use crate::store::{BackendConfig, TokenSnapshot, TokenStore};
    pub use crate::supplier::{CredentialSupplier, SupplierRegistry, TokenSupplier};
}
