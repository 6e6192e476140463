//! Pull-based credential supply for the storage SDK.
//!
//! The storage client calls [`CredentialSupplier::get_credentials`]
//! synchronously on every signed request, so implementations must not perform
//! I/O or block. [`TokenSupplier`] is the dynamic implementation backed by a
//! [`TokenStore`]; suppliers are resolved by configuration string through
//! [`SupplierRegistry`].

mod registry;

use std::sync::Arc;

pub use registry::SupplierRegistry;

use crate::core::{Credentials, StoreError};
use crate::store::TokenStore;

/// The capability contract the storage SDK invokes at request-signing time.
pub trait CredentialSupplier: Send + Sync {
    /// Current credentials, or a typed not-ready error before the first
    /// publish — never a null credential silently used to sign a request.
    fn get_credentials(&self) -> Result<Credentials, StoreError>;

    /// Refresh hook required by the SDK's capability contract.
    ///
    /// Refresh timing is owned by the external refresh driver, not by the
    /// supplier; implementations backed by a store leave this a no-op.
    fn refresh(&self);
}

/// Supplies the session credentials most recently pushed into a
/// [`TokenStore`].
pub struct TokenSupplier {
    store: Arc<TokenStore>,
}

impl TokenSupplier {
    /// Stable name under which this supplier is registered and resolved
    pub const NAME: &'static str = "dynamic-session-token";

    /// Create a supplier reading from `store`
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }
}

impl CredentialSupplier for TokenSupplier {
    fn get_credentials(&self) -> Result<Credentials, StoreError> {
        let credentials = self.store.credentials()?;
        tracing::debug!(scheme = %self.store.scheme(), "Providing session credentials");
        Ok(credentials)
    }

    fn refresh(&self) {
        // Tokens are refreshed out of band and pushed into the store; the
        // SDK-facing hook has nothing to do.
    }
}
