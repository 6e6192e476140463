//! Process-wide holder of the current credential snapshot for one backend
//! scheme.
//!
//! One logical writer (the refresh driver) swaps complete snapshots in;
//! arbitrarily many storage threads read without blocking. A snapshot is
//! immutable once published — the next refresh supersedes it and the old one
//! is dropped when the last consumer releases its reference.
//!
//! The store is an explicit, injectable instance owned by the composing
//! application. One process can hold an independent store per backend scheme.

mod backend;

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

pub use backend::BackendConfig;

use crate::core::{Credentials, ObtainedToken, StoreError};

/// The complete state published by one refresh cycle.
///
/// Readers always see credentials and attributes from the same refresh —
/// never a blend of two cycles.
#[derive(Debug)]
pub struct TokenSnapshot {
    credentials: Credentials,
    attributes: HashMap<String, String>,
    expiration_epoch_millis: i64,
}

impl TokenSnapshot {
    /// Credentials of this refresh cycle
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Attribute map of this refresh cycle
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Expiration of this refresh cycle, epoch milliseconds
    pub fn expiration_epoch_millis(&self) -> i64 {
        self.expiration_epoch_millis
    }
}

/// Atomic holder of the latest [`TokenSnapshot`] for one scheme.
pub struct TokenStore {
    scheme: String,
    snapshot: ArcSwapOption<TokenSnapshot>,
    backend: Arc<BackendConfig>,
}

impl TokenStore {
    /// Create an empty store for `scheme`, attached to the backend
    /// configuration the storage client reads at signing time.
    pub fn new(scheme: impl Into<String>, backend: Arc<BackendConfig>) -> Self {
        Self {
            scheme: scheme.into(),
            snapshot: ArcSwapOption::const_empty(),
            backend,
        }
    }

    /// Scheme this store serves
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Backend configuration this store folds attributes into
    pub fn backend(&self) -> &Arc<BackendConfig> {
        &self.backend
    }

    /// Atomically replace the current snapshot with `token`.
    ///
    /// Folds the token's attributes into the backend configuration before the
    /// swap, so a reader that observes the new snapshot also observes its
    /// attributes. Concurrent publishes settle on one call's complete value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPayload`] when the credential payload does
    /// not decode; the previous snapshot stays in place.
    pub fn publish(&self, token: &ObtainedToken) -> Result<(), StoreError> {
        if token.scheme() != self.scheme {
            tracing::warn!(
                store_scheme = %self.scheme,
                token_scheme = %token.scheme(),
                "Publishing a token obtained for a different scheme"
            );
        }

        let credentials = token
            .credentials()
            .map_err(|source| StoreError::InvalidPayload {
                scheme: self.scheme.clone(),
                source,
            })?;

        self.backend.fold(token.addition());
        self.snapshot.store(Some(Arc::new(TokenSnapshot {
            credentials,
            attributes: token.addition().clone(),
            expiration_epoch_millis: token.expiration_epoch_millis(),
        })));

        tracing::info!(
            scheme = %self.scheme,
            expiration_epoch_millis = token.expiration_epoch_millis(),
            "Published new session credentials"
        );
        Ok(())
    }

    /// Latest snapshot; lock-free, no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotReady`] until the first successful
    /// [`publish`](Self::publish).
    pub fn read(&self) -> Result<Arc<TokenSnapshot>, StoreError> {
        self.snapshot.load_full().ok_or_else(|| StoreError::NotReady {
            scheme: self.scheme.clone(),
        })
    }

    /// Latest credentials, cloned out of the current snapshot
    pub fn credentials(&self) -> Result<Credentials, StoreError> {
        Ok(self.read()?.credentials().clone())
    }

    /// Register `supplier_name` with the backend configuration and replay the
    /// current token's attributes into it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotReady`] when no token has ever been published;
    /// wiring a supplier before any refresh would leave the client signing
    /// with nothing.
    pub fn configure_backend(&self, supplier_name: &str) -> Result<(), StoreError> {
        self.backend.ensure_supplier(supplier_name);
        let snapshot = self.read()?;
        self.backend.fold(snapshot.attributes());
        tracing::info!(scheme = %self.scheme, supplier = supplier_name, "Configured backend");
        Ok(())
    }
}
