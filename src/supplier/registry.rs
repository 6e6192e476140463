//! Name → constructor table for credential suppliers.
//!
//! Suppliers are registered at startup and resolved later by a configuration
//! string, preserving late binding without runtime type lookup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{CredentialSupplier, TokenSupplier};
use crate::store::TokenStore;

type SupplierFactory = Arc<dyn Fn(Arc<TokenStore>) -> Arc<dyn CredentialSupplier> + Send + Sync>;

/// Registry resolving supplier names to constructors.
pub struct SupplierRegistry {
    factories: RwLock<HashMap<String, SupplierFactory>>,
}

impl SupplierRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Registry pre-populated with the built-in [`TokenSupplier`]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(TokenSupplier::NAME, |store| {
            Arc::new(TokenSupplier::new(store))
        });
        registry
    }

    /// Register a supplier constructor under `name`, replacing any previous
    /// registration with that name
    pub fn register<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn(Arc<TokenStore>) -> Arc<dyn CredentialSupplier> + Send + Sync + 'static,
    {
        self.factories.write().insert(name.into(), Arc::new(factory));
    }

    /// Instantiate the supplier registered under `name` against `store`
    pub fn resolve(
        &self,
        name: &str,
        store: Arc<TokenStore>,
    ) -> Option<Arc<dyn CredentialSupplier>> {
        let factory = self.factories.read().get(name).cloned();
        factory.map(|f| f(store))
    }

    /// Names currently registered
    pub fn names(&self) -> Vec<String> {
        self.factories.read().keys().cloned().collect()
    }
}

impl Default for SupplierRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
