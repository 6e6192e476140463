//! Shared backend configuration consulted by the storage client at
//! request-signing time.
//!
//! Single-writer/many-reader: the refresh path folds token attributes in,
//! storage threads read. Updates swap a copy-on-write map so readers never
//! observe a partially-applied fold.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::core::keys;

/// Copy-on-write string→string configuration map.
pub struct BackendConfig {
    entries: ArcSwap<HashMap<String, String>>,
}

impl BackendConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Look up a single entry
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.load().get(key).cloned()
    }

    /// Cheap consistent view of all entries
    pub fn snapshot(&self) -> Arc<HashMap<String, String>> {
        self.entries.load_full()
    }

    /// Set a single entry
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(key.clone(), value.clone());
            next
        });
    }

    /// Fold `attributes` into the configuration in one atomic swap
    pub fn fold(&self, attributes: &HashMap<String, String>) {
        if attributes.is_empty() {
            return;
        }
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            for (key, value) in attributes {
                next.insert(key.clone(), value.clone());
            }
            next
        });
    }

    /// Prepend `name` to the credential-supplier list if it is not already
    /// present, leaving any previously configured suppliers behind it.
    pub fn ensure_supplier(&self, name: &str) {
        self.entries.rcu(|current| {
            let mut next = HashMap::clone(current);
            match next.get(keys::CREDENTIALS_SUPPLIER) {
                Some(existing) if existing.split(',').any(|s| s == name) => {
                    tracing::debug!(supplier = name, "Credential supplier already configured");
                }
                Some(existing) if !existing.is_empty() => {
                    let combined = format!("{name},{existing}");
                    tracing::debug!(suppliers = %combined, "Prepending credential supplier");
                    next.insert(keys::CREDENTIALS_SUPPLIER.to_string(), combined);
                }
                _ => {
                    next.insert(keys::CREDENTIALS_SUPPLIER.to_string(), name.to_string());
                }
            }
            next
        });
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new()
    }
}
