//! Namespace registry: which strategy drives which namespace root.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::resolver::error::{ResolveError, Result};
use crate::resolver::strategy::Strategy;

lazy_static! {
    static ref GLOBAL_REGISTRY: Arc<NamespaceRegistry> = Arc::new(NamespaceRegistry::new());
}

/// Bindings from namespace root name to strategy.
///
/// One strategy per root. Registering a root again replaces the previous
/// binding; nodes look their strategy up on every resolution, so existing
/// trees pick up the replacement for names they have not resolved yet.
pub struct NamespaceRegistry {
    bindings: RwLock<HashMap<String, Arc<dyn Strategy>>>,
}

impl NamespaceRegistry {
    /// Create an empty registry, independent of the global one.
    pub fn new() -> Self {
        NamespaceRegistry {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry. Created on first use and never torn down.
    pub fn global() -> Arc<NamespaceRegistry> {
        GLOBAL_REGISTRY.clone()
    }

    /// Bind `root` to `strategy`, replacing any earlier binding.
    pub fn register(&self, root: &str, strategy: Arc<dyn Strategy>) {
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        let name = strategy.name().to_string();
        if let Some(previous) = bindings.insert(root.to_string(), strategy) {
            debug!(
                namespace = root,
                previous = previous.name(),
                strategy = %name,
                "namespace strategy replaced"
            );
        } else {
            debug!(namespace = root, strategy = %name, "namespace registered");
        }
    }

    /// The strategy currently bound to `root`.
    pub fn lookup_strategy(&self, root: &str) -> Result<Arc<dyn Strategy>> {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(root)
            .cloned()
            .ok_or_else(|| ResolveError::UnregisteredNamespace(root.to_string()))
    }

    pub fn is_registered(&self, root: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(root)
    }

    /// Registered root names, sorted.
    pub fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NamespaceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceRegistry")
            .field("namespaces", &self.namespaces())
            .finish()
    }
}
