//! Strategy trait for driving lazy resolution of a namespace tree.
//!
//! A strategy is bound to exactly one namespace root in a
//! [`NamespaceRegistry`](super::registry::NamespaceRegistry). Every node under
//! that root consults it when a name is accessed for the first time.

use std::fmt;

use crate::resolver::error::Result;
use crate::resolver::node::{ResolutionNode, Unit};

/// What a not-yet-resolved name turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A loadable leaf value.
    Unit,
    /// A further namespace, represented by a child [`ResolutionNode`].
    Namespace,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Unit => write!(f, "unit"),
            SymbolKind::Namespace => write!(f, "namespace"),
        }
    }
}

/// Policy that decides how the names under a namespace resolve.
///
/// The core never retries or caches a failure: an `Err` from any method is
/// handed back to whoever triggered the resolution and the name stays
/// unresolved.
///
/// Strategies live in a process-wide registry, hence `Send + Sync`. The nodes
/// they receive are single-threaded.
pub trait Strategy: Send + Sync {
    /// Decide whether `node.name` is a unit or a further namespace.
    ///
    /// Must depend only on state visible at the time of the call. Called at
    /// most once per (node, name) once it succeeds.
    fn classify(&self, node: &ResolutionNode, name: &str) -> Result<SymbolKind>;

    /// Called right after a child namespace node is created and before it is
    /// cached or handed out.
    ///
    /// Use [`ResolutionNode::set_attribute`] to attach data the strategy
    /// needs later, e.g. a derived path.
    ///
    /// Not called for namespace roots; a root is created by registration, not
    /// by resolution, and carries no attributes until a strategy sets them.
    fn on_node_created(
        &self,
        _parent: &ResolutionNode,
        _name: &str,
        _node: &ResolutionNode,
    ) -> Result<()> {
        Ok(())
    }

    /// Load the unit `node.name`.
    ///
    /// The returned value becomes the child of `node`. A loader may instead
    /// install the value itself with [`ResolutionNode::install_unit`]; an
    /// installed value takes precedence over the returned one.
    ///
    /// Loading the same unit twice must be safe.
    fn load_unit(&self, node: &ResolutionNode, name: &str) -> Result<Unit>;

    /// Human-readable name for this strategy (for logging).
    fn name(&self) -> &str {
        "custom"
    }
}
