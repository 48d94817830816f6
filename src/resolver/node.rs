//! Resolution nodes, the lazily populated tree behind every namespace.
//!
//! Each node keeps a cache of the children it has already resolved. A name
//! moves through three states on a given node:
//!
//! ```text
//! Unresolved ──resolve()──► Resolving ──classify = Namespace──► Resolved(Namespace)
//!      ▲                        │      └─classify = Unit, load──► Resolved(Unit)
//!      └──────── error ─────────┘
//! ```
//!
//! A failed classification or load leaves the name `Unresolved`; the next
//! access tries again from scratch.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::parser::parse_qualified_name;
use crate::resolver::error::{ResolveError, Result};
use crate::resolver::registry::NamespaceRegistry;
use crate::resolver::strategy::{Strategy, SymbolKind};

/// A loaded value. Anything a loader produces.
pub type Unit = Rc<dyn Any>;

/// Shared handle to a [`ResolutionNode`].
pub type NodeRef = Rc<ResolutionNode>;

/// Identity recorded for a loaded unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitIdentity {
    pub short_name: String,
    pub full_name: String,
}

/// A unit together with its identity record.
///
/// The identity lives beside the value so that loaders can hand back any type
/// at all.
#[derive(Clone)]
pub struct LoadedUnit {
    value: Unit,
    identity: Rc<UnitIdentity>,
}

impl LoadedUnit {
    pub fn new(value: Unit, short_name: impl Into<String>, full_name: impl Into<String>) -> Self {
        LoadedUnit {
            value,
            identity: Rc::new(UnitIdentity {
                short_name: short_name.into(),
                full_name: full_name.into(),
            }),
        }
    }

    pub fn value(&self) -> &Unit {
        &self.value
    }

    pub fn identity(&self) -> &UnitIdentity {
        &self.identity
    }

    pub fn short_name(&self) -> &str {
        &self.identity.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.identity.full_name
    }

    /// Borrow the value as a concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.value).downcast_ref::<T>()
    }

    /// Get a shared handle to the value as a concrete type.
    pub fn downcast<T: Any>(&self) -> Option<Rc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    /// Whether both units wrap the very same value.
    pub fn same_value(&self, other: &LoadedUnit) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for LoadedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoadedUnit({})", self.identity.full_name)
    }
}

/// The result of accessing a member of a node.
#[derive(Clone)]
pub enum Symbol {
    Namespace(NodeRef),
    Unit(LoadedUnit),
}

impl Symbol {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Symbol::Namespace(_) => SymbolKind::Namespace,
            Symbol::Unit(_) => SymbolKind::Unit,
        }
    }

    pub fn short_name(&self) -> &str {
        match self {
            Symbol::Namespace(node) => node.short_name(),
            Symbol::Unit(unit) => unit.short_name(),
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            Symbol::Namespace(node) => node.full_name(),
            Symbol::Unit(unit) => unit.full_name(),
        }
    }

    pub fn as_namespace(&self) -> Option<&NodeRef> {
        match self {
            Symbol::Namespace(node) => Some(node),
            Symbol::Unit(_) => None,
        }
    }

    pub fn as_unit(&self) -> Option<&LoadedUnit> {
        match self {
            Symbol::Namespace(_) => None,
            Symbol::Unit(unit) => Some(unit),
        }
    }

    /// Identity comparison: same node, or same loaded value.
    pub fn is_same(&self, other: &Symbol) -> bool {
        match (self, other) {
            (Symbol::Namespace(a), Symbol::Namespace(b)) => Rc::ptr_eq(a, b),
            (Symbol::Unit(a), Symbol::Unit(b)) => a.same_value(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Namespace(node) => write!(f, "Symbol::Namespace({})", node.full_name()),
            Symbol::Unit(unit) => write!(f, "Symbol::Unit({})", unit.full_name()),
        }
    }
}

/// Where a name stands on a particular node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    Resolving,
    Resolved(SymbolKind),
}

/// One point of a namespace tree.
///
/// `namespace_root`, `short_name` and `full_name` are fixed at creation.
/// Children are resolved on demand through [`resolve`](Self::resolve) and kept
/// for the lifetime of the node.
pub struct ResolutionNode {
    id: Uuid,
    namespace_root: String,
    short_name: String,
    full_name: String,
    is_root: bool,
    registry: Arc<NamespaceRegistry>,
    /// Strategy-specific data, e.g. a derived path.
    attributes: RefCell<HashMap<String, String>>,
    /// Resolution cache (name → resolved child).
    members: RefCell<HashMap<String, Symbol>>,
    /// Names whose resolution is in progress on this node.
    resolving: RefCell<HashSet<String>>,
}

impl ResolutionNode {
    /// Create the root node of namespace `name`, resolving against `registry`.
    pub fn new_root(registry: Arc<NamespaceRegistry>, name: &str) -> NodeRef {
        Rc::new(ResolutionNode::new(registry, name, name, name.to_string(), true))
    }

    fn new(
        registry: Arc<NamespaceRegistry>,
        namespace_root: &str,
        short_name: &str,
        full_name: String,
        is_root: bool,
    ) -> Self {
        ResolutionNode {
            id: Uuid::new_v4(),
            namespace_root: namespace_root.to_string(),
            short_name: short_name.to_string(),
            full_name,
            is_root,
            registry,
            attributes: RefCell::new(HashMap::new()),
            members: RefCell::new(HashMap::new()),
            resolving: RefCell::new(HashSet::new()),
        }
    }

    fn new_child(&self, name: &str) -> NodeRef {
        Rc::new(ResolutionNode::new(
            self.registry.clone(),
            &self.namespace_root,
            name,
            self.child_full_name(name),
            false,
        ))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn namespace_root(&self) -> &str {
        &self.namespace_root
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn registry(&self) -> &Arc<NamespaceRegistry> {
        &self.registry
    }

    fn child_full_name(&self, name: &str) -> String {
        format!("{}.{}", self.full_name, name)
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes.borrow().get(key).cloned()
    }

    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.borrow_mut().insert(key.into(), value.into());
    }

    /// Has `name` already been resolved? Never triggers resolution.
    pub fn contains(&self, name: &str) -> bool {
        self.members.borrow().contains_key(name)
    }

    /// The cached child `name`, if any. Never triggers resolution.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.members.borrow().get(name).cloned()
    }

    /// Names resolved so far, sorted.
    pub fn members(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn state(&self, name: &str) -> ResolutionState {
        if let Some(symbol) = self.members.borrow().get(name) {
            ResolutionState::Resolved(symbol.kind())
        } else if self.resolving.borrow().contains(name) {
            ResolutionState::Resolving
        } else {
            ResolutionState::Unresolved
        }
    }

    /// Put `symbol` under `name` directly, without consulting the strategy.
    ///
    /// Overwrites whatever was there.
    pub fn assign(&self, name: &str, symbol: Symbol) {
        self.members.borrow_mut().insert(name.to_string(), symbol);
    }

    /// Install `value` as the unit `name` of this node, recording its
    /// identity relative to this node.
    pub fn install_unit(&self, name: &str, value: Unit) -> LoadedUnit {
        let unit = LoadedUnit::new(value, name, self.child_full_name(name));
        self.assign(name, Symbol::Unit(unit.clone()));
        unit
    }

    /// Access member `name`, resolving it through the namespace's strategy on
    /// first access.
    pub fn resolve(&self, name: &str) -> Result<Symbol> {
        if let Some(symbol) = self.get(name) {
            trace!(node = %self.id, full_name = %symbol.full_name(), "cache hit");
            return Ok(symbol);
        }
        if self.resolving.borrow().contains(name) {
            return Err(ResolveError::ReentrantResolution {
                full_name: self.child_full_name(name),
            });
        }

        let strategy = self.registry.lookup_strategy(&self.namespace_root)?;

        let outcome = {
            let _mark = ResolvingMark::set(&self.resolving, name);
            self.resolve_with(strategy.as_ref(), name)
        };

        match &outcome {
            Ok(symbol) => debug!(
                namespace = %self.namespace_root,
                full_name = %symbol.full_name(),
                kind = %symbol.kind(),
                strategy = strategy.name(),
                node = %self.id,
                "resolved"
            ),
            Err(e) => warn!(
                namespace = %self.namespace_root,
                full_name = %self.child_full_name(name),
                error = %e,
                "resolution failed"
            ),
        }
        outcome
    }

    fn resolve_with(&self, strategy: &dyn Strategy, name: &str) -> Result<Symbol> {
        let symbol = match strategy.classify(self, name)? {
            SymbolKind::Unit => {
                let value = strategy.load_unit(self, name)?;
                Symbol::Unit(LoadedUnit::new(value, name, self.child_full_name(name)))
            }
            SymbolKind::Namespace => {
                let child = self.new_child(name);
                strategy.on_node_created(self, name, &child)?;
                Symbol::Namespace(child)
            }
        };

        // The strategy may have installed the child itself.
        let mut members = self.members.borrow_mut();
        let symbol = members.entry(name.to_string()).or_insert(symbol).clone();
        Ok(symbol)
    }

    /// Resolve a dotted path relative to this node, e.g. `"foo.bar.Baz"`.
    pub fn resolve_path(&self, path: &str) -> Result<Symbol> {
        let segments = parse_qualified_name(path).map_err(ResolveError::InvalidPath)?;
        self.resolve_segments(&segments)
    }

    /// Resolve `segments` one after another, starting at this node.
    ///
    /// Every segment but the last must resolve to a namespace.
    pub fn resolve_segments<S: AsRef<str>>(&self, segments: &[S]) -> Result<Symbol> {
        let (last, init) = segments
            .split_last()
            .ok_or_else(|| ResolveError::InvalidPath("empty path".to_string()))?;

        let mut current: Option<NodeRef> = None;
        for segment in init {
            let node: &ResolutionNode = match &current {
                Some(node) => &**node,
                None => self,
            };
            let next = match node.resolve(segment.as_ref())? {
                Symbol::Namespace(child) => child,
                Symbol::Unit(unit) => {
                    return Err(ResolveError::NotANamespace {
                        full_name: unit.full_name().to_string(),
                    })
                }
            };
            current = Some(next);
        }

        match &current {
            Some(node) => node.resolve(last.as_ref()),
            None => self.resolve(last.as_ref()),
        }
    }
}

/// Keeps `name` in the resolving set until dropped, also when a strategy
/// callback unwinds.
struct ResolvingMark<'a> {
    resolving: &'a RefCell<HashSet<String>>,
    name: &'a str,
}

impl<'a> ResolvingMark<'a> {
    fn set(resolving: &'a RefCell<HashSet<String>>, name: &'a str) -> Self {
        resolving.borrow_mut().insert(name.to_string());
        ResolvingMark { resolving, name }
    }
}

impl Drop for ResolvingMark<'_> {
    fn drop(&mut self) {
        self.resolving.borrow_mut().remove(self.name);
    }
}

impl fmt::Debug for ResolutionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionNode")
            .field("full_name", &self.full_name)
            .field("namespace_root", &self.namespace_root)
            .field("members", &self.members())
            .finish()
    }
}
