//! Registration entry point: bind namespaces to a strategy and attach their
//! root nodes to a symbol table.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::parser::{parse_identifier, parse_qualified_name};
use crate::resolver::default_strategy::DefaultStrategy;
use crate::resolver::error::{ResolveError, Result};
use crate::resolver::node::{NodeRef, ResolutionNode, Symbol};
use crate::resolver::registry::NamespaceRegistry;
use crate::resolver::scope::{exports, global_scope, SymbolTable};
use crate::resolver::strategy::Strategy;

/// One or more namespace names, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces(Vec<String>);

impl Namespaces {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for Namespaces {
    fn from(name: &str) -> Self {
        Namespaces(vec![name.to_string()])
    }
}

impl From<String> for Namespaces {
    fn from(name: String) -> Self {
        Namespaces(vec![name])
    }
}

impl From<Vec<String>> for Namespaces {
    fn from(names: Vec<String>) -> Self {
        Namespaces(names)
    }
}

impl From<Vec<&str>> for Namespaces {
    fn from(names: Vec<&str>) -> Self {
        Namespaces(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Namespaces {
    fn from(names: &[&str]) -> Self {
        Namespaces(names.iter().map(|name| name.to_string()).collect())
    }
}

/// How the registered namespaces resolve.
pub enum Handler {
    /// An explicit strategy.
    Strategy(Arc<dyn Strategy>),
    /// Shorthand for a [`DefaultStrategy`] rooted at this directory.
    BaseDir(PathBuf),
}

impl Handler {
    fn into_strategy(self) -> Arc<dyn Strategy> {
        match self {
            Handler::Strategy(strategy) => strategy,
            Handler::BaseDir(base) => Arc::new(DefaultStrategy::new(base)),
        }
    }
}

impl From<&str> for Handler {
    fn from(base: &str) -> Self {
        Handler::BaseDir(PathBuf::from(base))
    }
}

impl From<String> for Handler {
    fn from(base: String) -> Self {
        Handler::BaseDir(PathBuf::from(base))
    }
}

impl From<PathBuf> for Handler {
    fn from(base: PathBuf) -> Self {
        Handler::BaseDir(base)
    }
}

impl<S: Strategy + 'static> From<Arc<S>> for Handler {
    fn from(strategy: Arc<S>) -> Self {
        Handler::Strategy(strategy)
    }
}

/// Where root nodes are attached.
pub enum Target {
    /// The thread's global scope.
    Global,
    /// A named table in the export surface, or the export table itself for
    /// [`ExportSurface::SELF_SLOT`](super::scope::ExportSurface::SELF_SLOT).
    Exports(String),
    /// Any symbol table.
    Table(Rc<dyn SymbolTable>),
}

impl Target {
    pub fn exports(slot: impl Into<String>) -> Self {
        Target::Exports(slot.into())
    }

    pub(crate) fn into_table(self) -> Rc<dyn SymbolTable> {
        match self {
            Target::Global => global_scope() as Rc<dyn SymbolTable>,
            Target::Exports(slot) => exports().target(&slot) as Rc<dyn SymbolTable>,
            Target::Table(table) => table,
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Target::Global
    }
}

/// Register `namespaces` in the process-wide registry.
///
/// See [`register_with`].
pub fn register<N, H>(namespaces: N, handler: H, target: Target) -> Result<Vec<NodeRef>>
where
    N: Into<Namespaces>,
    H: Into<Handler>,
{
    register_with(&NamespaceRegistry::global(), namespaces, handler, target)
}

/// Bind every name in `namespaces` to `handler` in `registry`, create a root
/// node for each and set it on `target` under that name.
///
/// All names are validated before anything is registered. Returns the root
/// nodes in the order given.
pub fn register_with<N, H>(
    registry: &Arc<NamespaceRegistry>,
    namespaces: N,
    handler: H,
    target: Target,
) -> Result<Vec<NodeRef>>
where
    N: Into<Namespaces>,
    H: Into<Handler>,
{
    let namespaces = namespaces.into();
    if namespaces.0.is_empty() {
        return Err(ResolveError::InvalidPath(
            "no namespace names given".to_string(),
        ));
    }
    for name in &namespaces.0 {
        parse_identifier(name).map_err(ResolveError::InvalidPath)?;
    }

    let strategy = handler.into().into_strategy();
    let table = target.into_table();

    let mut roots = Vec::with_capacity(namespaces.0.len());
    for name in &namespaces.0 {
        registry.register(name, strategy.clone());
        let root = ResolutionNode::new_root(registry.clone(), name);
        table.set(name, Symbol::Namespace(root.clone()));
        debug!(namespace = %name, node = %root.id(), "root attached");
        roots.push(root);
    }
    Ok(roots)
}

/// Resolve a dotted path such as `ns.foo.Baz` whose first segment is bound in
/// `table`.
pub fn lookup(table: &dyn SymbolTable, path: &str) -> Result<Symbol> {
    let segments = parse_qualified_name(path).map_err(ResolveError::InvalidPath)?;
    let (first, rest) = segments
        .split_first()
        .ok_or_else(|| ResolveError::InvalidPath("empty path".to_string()))?;

    let root = table
        .get(first)
        .ok_or_else(|| ResolveError::UnregisteredNamespace(first.to_string()))?;
    if rest.is_empty() {
        return Ok(root);
    }
    match root {
        Symbol::Namespace(node) => node.resolve_segments(rest),
        Symbol::Unit(unit) => Err(ResolveError::NotANamespace {
            full_name: unit.full_name().to_string(),
        }),
    }
}

/// [`lookup`] against the thread's global scope.
pub fn lookup_global(path: &str) -> Result<Symbol> {
    let scope = global_scope();
    lookup(&*scope, path)
}
