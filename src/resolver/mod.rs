//! Lazy namespace resolution.
//!
//! A namespace is registered once, together with a [`Strategy`]. From then on
//! every symbol below it (`ns.foo.bar.Baz`) is resolved on first access, as
//! either a further namespace or a loaded unit, and cached on its parent node.
//!
//! ## Resolution Flow
//!
//! When code asks a node for member `name`:
//!
//! 1. **Check cache**: has `name` been resolved on this node before?
//! 2. **Look up strategy**: the strategy bound to the node's namespace root
//! 3. **Classify**: `Unit` or `Namespace`?
//! 4. **Materialize**: load the unit, or create a child node and run the
//!    strategy's node-creation hook
//! 5. **Cache result**: store it on the node for every later access
//!
//! ```text
//! register("ns", strategy)          ns ──► ResolutionNode(ns)
//!
//! ns.resolve("foo")   classify(ns, foo)   = Namespace ──► ResolutionNode(ns.foo)
//! foo.resolve("bar")  classify(foo, bar)  = Namespace ──► ResolutionNode(ns.foo.bar)
//! bar.resolve("Baz")  classify(bar, Baz)  = Unit      ──► load_unit(bar, Baz)
//!                                                         ns.foo.bar.Baz
//! ```
//!
//! ### Key Components
//!
//! - **[`Strategy`]**: classification, node-creation hook, loading
//! - **[`ResolutionNode`]**: the tree node and its per-name state machine
//! - **[`NamespaceRegistry`]**: namespace root → strategy
//! - **[`DefaultStrategy`]**: uppercase names are units, loaded from a directory tree
//! - **[`register`]**: binds names and attaches roots to a [`SymbolTable`]
//!
//! ## Example: Custom Strategy
//!
//! ```
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use lazyns::resolver::{
//!     register_with, NamespaceRegistry, ResolutionNode, Result, Scope, Strategy, SymbolKind,
//!     Target, Unit,
//! };
//!
//! struct Numbers;
//!
//! impl Strategy for Numbers {
//!     fn classify(&self, _node: &ResolutionNode, name: &str) -> Result<SymbolKind> {
//!         Ok(if name.starts_with('N') { SymbolKind::Unit } else { SymbolKind::Namespace })
//!     }
//!
//!     fn load_unit(&self, _node: &ResolutionNode, name: &str) -> Result<Unit> {
//!         Ok(Rc::new(name.len()))
//!     }
//! }
//!
//! let registry = Arc::new(NamespaceRegistry::new());
//! let scope = Rc::new(Scope::new());
//! let roots = register_with(&registry, "num", Arc::new(Numbers), Target::Table(scope.clone())).unwrap();
//!
//! let unit = roots[0].resolve_path("small.Nine").unwrap();
//! assert_eq!(unit.full_name(), "num.small.Nine");
//! assert_eq!(unit.as_unit().unwrap().downcast_ref::<usize>(), Some(&4));
//! ```

pub mod config;
pub mod default_strategy;
pub mod error;
pub mod loader;
pub mod node;
pub mod register;
pub mod registry;
pub mod scope;
pub mod strategy;

pub use config::{NamespaceConfig, NamespaceEntry};
pub use default_strategy::{is_unit_name, DefaultStrategy, PATH_ATTRIBUTE};
pub use error::{ConfigError, LoadError, ResolveError, Result};
pub use loader::{SourceFileLoader, UnitLoader, UnitSource};
pub use node::{LoadedUnit, NodeRef, ResolutionNode, ResolutionState, Symbol, Unit, UnitIdentity};
pub use register::{lookup, lookup_global, register, register_with, Handler, Namespaces, Target};
pub use registry::NamespaceRegistry;
pub use scope::{exports, global_scope, ExportSurface, Scope, SymbolTable};
pub use strategy::{Strategy, SymbolKind};
