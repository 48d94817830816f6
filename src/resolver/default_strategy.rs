//! Convention-based strategy mapping namespaces onto a directory tree.
//!
//! With base directory `lib` and namespace `ns`:
//!
//! ```text
//! lib
//! ├─ foo
//! │  └─ bar
//! │     └─ FooBar      ns.foo.bar.FooBar
//! └─ Baz               ns.Baz
//! ```
//!
//! Names starting with an uppercase letter are units, everything else is a
//! further namespace. Supply your own [`Strategy`] to change either rule.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::resolver::error::Result;
use crate::resolver::loader::{SourceFileLoader, UnitLoader};
use crate::resolver::node::{ResolutionNode, Unit};
use crate::resolver::strategy::{Strategy, SymbolKind};

/// Node attribute holding the node's path relative to the base directory.
pub const PATH_ATTRIBUTE: &str = "path";

/// Does `name` follow the unit naming convention (leading uppercase)?
pub fn is_unit_name(name: &str) -> bool {
    name.chars().next().map_or(false, char::is_uppercase)
}

pub struct DefaultStrategy {
    base: PathBuf,
    loader: Arc<dyn UnitLoader>,
}

impl DefaultStrategy {
    /// Resolve units as plain files under `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self::with_loader(base, Arc::new(SourceFileLoader::new()))
    }

    pub fn with_loader(base: impl Into<PathBuf>, loader: Arc<dyn UnitLoader>) -> Self {
        DefaultStrategy {
            base: base.into(),
            loader,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Where the unit `node.name` lives: `base / node.path / name`.
    pub fn unit_path(&self, node: &ResolutionNode, name: &str) -> PathBuf {
        let mut path = self.base.clone();
        if let Some(relative) = node.attribute(PATH_ATTRIBUTE) {
            path.push(relative);
        }
        path.push(name);
        path
    }
}

impl Strategy for DefaultStrategy {
    fn classify(&self, _node: &ResolutionNode, name: &str) -> Result<SymbolKind> {
        Ok(if is_unit_name(name) {
            SymbolKind::Unit
        } else {
            SymbolKind::Namespace
        })
    }

    fn on_node_created(
        &self,
        parent: &ResolutionNode,
        name: &str,
        node: &ResolutionNode,
    ) -> Result<()> {
        let path = match parent.attribute(PATH_ATTRIBUTE) {
            Some(parent_path) if !parent.is_root() => Path::new(&parent_path).join(name),
            _ => PathBuf::from(name),
        };
        node.set_attribute(PATH_ATTRIBUTE, path.to_string_lossy());
        Ok(())
    }

    fn load_unit(&self, node: &ResolutionNode, name: &str) -> Result<Unit> {
        Ok(self.loader.load(&self.unit_path(node, name))?)
    }

    fn name(&self) -> &str {
        "default"
    }
}
