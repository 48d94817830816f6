//! Symbol tables that namespace roots can be attached to.
//!
//! Three kinds of target are available to [`register`](super::register::register):
//! the global scope, the crate's export surface, and any caller-supplied
//! [`SymbolTable`]. The global scope and export surface are per thread, the
//! same way resolution nodes are.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::resolver::node::{ResolutionNode, Symbol};

/// Anything with named slots that symbols can be read from and written to.
pub trait SymbolTable {
    fn get(&self, name: &str) -> Option<Symbol>;

    fn set(&self, name: &str, symbol: Symbol);

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// A plain symbol table.
#[derive(Default)]
pub struct Scope {
    symbols: RefCell<HashMap<String, Symbol>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            symbols: RefCell::new(HashMap::new()),
        }
    }

    /// Names bound in this scope, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.symbols.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl SymbolTable for Scope {
    fn get(&self, name: &str) -> Option<Symbol> {
        self.symbols.borrow().get(name).cloned()
    }

    fn set(&self, name: &str, symbol: Symbol) {
        self.symbols.borrow_mut().insert(name.to_string(), symbol);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope").field("names", &self.names()).finish()
    }
}

/// Namespace nodes act as tables too: reads are cache probes and writes are
/// explicit assignments, so a root can be nested under another namespace.
impl SymbolTable for ResolutionNode {
    fn get(&self, name: &str) -> Option<Symbol> {
        ResolutionNode::get(self, name)
    }

    fn set(&self, name: &str, symbol: Symbol) {
        self.assign(name, symbol)
    }

    fn contains(&self, name: &str) -> bool {
        ResolutionNode::contains(self, name)
    }
}

/// The crate's own export table plus named sub-tables hanging off it.
pub struct ExportSurface {
    table: Rc<Scope>,
    slots: RefCell<HashMap<String, Rc<Scope>>>,
}

impl ExportSurface {
    /// Slot name that designates the export table itself.
    pub const SELF_SLOT: &'static str = ".";

    fn new() -> Self {
        ExportSurface {
            table: Rc::new(Scope::new()),
            slots: RefCell::new(HashMap::new()),
        }
    }

    /// The export table itself.
    pub fn table(&self) -> Rc<Scope> {
        self.table.clone()
    }

    /// The table currently stored under `name`, if any.
    pub fn slot(&self, name: &str) -> Option<Rc<Scope>> {
        if name == Self::SELF_SLOT {
            return Some(self.table());
        }
        self.slots.borrow().get(name).cloned()
    }

    /// Slot names, sorted.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// The table that registering into `slot` writes to.
    ///
    /// `"."` is the export table itself. Any other name gets a fresh, empty
    /// table, replacing whatever a previous registration left there.
    pub(crate) fn target(&self, slot: &str) -> Rc<Scope> {
        if slot == Self::SELF_SLOT {
            return self.table();
        }
        let fresh = Rc::new(Scope::new());
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), fresh.clone());
        fresh
    }
}

thread_local! {
    static GLOBAL_SCOPE: Rc<Scope> = Rc::new(Scope::new());
    static EXPORTS: Rc<ExportSurface> = Rc::new(ExportSurface::new());
}

/// The default attachment target for namespace roots.
pub fn global_scope() -> Rc<Scope> {
    GLOBAL_SCOPE.with(Rc::clone)
}

/// The crate's export surface.
pub fn exports() -> Rc<ExportSurface> {
    EXPORTS.with(Rc::clone)
}
