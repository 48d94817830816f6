//! # lazyns - lazy, on-demand namespace resolution
//!
//! Declare a namespace name and a loading strategy once; every nested symbol
//! under it (`ns.foo.bar.Baz`) is then resolved only when it is first
//! accessed:
//! - a pluggable [`Strategy`](resolver::Strategy) decides whether a name is a
//!   further namespace or a loadable unit, and how units are loaded
//! - resolved symbols are cached on their parent node and never resolved twice
//! - a [`DefaultStrategy`](resolver::DefaultStrategy) maps namespaces onto a
//!   directory tree, treating capitalised names as units
//!
//! ## Quick Start
//!
//! ```no_run
//! use lazyns::resolver::{lookup_global, register, Target};
//!
//! // units of `app` live under ./lib, e.g. ./lib/models/User
//! register("app", "./lib", Target::Global).unwrap();
//!
//! let user = lookup_global("app.models.User").unwrap();
//! assert_eq!(user.full_name(), "app.models.User");
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - pest grammar for dotted symbol paths
//! - **[`resolver`]** - the resolution tree, strategies, registry and
//!   registration entry point
//!   - **[`resolver::node`]** - resolution nodes and their state machine
//!   - **[`resolver::strategy`]** - the strategy trait
//!   - **[`resolver::registry`]** - namespace root → strategy bindings
//!   - **[`resolver::config`]** - TOML namespace configuration

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod resolver;
