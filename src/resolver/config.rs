//! Namespace configuration file parsing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::parser::parse_identifier;
use crate::resolver::default_strategy::DefaultStrategy;
use crate::resolver::error::{ConfigError, ResolveError};
use crate::resolver::loader::SourceFileLoader;
use crate::resolver::node::NodeRef;
use crate::resolver::register::{register_with, Handler, Target};
use crate::resolver::registry::NamespaceRegistry;

/// Configuration for one namespace resolved with the [`DefaultStrategy`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamespaceEntry {
    /// Base directory of the namespace's units.
    pub path: PathBuf,
    /// Extension appended to unit file names.
    #[serde(default)]
    pub extension: Option<String>,
    /// Whether the namespace is registered.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Complete namespace configuration.
///
/// Expected format:
/// ```toml
/// [namespaces.app]
/// path = "./lib"
/// extension = "js"
///
/// [namespaces.vendor]
/// path = "/opt/vendor"
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NamespaceConfig {
    #[serde(default)]
    pub namespaces: BTreeMap<String, NamespaceEntry>,
}

impl NamespaceConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        NamespaceConfig {
            namespaces: BTreeMap::new(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Relative namespace paths are taken relative to the directory holding
    /// the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        if let Some(dir) = path.parent() {
            config.rebase(dir);
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn rebase(&mut self, dir: &Path) {
        for entry in self.namespaces.values_mut() {
            if entry.path.is_relative() {
                entry.path = dir.join(&entry.path);
            }
        }
    }

    /// Enabled namespaces in name order.
    pub fn enabled(&self) -> impl Iterator<Item = (&String, &NamespaceEntry)> {
        self.namespaces.iter().filter(|(_, entry)| entry.enabled)
    }

    /// Register every enabled namespace in `registry`, attaching the roots to
    /// `target`.
    ///
    /// Every enabled name is validated first; if any is invalid nothing is
    /// registered.
    pub fn apply(
        &self,
        registry: &Arc<NamespaceRegistry>,
        target: Target,
    ) -> Result<Vec<NodeRef>, ConfigError> {
        for (name, _) in self.enabled() {
            parse_identifier(name).map_err(ResolveError::InvalidPath)?;
        }

        let table = target.into_table();
        let mut roots = Vec::new();
        for (name, entry) in self.enabled() {
            let loader = match &entry.extension {
                Some(extension) => SourceFileLoader::with_extension(extension.as_str()),
                None => SourceFileLoader::new(),
            };
            let strategy = DefaultStrategy::with_loader(&entry.path, Arc::new(loader));
            info!(namespace = %name, base = %entry.path.display(), "namespace configured");
            roots.extend(register_with(
                registry,
                name.as_str(),
                Handler::Strategy(Arc::new(strategy)),
                Target::Table(Rc::clone(&table)),
            )?);
        }
        Ok(roots)
    }
}
