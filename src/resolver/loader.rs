//! Host loaders: how a unit is actually read once its path is known.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::trace;

use crate::resolver::error::LoadError;
use crate::resolver::node::Unit;

/// Loads the unit stored at a resolved path.
///
/// Implementations should be idempotent: loading the same path twice is
/// allowed, only wasteful.
pub trait UnitLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Unit, LoadError>;
}

/// Source text of a unit read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSource {
    /// The file that was read.
    pub path: PathBuf,
    pub text: String,
}

/// Reads `<path>[.<extension>]` from the filesystem into a [`UnitSource`].
#[derive(Debug, Clone, Default)]
pub struct SourceFileLoader {
    extension: Option<String>,
}

impl SourceFileLoader {
    pub fn new() -> Self {
        SourceFileLoader { extension: None }
    }

    /// Append `.extension` to every path before reading it.
    pub fn with_extension(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        SourceFileLoader {
            extension: Some(extension.trim_start_matches('.').to_string()),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// The file that backs the unit at `path`.
    ///
    /// The extension is appended, not substituted, so `Foo.v2` becomes
    /// `Foo.v2.js`.
    pub fn locate(&self, path: &Path) -> PathBuf {
        match &self.extension {
            Some(extension) => {
                let mut file: OsString = path.as_os_str().to_owned();
                file.push(".");
                file.push(extension);
                PathBuf::from(file)
            }
            None => path.to_path_buf(),
        }
    }
}

impl UnitLoader for SourceFileLoader {
    fn load(&self, path: &Path) -> Result<Unit, LoadError> {
        let file = self.locate(path);
        trace!(file = %file.display(), "reading unit source");
        match fs::read_to_string(&file) {
            Ok(text) => {
                let unit: Unit = Rc::new(UnitSource { path: file, text });
                Ok(unit)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadError::NotFound(file)),
            Err(source) => Err(LoadError::Io { path: file, source }),
        }
    }
}
