//! Error types for namespace resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by a host loader.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Nothing exists at the resolved location.
    #[error("unit not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The unit exists but could not be read.
    #[error("failed to read unit {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loader-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Error type for every resolution entry point.
///
/// Strategy and loader failures travel through the core untouched: whatever a
/// strategy returns is what the caller sees.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Access on a node whose namespace root has no bound strategy.
    #[error("namespace `{0}` is not registered")]
    UnregisteredNamespace(String),

    /// The host loader failed.
    #[error("load failure: {0}")]
    LoadFailure(#[from] LoadError),

    /// A strategy could not classify a name.
    #[error("cannot classify `{name}`: {reason}")]
    ClassificationFailure { name: String, reason: String },

    /// A name was accessed again while its own resolution was in progress.
    #[error("`{full_name}` is already being resolved")]
    ReentrantResolution { full_name: String },

    /// A path walked through a loaded unit as if it were a namespace.
    #[error("`{full_name}` is a unit, not a namespace")]
    NotANamespace { full_name: String },

    /// A symbol path or name is not well formed.
    #[error("invalid symbol path: {0}")]
    InvalidPath(String),
}

/// Errors reading a namespace configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
