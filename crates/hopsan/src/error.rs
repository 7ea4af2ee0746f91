//! Errors raised on the Rust side of the engine boundary.
//!
//! Faults inside the native engine (malformed models, unknown parameter
//! names) are not represented here: the engine entry points return nothing,
//! so whatever the engine does on failure is what the caller observes.

use std::ffi::NulError;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = HopsanError> = std::result::Result<T, E>;

/// Errors from locating, loading or calling into the engine library.
#[derive(Debug, Error)]
pub enum HopsanError {
    /// The installation-root environment variable is not set.
    #[error("environment variable {var} is not set (it must name the Hopsan installation root)")]
    MissingInstallRoot {
        /// Name of the variable that was read.
        var: String,
    },
    /// The installation-root environment variable is set but empty.
    #[error("environment variable {var} is empty")]
    InvalidInstallRoot {
        /// Name of the variable that was read.
        var: String,
    },
    /// The engine shared library could not be opened.
    #[error("failed to load engine library {}: {source}", .path.display())]
    LibraryLoad {
        /// Path that was passed to the dynamic loader.
        path: PathBuf,
        /// Loader error.
        #[source]
        source: libloading::Error,
    },
    /// The engine library does not export one of the required entry points.
    #[error("engine library has no entry point `{symbol}`: {source}")]
    MissingSymbol {
        /// The missing C symbol.
        symbol: &'static str,
        /// Loader error.
        #[source]
        source: libloading::Error,
    },
    /// A component library path does not name an existing file.
    #[error("component library {} does not exist", .path.display())]
    ComponentLibraryNotFound {
        /// The path that was checked.
        path: PathBuf,
    },
    /// A text argument cannot be encoded as a C string.
    #[error("{argument} contains an interior NUL byte")]
    InteriorNul {
        /// Which argument failed to encode.
        argument: &'static str,
        /// Encoding error, carrying the offending bytes.
        #[source]
        source: NulError,
    },
    /// The engine reported a negative log sample count.
    #[error("engine reported a negative log sample count ({0})")]
    NegativeSampleCount(i32),
}
