//! Engine installation layout.
//!
//! [`EngineConfig`] names the installation root and the two libraries the
//! session loads from it. The default layout mirrors a Hopsan install:
//!
//! ```text
//! $HOPSANHOME/
//!   bin/libhopsanc.so
//!   componentLibraries/defaultLibrary/libdefaultcomponentlibrary.so
//! ```
//!
//! File names follow the platform convention (`hopsanc.dll`,
//! `libhopsanc.dylib`, ...).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use libloading::library_filename;
use tracing::debug;

use crate::error::{HopsanError, Result};

/// Environment variable naming the Hopsan installation root.
pub const HOPSAN_HOME_VAR: &str = "HOPSANHOME";

/// Base name of the engine library, without platform prefix or suffix.
pub const ENGINE_LIBRARY_NAME: &str = "hopsanc";

/// Base name of the default component library.
pub const DEFAULT_COMPONENT_LIBRARY_NAME: &str = "defaultcomponentlibrary";

/// Where to find the engine library and the default component library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    install_root: PathBuf,
    engine_library: PathBuf,
    default_component_library: PathBuf,
}

impl EngineConfig {
    /// Resolve the layout from `HOPSANHOME`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(HOPSAN_HOME_VAR)
    }

    /// Resolve the layout from the installation root named by `var`.
    ///
    /// Fails if the variable is unset or empty.
    pub fn from_env_var(var: &str) -> Result<Self> {
        Self::from_var_value(var, std::env::var_os(var))
    }

    fn from_var_value(var: &str, value: Option<OsString>) -> Result<Self> {
        let value = value.ok_or_else(|| HopsanError::MissingInstallRoot {
            var: var.to_owned(),
        })?;
        if value.is_empty() {
            return Err(HopsanError::InvalidInstallRoot {
                var: var.to_owned(),
            });
        }
        let config = Self::from_install_root(value);
        debug!(
            var,
            root = %config.install_root.display(),
            "resolved Hopsan installation root"
        );
        Ok(config)
    }

    /// Standard layout under an explicit installation root.
    pub fn from_install_root(root: impl Into<PathBuf>) -> Self {
        let install_root = root.into();
        let engine_library = install_root
            .join("bin")
            .join(library_filename(ENGINE_LIBRARY_NAME));
        let default_component_library = install_root
            .join("componentLibraries")
            .join("defaultLibrary")
            .join(library_filename(DEFAULT_COMPONENT_LIBRARY_NAME));
        Self {
            install_root,
            engine_library,
            default_component_library,
        }
    }

    /// Override the engine library path.
    pub fn with_engine_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_library = path.into();
        self
    }

    /// Override the default component library path.
    pub fn with_default_component_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_component_library = path.into();
        self
    }

    /// The installation root.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// Path of the engine shared library.
    pub fn engine_library(&self) -> &Path {
        &self.engine_library
    }

    /// Path of the component library loaded at construction.
    pub fn default_component_library(&self) -> &Path {
        &self.default_component_library
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_is_rejected() {
        let err = EngineConfig::from_var_value(HOPSAN_HOME_VAR, None).unwrap_err();
        assert!(matches!(
            err,
            HopsanError::MissingInstallRoot { ref var } if var == HOPSAN_HOME_VAR
        ));
    }

    #[test]
    fn empty_variable_is_rejected() {
        let err =
            EngineConfig::from_var_value(HOPSAN_HOME_VAR, Some(OsString::new())).unwrap_err();
        assert!(matches!(err, HopsanError::InvalidInstallRoot { .. }));
    }

    #[test]
    fn unset_process_variable_is_rejected() {
        let err = EngineConfig::from_env_var("HOPSAN_CONFIG_TEST_NEVER_SET").unwrap_err();
        assert!(matches!(err, HopsanError::MissingInstallRoot { .. }));
    }

    #[test]
    fn standard_layout_under_root() {
        let config =
            EngineConfig::from_var_value(HOPSAN_HOME_VAR, Some("/opt/hopsan".into())).unwrap();
        assert_eq!(config.install_root(), Path::new("/opt/hopsan"));
        assert_eq!(
            config.engine_library(),
            Path::new("/opt/hopsan/bin").join(library_filename("hopsanc"))
        );
        assert_eq!(
            config.default_component_library(),
            Path::new("/opt/hopsan/componentLibraries/defaultLibrary")
                .join(library_filename("defaultcomponentlibrary"))
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_file_names() {
        let config = EngineConfig::from_install_root("/opt/hopsan");
        assert_eq!(
            config.engine_library(),
            Path::new("/opt/hopsan/bin/libhopsanc.so")
        );
        assert_eq!(
            config.default_component_library(),
            Path::new(
                "/opt/hopsan/componentLibraries/defaultLibrary/libdefaultcomponentlibrary.so"
            )
        );
    }

    #[test]
    fn overrides_replace_only_their_path() {
        let config = EngineConfig::from_install_root("/opt/hopsan")
            .with_engine_library("/tmp/libstub.so")
            .with_default_component_library("/tmp/libcomponents.so");
        assert_eq!(config.install_root(), Path::new("/opt/hopsan"));
        assert_eq!(config.engine_library(), Path::new("/tmp/libstub.so"));
        assert_eq!(
            config.default_component_library(),
            Path::new("/tmp/libcomponents.so")
        );
    }
}
