//! Host-level profile resolution
//!
//! The `ConfigResolver` locates the persisted profile list beneath the
//! porter home directory and merges it over the compiled-in profiles.

use helm3_fs::{ConfigStore, NormalizedPath};
use std::ffi::OsString;
use std::path::PathBuf;

use super::platform::PlatformConfig;
use crate::error::{Error, Result};

/// Environment variable naming the porter home directory
pub const PORTER_HOME_VAR: &str = "PORTER_HOME";

/// Location of the host override file relative to porter home
pub const MIXIN_CONFIG_SUFFIX: &str = "mixins/helm3/config.yaml";

/// Resolves the platform profiles available to a build
///
/// Profiles are layered:
/// 1. Compiled-in profiles ([`PlatformConfig::builtin`])
/// 2. Host override file (`<PORTER_HOME>/mixins/helm3/config.yaml`)
///
/// The host file is created with the compiled-in list on first use.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    porter_home: NormalizedPath,
    store: ConfigStore,
}

impl ConfigResolver {
    /// Create a resolver rooted at `$PORTER_HOME`.
    ///
    /// Fails when the variable is unset or empty rather than falling back
    /// to a path relative to the filesystem root.
    pub fn from_env() -> Result<Self> {
        Self::from_home_var(std::env::var_os(PORTER_HOME_VAR))
    }

    fn from_home_var(home: Option<OsString>) -> Result<Self> {
        match home {
            Some(home) if !home.is_empty() => Ok(Self::with_porter_home(PathBuf::from(home))),
            _ => Err(Error::PorterHomeNotSet {
                var: PORTER_HOME_VAR.to_string(),
            }),
        }
    }

    /// Create a resolver rooted at an explicit porter home.
    pub fn with_porter_home(porter_home: impl Into<PathBuf>) -> Self {
        Self {
            porter_home: NormalizedPath::new(porter_home.into()),
            store: ConfigStore::new(),
        }
    }

    /// Path of the host override file.
    pub fn config_path(&self) -> NormalizedPath {
        self.porter_home.join(MIXIN_CONFIG_SUFFIX)
    }

    /// Load the merged profile list.
    ///
    /// When the host file is absent it is written with the compiled-in
    /// list and that list is returned unchanged.
    pub fn load_platforms(&self) -> Result<PlatformConfig> {
        let mut platforms = PlatformConfig::builtin();
        let path = self.config_path();

        if path.exists() {
            tracing::debug!(path = %path, "Loading host platform profiles");
            let host: PlatformConfig = self.store.load(&path)?;
            platforms.merge(&host);
        } else {
            tracing::debug!(path = %path, "No host platform profiles found, writing defaults");
            self.store.save(&path, &platforms)?;
        }

        Ok(platforms)
    }

    /// The porter home directory this resolver reads from.
    pub fn porter_home(&self) -> &NormalizedPath {
        &self.porter_home
    }
}
