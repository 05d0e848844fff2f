//! Mixin settings from `porter.yaml` and their merge onto defaults
//!
//! ```yaml
//! mixins:
//! - helm3:
//!     clientVersion: v3.8.2
//!     apiVersion: v1.22.1
//!     clientArchitecture: amd64 | arm64 | arm
//!     imagePlatform: default | debian | centos | none
//!     repositories:
//!       stable:
//!         url: "https://charts.helm.sh/stable"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::platform::DEFAULT_PLATFORM;
use crate::error::{Error, Result};
use crate::version;

pub const DEFAULT_CLIENT_VERSION: &str = "v3.8.2";
pub const DEFAULT_API_VERSION: &str = "v1.22.1";
pub const DEFAULT_CLIENT_ARCHITECTURE: &str = "amd64";

/// Client architectures the built-in profile knows how to download.
pub const CLIENT_ARCHITECTURES: &[&str] = &["amd64", "arm64", "arm"];

/// A chart repository to register in the image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Mixin configuration; empty fields mean "not set"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MixinConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_architecture: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_platform: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub repositories: HashMap<String, Repository>,
}

/// Shape of the build-phase payload: `{ config: MixinConfig }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInput {
    pub config: MixinConfig,
}

impl BuildInput {
    /// Decode a build payload. Blank input decodes to an empty config.
    pub fn parse(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(payload).map_err(|e| Error::InvalidPayload {
            message: e.to_string(),
        })
    }
}

impl MixinConfig {
    /// The compiled-in defaults.
    pub fn defaults() -> Self {
        Self {
            client_version: DEFAULT_CLIENT_VERSION.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            client_architecture: DEFAULT_CLIENT_ARCHITECTURE.to_string(),
            image_platform: DEFAULT_PLATFORM.to_string(),
            repositories: HashMap::new(),
        }
    }

    /// Merge `overlay` onto this config field by field.
    ///
    /// Non-empty overlay scalars replace ours; repositories merge by name
    /// with the overlay entry winning.
    pub fn merge(&mut self, overlay: &MixinConfig) {
        merge_scalar(&mut self.client_version, &overlay.client_version);
        merge_scalar(&mut self.api_version, &overlay.api_version);
        merge_scalar(&mut self.client_architecture, &overlay.client_architecture);
        merge_scalar(&mut self.image_platform, &overlay.image_platform);
        for (name, repo) in &overlay.repositories {
            self.repositories.insert(name.clone(), repo.clone());
        }
    }
}

fn merge_scalar(target: &mut String, overlay: &str) {
    if !overlay.is_empty() {
        *target = overlay.to_string();
    }
}

/// Fully merged build settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub client_version: String,
    pub api_version: String,
    pub client_architecture: String,
    pub image_platform: String,
    pub repositories: HashMap<String, Repository>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        MixinConfig::defaults().into()
    }
}

impl From<MixinConfig> for EffectiveConfig {
    fn from(config: MixinConfig) -> Self {
        Self {
            client_version: config.client_version,
            api_version: config.api_version,
            client_architecture: config.client_architecture,
            image_platform: config.image_platform,
            repositories: config.repositories,
        }
    }
}

/// Merge a build payload onto the compiled-in defaults.
///
/// A client version supplied by the payload must satisfy
/// [`version::CLIENT_VERSION_CONSTRAINT`].
pub fn resolve_config(payload: &str) -> Result<EffectiveConfig> {
    let input = BuildInput::parse(payload)?;

    let supplied = input.config.client_version.as_str();
    if !supplied.is_empty() {
        version::ensure_supported(supplied)?;
        tracing::debug!(client_version = supplied, "Using supplied helm client version");
    }

    let arch = input.config.client_architecture.as_str();
    if !arch.is_empty() && !CLIENT_ARCHITECTURES.contains(&arch) {
        tracing::warn!(
            client_architecture = arch,
            "Unrecognized client architecture; the download URL may not exist"
        );
    }

    let mut merged = MixinConfig::defaults();
    merged.merge(&input.config);
    Ok(merged.into())
}
