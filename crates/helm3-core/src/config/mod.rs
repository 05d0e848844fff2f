//! Layered build configuration
//!
//! Settings are resolved from three layers, later layers winning:
//!
//! 1. **Compiled-in defaults** - client/API versions, architecture, platform
//!    and the built-in platform profiles
//! 2. **Host override file** - `<PORTER_HOME>/mixins/helm3/config.yaml`,
//!    holding additional or replacement platform profiles
//! 3. **Per-invocation payload** - the `config` block of the mixin entry in
//!    `porter.yaml`, merged field by field
//!
//! # Example
//!
//! ```ignore
//! use helm3_core::config::{ConfigResolver, resolve_config};
//!
//! let platforms = ConfigResolver::from_env()?.load_platforms()?;
//! let config = resolve_config("config:\n  clientArchitecture: arm64\n")?;
//! ```

mod mixin;
mod platform;
mod resolver;

pub use mixin::{
    BuildInput, CLIENT_ARCHITECTURES, DEFAULT_API_VERSION, DEFAULT_CLIENT_ARCHITECTURE,
    DEFAULT_CLIENT_VERSION, EffectiveConfig, MixinConfig, Repository, resolve_config,
};
pub use platform::{
    DEFAULT_PLATFORM, DEFAULT_PLATFORM_INIT, NO_PLATFORM, PlatformConfig, PlatformProfile,
};
pub use resolver::{ConfigResolver, MIXIN_CONFIG_SUFFIX, PORTER_HOME_VAR};
