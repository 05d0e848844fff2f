//! Build and install engine for the helm3 mixin
//!
//! The mixin has two pipelines:
//!
//! - **Build**: resolve layered settings ([`config`]) and emit Dockerfile
//!   lines for the invocation image ([`build`])
//! - **Install**: turn a declarative step into a `helm3 upgrade --install`
//!   command ([`install`]), run it ([`command`]) and read declared outputs
//!   back from the cluster ([`outputs`])
//!
//! Both pipelines check client versions with [`version`]. The [`Mixin`]
//! context ties them to the process streams.
//!
//! ```text
//!   build:    ConfigResolver -> resolve_config -> build::emit -> out
//!   install:  InstallAction -> install::synthesize -> CommandRunner -> resolve_outputs
//! ```

pub mod build;
pub mod command;
pub mod config;
pub mod error;
pub mod install;
pub mod mixin;
pub mod outputs;
pub mod uninstall;
pub mod version;

pub use build::{BuildInstructions, emit};
pub use command::{CommandInvocation, CommandRunner, CommandStatus, ProcessRunner};
pub use config::{ConfigResolver, EffectiveConfig, PlatformConfig, PlatformProfile, resolve_config};
pub use error::{Error, Result};
pub use install::{InstallAction, InstallArguments, synthesize};
pub use mixin::{InstallSettings, Mixin};
pub use outputs::{ClusterClient, HelmOutput, KubectlClient, ResolvedOutputs, resolve_outputs};
pub use uninstall::{UninstallAction, UninstallArguments};
