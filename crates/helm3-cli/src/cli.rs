//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use helm3_core::mixin::{DEFAULT_HELM_BINARY, DEFAULT_KUBECTL_BINARY, DEFAULT_OUTPUTS_DIR};

/// Helm 3 mixin for Porter - build invocation images and manage chart releases
#[derive(Parser, Debug)]
#[command(name = "helm3-mixin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true, visible_alias = "verbose")]
    pub debug: bool,

    /// Helm client to run during install and uninstall
    #[arg(long, global = true, env = "HELM3_MIXIN_BINARY", default_value = DEFAULT_HELM_BINARY)]
    pub helm_binary: String,

    /// Client used to read step outputs from the cluster
    #[arg(long, global = true, default_value = DEFAULT_KUBECTL_BINARY)]
    pub kubectl_binary: String,

    /// Directory step outputs are written to
    #[arg(long, global = true, default_value = DEFAULT_OUTPUTS_DIR)]
    pub outputs_dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print Dockerfile lines for the invocation image
    ///
    /// Reads the build payload (`config: {...}`) from stdin.
    Build,

    /// Install or upgrade a chart release
    ///
    /// Reads `install: [ { helm3: {...} } ]` from stdin.
    Install,

    /// Uninstall chart releases
    ///
    /// Reads `uninstall: [ { helm3: {...} } ]` from stdin.
    Uninstall,

    /// Print the mixin version
    Version {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Plaintext)]
        output: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plaintext,
    Json,
}
