//! helm3 mixin CLI
//!
//! Porter runs this binary with a step payload on stdin.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;
use helm3_core::{InstallSettings, Mixin};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so stdout stays a clean Dockerfile fragment
    if cli.debug {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("{}: tracing subscriber already set", "warning".yellow());
        }
        tracing::debug!("Debug mode enabled");
    }

    let mixin = Mixin::new()
        .with_debug(cli.debug)
        .with_settings(InstallSettings {
            helm_binary: cli.helm_binary,
            kubectl_binary: cli.kubectl_binary,
            outputs_dir: cli.outputs_dir,
        });

    match cli.command {
        Commands::Build => commands::run_build(mixin),
        Commands::Install => commands::run_install(mixin),
        Commands::Uninstall => commands::run_uninstall(mixin),
        Commands::Version { output } => commands::run_version(output),
    }
}
