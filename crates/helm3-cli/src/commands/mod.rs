//! Command implementations for helm3-cli

pub mod build;
pub mod install;
pub mod uninstall;
pub mod version;

use std::io::{self, Read};

pub use build::run_build;
pub use install::run_install;
pub use uninstall::run_uninstall;
pub use version::run_version;

/// Read the step payload porter pipes to the mixin.
fn read_payload() -> io::Result<String> {
    let mut payload = String::new();
    io::stdin().read_to_string(&mut payload)?;
    Ok(payload)
}
