//! Install command implementation

use helm3_core::Mixin;

use super::read_payload;
use crate::error::Result;

/// Run the install step on stdin and write its outputs.
pub fn run_install(mut mixin: Mixin) -> Result<()> {
    let payload = read_payload()?;
    let outputs = mixin.install(&payload)?;
    for (name, _) in &outputs {
        tracing::debug!(output = %name, "Wrote output");
    }
    Ok(())
}
