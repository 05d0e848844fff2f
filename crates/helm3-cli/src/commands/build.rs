//! Build command implementation

use helm3_core::Mixin;

use super::read_payload;
use crate::error::Result;

/// Print the Dockerfile lines for the payload on stdin.
pub fn run_build(mut mixin: Mixin) -> Result<()> {
    let payload = read_payload()?;
    let config = mixin.build(&payload)?;
    tracing::debug!(
        client_version = %config.client_version,
        image_platform = %config.image_platform,
        "Build instructions written"
    );
    Ok(())
}
