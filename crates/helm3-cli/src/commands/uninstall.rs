//! Uninstall command implementation

use helm3_core::Mixin;

use super::read_payload;
use crate::error::Result;

pub fn run_uninstall(mut mixin: Mixin) -> Result<()> {
    let payload = read_payload()?;
    mixin.uninstall(&payload)?;
    Ok(())
}
