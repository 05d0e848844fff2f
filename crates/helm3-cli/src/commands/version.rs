//! Version command implementation

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::Result;

/// Mixin identity reported to porter
#[derive(Debug, Serialize)]
struct MixinMetadata {
    name: &'static str,
    version: &'static str,
    author: &'static str,
}

const METADATA: MixinMetadata = MixinMetadata {
    name: "helm3",
    version: env!("CARGO_PKG_VERSION"),
    author: "Porter Authors",
};

/// Print the mixin version.
pub fn run_version(format: OutputFormat) -> Result<()> {
    println!("{}", render(format)?);
    Ok(())
}

fn render(format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Plaintext => format!(
            "{} v{} ({})",
            METADATA.name, METADATA.version, METADATA.author
        ),
        OutputFormat::Json => serde_json::to_string_pretty(&METADATA)?,
    })
}
