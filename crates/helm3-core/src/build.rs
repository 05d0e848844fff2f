//! Image-build instruction emission
//!
//! Turns an [`EffectiveConfig`] and the merged platform profiles into the
//! Dockerfile lines porter splices into the invocation image.

use crate::config::{EffectiveConfig, NO_PLATFORM, PlatformConfig};
use crate::error::Error;

/// Comment emitted instead of any instructions for the `none` platform.
///
/// Byte-for-byte what existing bundles expect, misspellings included.
pub const SUPPRESSED_OUTPUT: &str = "# helm mixin buildtime ouput was supressed";

/// Lines switching to and from the bundle user around repository setup.
pub const BUNDLE_USER_LINE: &str = "USER ${BUNDLE_USER}";
pub const ROOT_USER_LINE: &str = "USER root";
pub const REPO_UPDATE_LINE: &str = "RUN helm3 repo update";

/// Result of instruction emission
#[derive(Debug, Default, PartialEq)]
pub struct BuildInstructions {
    /// Instruction lines in output order; a profile block is one entry.
    pub lines: Vec<String>,
    /// Repositories left out of the image, with the reason.
    pub skipped: Vec<SkippedRepository>,
}

/// A repository that produced no registration command
#[derive(Debug, PartialEq)]
pub struct SkippedRepository {
    pub name: String,
    pub reason: String,
}

impl BuildInstructions {
    /// Render the lines as newline-terminated text.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Emit the build instructions for `config`.
///
/// The output depends only on the inputs: repositories are emitted in
/// name order whatever the map's iteration order.
pub fn emit(config: &EffectiveConfig, platforms: &PlatformConfig) -> BuildInstructions {
    let mut instructions = BuildInstructions::default();

    if config.image_platform == NO_PLATFORM {
        instructions.lines.push(SUPPRESSED_OUTPUT.to_string());
        return instructions;
    }

    let lines = &mut instructions.lines;
    lines.push(format!("ENV CLIENT_VERSION={}", config.client_version));
    lines.push(format!("ENV API_VERSION={}", config.api_version));
    lines.push(format!("ENV CLIENT_ARCH={}", config.client_architecture));

    match platforms.find(&config.image_platform) {
        Some(profile) => lines.push(profile.init.clone()),
        None => tracing::debug!(
            image_platform = %config.image_platform,
            "No platform profile matches; skipping initialization block"
        ),
    }

    if config.repositories.is_empty() {
        return instructions;
    }

    lines.push(BUNDLE_USER_LINE.to_string());

    let mut names: Vec<&String> = config.repositories.keys().collect();
    names.sort();
    for name in names {
        let url = &config.repositories[name].url;
        match repository_command(name, url) {
            Ok(command) => lines.push(command),
            Err(err) => {
                tracing::debug!(repository = %name, "Skipping repository: {err}");
                instructions.skipped.push(SkippedRepository {
                    name: name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    let lines = &mut instructions.lines;
    lines.push(REPO_UPDATE_LINE.to_string());
    lines.push(ROOT_USER_LINE.to_string());

    instructions
}

/// Registration command for one repository.
fn repository_command(name: &str, url: &str) -> Result<String, Error> {
    if url.is_empty() {
        return Err(Error::RepositoryUrlMissing {
            name: name.to_string(),
        });
    }
    Ok(["RUN", "helm3", "repo", "add", name, url].join(" "))
}
