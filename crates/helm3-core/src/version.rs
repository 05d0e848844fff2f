//! Client version validation against semantic-version constraints.
//!
//! Helm publishes its releases with a leading `v` (`v3.8.2`) and the
//! supported range is written the same way (`^v3.x`). Both are normalized
//! before they are handed to [`semver`]:
//!
//! - a leading `v`/`V` is dropped from every version
//! - wildcard components (`x`, `X`, `*`) truncate the comparator, so
//!   `^v3.x` becomes `^3`
//! - versions written as `major` or `major.minor` are padded with `.0`
//!
//! # Examples
//!
//! ```
//! use helm3_core::version::{validate, CLIENT_VERSION_CONSTRAINT};
//!
//! assert!(validate("v3.8.2", CLIENT_VERSION_CONSTRAINT).unwrap());
//! assert!(!validate("v2.16.1", CLIENT_VERSION_CONSTRAINT).unwrap());
//! assert!(validate("v3.8.2.0", CLIENT_VERSION_CONSTRAINT).is_err());
//! ```

use semver::{Version, VersionReq};

use crate::error::{Error, Result};

/// Range of helm clients this mixin supports: any `v3.x.x` release.
pub const CLIENT_VERSION_CONSTRAINT: &str = "^v3.x";

/// Check whether `version` satisfies `constraint`.
///
/// The constraint is parsed first, so a malformed constraint is reported
/// even when the version is also malformed.
pub fn validate(version: &str, constraint: &str) -> Result<bool> {
    let req = parse_constraint(constraint)?;
    let parsed = parse_version(version)?;
    Ok(req.matches(&parsed))
}

/// Ensure a client version lies within [`CLIENT_VERSION_CONSTRAINT`].
pub fn ensure_supported(version: &str) -> Result<()> {
    if validate(version, CLIENT_VERSION_CONSTRAINT)? {
        Ok(())
    } else {
        Err(Error::UnsupportedClientVersion {
            version: version.to_string(),
            constraint: CLIENT_VERSION_CONSTRAINT.to_string(),
        })
    }
}

/// Parse a version string, tolerating a `v` prefix and a missing patch.
pub fn parse_version(version: &str) -> Result<Version> {
    let trimmed = strip_v(version.trim());
    let invalid = |message: String| Error::InvalidVersion {
        version: version.to_string(),
        message,
    };

    match Version::parse(trimmed) {
        Ok(v) => Ok(v),
        Err(err) => {
            let components = trimmed.split('.').count();
            if components < 3 && !trimmed.contains(['-', '+']) {
                let padded = format!("{trimmed}{}", ".0".repeat(3 - components));
                Version::parse(&padded).map_err(|e| invalid(e.to_string()))
            } else {
                Err(invalid(err.to_string()))
            }
        }
    }
}

/// Parse a comma-separated range expression such as `^v3.x` or `>=v3.2,<v3.9`.
pub fn parse_constraint(constraint: &str) -> Result<VersionReq> {
    let invalid = |message: String| Error::InvalidConstraint {
        constraint: constraint.to_string(),
        message,
    };

    let mut comparators = Vec::new();
    for part in constraint.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(invalid("empty comparator".to_string()));
        }
        comparators.push(normalize_comparator(part));
    }

    VersionReq::parse(&comparators.join(", ")).map_err(|e| invalid(e.to_string()))
}

/// Normalize one comparator: `^v3.x` -> `^3`, `>=v3.2.1` -> `>=3.2.1`, `x` -> `*`.
fn normalize_comparator(comparator: &str) -> String {
    let split = comparator
        .find(|c: char| !matches!(c, '^' | '~' | '<' | '>' | '=' | ' '))
        .unwrap_or(comparator.len());
    let (op, version) = comparator.split_at(split);
    let op = op.trim();
    let version = strip_v(version.trim());

    let kept: Vec<&str> = version
        .split('.')
        .take_while(|c| !matches!(*c, "x" | "X" | "*"))
        .collect();

    if kept.is_empty() {
        // Fully wildcarded; an operator in front of `*` is meaningless
        return "*".to_string();
    }
    format!("{op}{}", kept.join("."))
}

fn strip_v(s: &str) -> &str {
    s.strip_prefix(['v', 'V']).unwrap_or(s)
}
