//! Platform profiles: named blocks of image-build instructions
//!
//! A fixed list of built-in profiles is the base. The host override file
//! can add profiles or replace built-in ones by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the built-in profile selected by default.
pub const DEFAULT_PLATFORM: &str = "default";

/// Reserved platform name that suppresses all build output.
pub const NO_PLATFORM: &str = "none";

/// Initialization block of the built-in `default` profile.
///
/// Installs the helm client and kubectl for `${CLIENT_ARCH}`; the `ENV`
/// lines emitted ahead of the block supply the variables.
pub const DEFAULT_PLATFORM_INIT: &str = concat!(
    "ENV HELM_EXPERIMENTAL_OCI=1\n",
    "RUN apt-get update && apt-get install -y curl\n",
    "RUN curl https://get.helm.sh/helm-${CLIENT_VERSION}-linux-${CLIENT_ARCH}.tar.gz --output helm3.tar.gz\n",
    "RUN tar -xvf helm3.tar.gz && rm helm3.tar.gz\n",
    "RUN mv linux-${CLIENT_ARCH}/helm /usr/local/bin/helm3\n",
    "RUN curl -o kubectl https://storage.googleapis.com/kubernetes-release/release/${API_VERSION}/bin/linux/${CLIENT_ARCH}/kubectl &&\\\n",
    "    mv kubectl /usr/local/bin && chmod a+x /usr/local/bin/kubectl",
);

/// One named initialization block for a target image platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub name: String,
    #[serde(default)]
    pub init: String,
}

impl PlatformProfile {
    pub fn new(name: impl Into<String>, init: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            init: init.into(),
        }
    }
}

/// The profile list, as persisted in the host override file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub platforms: Vec<PlatformProfile>,
}

impl PlatformConfig {
    /// The compiled-in profile list.
    pub fn builtin() -> Self {
        Self {
            platforms: vec![PlatformProfile::new(DEFAULT_PLATFORM, DEFAULT_PLATFORM_INIT)],
        }
    }

    /// Merge `overlay` into this list by profile name.
    ///
    /// A profile whose name already exists is replaced in place; new names
    /// are appended in overlay order. Nothing from either side is dropped.
    /// Duplicate names inside the overlay resolve to the last occurrence.
    pub fn merge(&mut self, overlay: &PlatformConfig) {
        let mut index: HashMap<String, usize> = self
            .platforms
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();

        for profile in &overlay.platforms {
            match index.get(&profile.name) {
                Some(&i) => {
                    tracing::debug!(name = %profile.name, "Host profile overrides built-in");
                    self.platforms[i] = profile.clone();
                }
                None => {
                    index.insert(profile.name.clone(), self.platforms.len());
                    self.platforms.push(profile.clone());
                }
            }
        }
    }

    /// Find a profile by name.
    pub fn find(&self, name: &str) -> Option<&PlatformProfile> {
        self.platforms.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_default_profile() {
        let config = PlatformConfig::builtin();
        assert_eq!(config.platforms.len(), 1);
        let default = config.find(DEFAULT_PLATFORM).unwrap();
        assert!(default.init.starts_with("ENV HELM_EXPERIMENTAL_OCI=1\n"));
        assert!(default.init.contains("/usr/local/bin/helm3"));
        assert!(default.init.ends_with("chmod a+x /usr/local/bin/kubectl"));
    }

    #[test]
    fn merge_override_wins_on_collision() {
        let mut base = PlatformConfig::builtin();
        base.merge(&PlatformConfig {
            platforms: vec![PlatformProfile::new("default", "RUN custom")],
        });

        assert_eq!(base.platforms.len(), 1);
        assert_eq!(base.find("default").unwrap().init, "RUN custom");
    }

    #[test]
    fn merge_preserves_builtin_entries() {
        let mut base = PlatformConfig::builtin();
        base.merge(&PlatformConfig {
            platforms: vec![
                PlatformProfile::new("debian", "RUN apt-get update"),
                PlatformProfile::new("centos", "RUN yum update"),
            ],
        });

        let names: Vec<&str> = base.platforms.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["default", "debian", "centos"]);
        assert_eq!(base.find("default").unwrap().init, DEFAULT_PLATFORM_INIT);
    }

    #[test]
    fn merge_empty_overlay_is_noop() {
        let mut base = PlatformConfig::builtin();
        base.merge(&PlatformConfig::default());
        assert_eq!(base, PlatformConfig::builtin());
    }

    #[test]
    fn merge_duplicate_overlay_names_last_wins() {
        let mut base = PlatformConfig::default();
        base.merge(&PlatformConfig {
            platforms: vec![
                PlatformProfile::new("alpine", "RUN apk add curl"),
                PlatformProfile::new("alpine", "RUN apk add --no-cache curl"),
            ],
        });

        assert_eq!(base.platforms.len(), 1);
        assert_eq!(base.platforms[0].init, "RUN apk add --no-cache curl");
    }

    #[test]
    fn profile_list_yaml_roundtrip() {
        let config = PlatformConfig::builtin();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.starts_with("platforms:"));
        let parsed: PlatformConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
