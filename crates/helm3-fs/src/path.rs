//! Normalized path handling for host configuration locations

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Host roots arrive from the environment in platform form; joining the
/// fixed mixin suffix onto them goes through this type so that rendered
/// paths in logs and errors are stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Platform-native form for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append a relative suffix, which may span several segments.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/home/porter", "mixins/helm3/config.yaml", "/home/porter/mixins/helm3/config.yaml")]
    #[case("/home/porter/", "mixins/helm3/config.yaml", "/home/porter/mixins/helm3/config.yaml")]
    #[case("C:\\porter", "mixins\\helm3\\config.yaml", "C:/porter/mixins/helm3/config.yaml")]
    #[case("/home/porter", "/mixins/helm3", "/home/porter/mixins/helm3")]
    fn join_normalizes_separators(
        #[case] root: &str,
        #[case] suffix: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(NormalizedPath::new(root).join(suffix).as_str(), expected);
    }

    #[test]
    fn display_matches_normalized_form() {
        let path = NormalizedPath::new("C:\\porter").join("mixins/helm3");
        assert_eq!(path.to_string(), "C:/porter/mixins/helm3");
        assert_eq!(path.to_native(), PathBuf::from("C:/porter/mixins/helm3"));
    }

    #[test]
    fn exists_checks_the_filesystem() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path());
        assert!(root.exists());
        assert!(!root.join("missing.yaml").exists());
    }
}
