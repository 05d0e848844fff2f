//! Build command tests: defaults, host profiles and emitted Dockerfile lines

use helm3_core::Error;
use helm3_core::config::{DEFAULT_PLATFORM_INIT, PlatformConfig};
use helm3_test_utils::TestMixin;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn testdata(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

/// The lines every non-suppressed default build starts with.
fn default_header(client_version: &str, api_version: &str, arch: &str) -> String {
    format!(
        "ENV CLIENT_VERSION={client_version}\nENV API_VERSION={api_version}\nENV CLIENT_ARCH={arch}\n{DEFAULT_PLATFORM_INIT}\n"
    )
}

#[test]
fn build_with_empty_input_uses_defaults() {
    let t = TestMixin::new();

    let config = t.mixin().build("").unwrap();

    assert_eq!(config.client_version, "v3.8.2");
    assert_eq!(t.output(), default_header("v3.8.2", "v1.22.1", "amd64"));
}

#[test]
fn build_with_a_valid_config() {
    let t = TestMixin::new();

    t.mixin()
        .build(&testdata("build-input-with-valid-config.yaml"))
        .unwrap();

    let want = default_header("v3.8.2", "v1.22.1", "amd64")
        + "USER ${BUNDLE_USER}\n"
        + "RUN helm3 repo add stable kubernetes-charts\n"
        + "RUN helm3 repo update\n"
        + "USER root\n";
    assert_eq!(t.output(), want);
}

#[test]
fn build_with_multiple_repositories_is_sorted() {
    let t = TestMixin::new();

    t.mixin()
        .build(&testdata("build-input-with-valid-config-multi-repos.yaml"))
        .unwrap();

    let want = default_header("v3.8.2", "v1.22.1", "amd64")
        + "USER ${BUNDLE_USER}\n"
        + "RUN helm3 repo add harbor https://helm.getharbor.io\n"
        + "RUN helm3 repo add jetstack https://charts.jetstack.io\n"
        + "RUN helm3 repo add stable kubernetes-charts\n"
        + "RUN helm3 repo update\n"
        + "USER root\n";
    assert_eq!(t.output(), want);
}

#[test]
fn build_with_invalid_repository_skips_it() {
    let t = TestMixin::new();

    t.mixin()
        .build(&testdata("build-input-with-invalid-config.yaml"))
        .unwrap();

    let want = default_header("v3.8.2", "v1.22.1", "amd64")
        + "USER ${BUNDLE_USER}\n"
        + "RUN helm3 repo update\n"
        + "USER root\n";
    assert_eq!(t.output(), want);
    assert_eq!(t.error_output(), "");
}

#[test]
fn build_with_partially_invalid_repositories_keeps_valid_ones() {
    let t = TestMixin::new().debug();

    t.mixin()
        .build(&testdata("build-input-with-partially-invalid-config.yaml"))
        .unwrap();

    let want = default_header("v3.8.2", "v1.22.1", "amd64")
        + "USER ${BUNDLE_USER}\n"
        + "RUN helm3 repo add stable kubernetes-charts\n"
        + "RUN helm3 repo update\n"
        + "USER root\n";
    assert_eq!(t.output(), want);
    assert_eq!(
        t.error_output(),
        "DEBUG: addition of repository failed: repository url must be supplied for \"broken\"\n"
    );
}

#[test]
fn build_with_suppressed_output() {
    let t = TestMixin::new();

    t.mixin()
        .build(&testdata("build-input-with-none-imageplatform.yaml"))
        .unwrap();

    assert_eq!(t.output(), "# helm mixin buildtime ouput was supressed\n");
}

#[test]
fn build_with_a_defined_client_version() {
    let t = TestMixin::new();

    t.mixin()
        .build(&testdata("build-input-with-version.yaml"))
        .unwrap();

    assert_eq!(t.output(), default_header("v3.8.2", "v1.22.1", "amd64"));
}

#[test]
fn build_with_unsupported_client_version() {
    let t = TestMixin::new();

    let err = t
        .mixin()
        .build(&testdata("build-input-with-unsupported-client-version.yaml"))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        r#"supplied clientVersion "v2.16.1" does not meet semver constraint "^v3.x""#
    );
    assert_eq!(t.output(), "");
}

#[test]
fn build_with_unparseable_client_version() {
    let t = TestMixin::new();

    let err = t
        .mixin()
        .build(&testdata("build-input-with-invalid-client-version.yaml"))
        .unwrap_err();

    assert!(matches!(err, Error::InvalidVersion { .. }));
    assert!(
        err.to_string()
            .starts_with(r#"supplied client version "v3.8.2.0" cannot be parsed as semver: "#)
    );
    assert_eq!(t.output(), "");
}

#[test]
fn first_build_writes_host_config() {
    let t = TestMixin::new();
    assert!(!t.host_config_path().exists());

    t.mixin().build("").unwrap();

    let written: PlatformConfig =
        serde_yaml::from_str(&fs::read_to_string(t.host_config_path()).unwrap()).unwrap();
    assert_eq!(written, PlatformConfig::builtin());
}

#[test]
fn host_profile_selected_by_image_platform() {
    let t = TestMixin::new();
    t.write_host_config(
        "platforms:\n- name: debian\n  init: |-\n    RUN apt-get update\n    RUN apt-get install -y curl\n",
    );

    t.mixin()
        .build(&testdata("build-input-with-custom-platform.yaml"))
        .unwrap();

    assert_eq!(
        t.output(),
        "ENV CLIENT_VERSION=v3.9.0\n\
         ENV API_VERSION=v1.24.0\n\
         ENV CLIENT_ARCH=arm64\n\
         RUN apt-get update\n\
         RUN apt-get install -y curl\n"
    );
}

#[test]
fn host_profile_overrides_default_but_keeps_others() {
    let t = TestMixin::new();
    t.write_host_config("platforms:\n- name: default\n  init: RUN echo custom\n");

    t.mixin().build("").unwrap();

    assert_eq!(
        t.output(),
        "ENV CLIENT_VERSION=v3.8.2\nENV API_VERSION=v1.22.1\nENV CLIENT_ARCH=amd64\nRUN echo custom\n"
    );
}

#[test]
fn malformed_host_config_aborts_before_output() {
    let t = TestMixin::new();
    t.write_host_config("platforms: 42\n");

    let err = t.mixin().build("").unwrap_err();

    assert!(matches!(err, Error::Fs(_)));
    assert_eq!(t.output(), "");
}

#[test]
fn build_is_byte_stable() {
    let first = TestMixin::new();
    let second = TestMixin::new();
    let payload = testdata("build-input-with-valid-config-multi-repos.yaml");

    first.mixin().build(&payload).unwrap();
    second.mixin().build(&payload).unwrap();

    assert_eq!(first.output(), second.output());
}
