//! CLI integration tests for Rig.
//!
//! These tests run the `rig` binary against temporary projects and check the
//! composed configuration it prints.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Get the rig binary command with a clean, production environment.
fn rig(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rig").unwrap();
    cmd.env("NODE_ENV", "production")
        .env("RIGGING_HOME", home)
        .env_remove("CI")
        .env_remove("TRAVIS_BRANCH")
        .env_remove("BRANCH");
    cmd
}

/// Create a temporary project with a package manifest.
fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("package.json"), manifest).unwrap();
    tmp
}

fn composed(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "rig failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ============================================================================
// rig build
// ============================================================================

#[test]
fn test_build_default_preset() {
    let tmp = project(r#"{ "name": "app" }"#);

    let config = composed(rig(tmp.path()).args(["build", "--compact"]).current_dir(tmp.path()));

    assert_eq!(config["output"]["filename"], "[name].[chunkhash].v1.js");
    assert_eq!(config["devtool"], "source-map");
    assert!(config["plugins"]["html"].is_array());
    assert_eq!(config["plugins"]["named-chunks"][0], "[function]");
}

#[test]
fn test_build_node_preset_with_options() {
    let tmp = project(r#"{ "name": "api" }"#);

    let config = composed(
        rig(tmp.path())
            .args(["build", "--preset", "node-preset", "--options", r#"{"cacheVersion":"v8"}"#])
            .current_dir(tmp.path()),
    );

    assert_eq!(config["output"]["filename"], "[name].[chunkhash].v8.js");
    assert_eq!(config["output"]["libraryTarget"], "commonjs2");
    assert_eq!(config["externals"][0], "[node_modules]");
    assert_eq!(config["module"][0]["name"], "lint");
}

#[test]
fn test_build_reads_project_config() {
    let tmp = project(r#"{ "name": "kit" }"#);
    fs::create_dir_all(tmp.path().join(".rigging")).unwrap();
    fs::write(
        tmp.path().join(".rigging/config.toml"),
        "[preset]\nname = \"library-preset\"\n\n[options]\nlibrary = \"Kit\"\n",
    )
    .unwrap();

    let config = composed(rig(tmp.path()).arg("build").current_dir(tmp.path()));

    assert_eq!(config["output"]["library"], "Kit");
    assert_eq!(config["output"]["libraryTarget"], "umd");
    assert!(config["output"]["path"].as_str().unwrap().ends_with("lib"));
    assert!(config["plugins"].get("html").is_none());
}

#[test]
fn test_build_banner_with_source_map_support() {
    let tmp = project(r#"{ "name": "kit", "dependencies": { "source-map-support": "^0.5.0" } }"#);

    let config = composed(
        rig(tmp.path())
            .args(["build", "--preset", "library-preset", "--options", r#"{"library":true}"#])
            .current_dir(tmp.path()),
    );

    assert_eq!(config["plugins"]["banner"][0]["entryOnly"], true);
}

#[test]
fn test_build_components_lists_directory() {
    let tmp = project(r#"{ "name": "kit" }"#);
    let components = tmp.path().join("src/components");
    fs::create_dir_all(&components).unwrap();
    fs::write(components.join("Button.js"), "").unwrap();
    fs::write(components.join("Modal.js"), "").unwrap();

    let config = composed(
        rig(tmp.path())
            .args(["build", "--preset", "react-components-preset"])
            .current_dir(tmp.path()),
    );

    let entries = config["entry"].as_object().unwrap();
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["Button", "Modal"]);
}

#[test]
fn test_run_list() {
    let tmp = project(r#"{ "name": "api" }"#);

    rig(tmp.path())
        .args(["build", "--preset", "node-preset", "--run-list"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("node-preset\nlint\nairbnb-base\nnode\n"));
}

// ============================================================================
// rig start / rig test
// ============================================================================

#[test]
fn test_start_development() {
    let tmp = project(r#"{ "name": "app" }"#);

    let config = composed(
        rig(tmp.path())
            .env("NODE_ENV", "development")
            .args(["start", "--compact"])
            .current_dir(tmp.path()),
    );

    assert_eq!(config["output"]["filename"], "[name].js");
    assert_eq!(config["devtool"], "eval-source-map");
    assert!(config["plugins"]["hot"].is_array());
}

#[test]
fn test_mode_flag_overrides_node_env() {
    let tmp = project(r#"{ "name": "app" }"#);

    let config = composed(
        rig(tmp.path())
            .args(["test", "--mode", "test"])
            .current_dir(tmp.path()),
    );

    assert!(config.get("devtool").is_none());
}

#[test]
fn test_ci_feature_branch_disables_source_maps() {
    let tmp = project(r#"{ "name": "app" }"#);

    let config = composed(
        rig(tmp.path())
            .env("CI", "true")
            .env("TRAVIS_BRANCH", "feature/x")
            .arg("build")
            .current_dir(tmp.path()),
    );

    assert_eq!(config["devtool"], false);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_preset_fails() {
    let tmp = project(r#"{ "name": "app" }"#);

    rig(tmp.path())
        .args(["build", "--preset", "vue-preset"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown middleware `vue-preset`"))
        .stderr(predicate::str::contains("rig list"));
}

#[test]
fn test_invalid_node_env_fails() {
    let tmp = project(r#"{ "name": "app" }"#);

    rig(tmp.path())
        .env("NODE_ENV", "staging")
        .arg("build")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn test_invalid_option_names_middleware() {
    let tmp = project(r#"{ "name": "app" }"#);

    rig(tmp.path())
        .args(["build", "--options", r#"{"cacheVersion":""}"#])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("versioning"))
        .stderr(predicate::str::contains("while applying react-preset -> versioning"));
}

#[test]
fn test_invalid_options_json() {
    let tmp = project(r#"{ "name": "app" }"#);

    rig(tmp.path())
        .args(["build", "--options", "{nope"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

// ============================================================================
// rig list / rig completions
// ============================================================================

#[test]
fn test_list_shows_presets() {
    let tmp = TempDir::new().unwrap();

    rig(tmp.path())
        .args(["list", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("node-preset"))
        .stdout(predicate::str::contains("library-preset"))
        .stdout(predicate::str::contains("loader-merge:lint:eslint"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    rig(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rig"));
}
