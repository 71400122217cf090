//! The watch-dashboard binary driven through its command line

use std::path::Path;
use std::process::{Command, Output};

use crate::integration::{Fixture, ECHO_PROVIDER};

fn run(fx: &Fixture, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_watch-dashboard"))
        .arg("--quiet")
        .arg("--project-dir")
        .arg(fx.project_dir())
        .arg("--providers-dir")
        .arg(&fx.providers_dir)
        .args(args)
        .env("XDG_CONFIG_HOME", fx.project_dir().join("xdg"))
        .env_remove("WATCH_DASHBOARD__PROVIDERS_DIR")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stored(project_dir: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(project_dir.join(".deploy-watch.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn configure_and_fetch_deploys() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);

    let out = run(&fx, &["providers", "--format", "json"]);
    assert!(out.status.success());
    let providers: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(providers["total"], 1);
    assert_eq!(providers["providers"][0]["selected"], false);

    let out = run(&fx, &["config", "use", "echo"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Using provider: echo (Echo Deploys)"));

    let out = run(&fx, &["config", "set", "api_token", "abc"]);
    assert!(out.status.success());
    assert_eq!(stored(fx.project_dir())["echo"]["api_token"], "abc");
    assert_eq!(stored(fx.project_dir())["provider"], "echo");

    let out = run(&fx, &["deploys", "--format", "json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let deploys: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(deploys["provider"], "echo");
    assert_eq!(deploys["deploys"][0]["token"], "abc");
    assert_eq!(deploys["deploys"][0]["team"], "core");
    assert_eq!(deploys["deploys"][0]["elapsed"], "2m 5s");

    let out = run(&fx, &["deploys"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("2m 5s"));
}

#[test]
fn unknown_field_is_rejected() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    assert!(run(&fx, &["config", "use", "echo"]).status.success());

    let out = run(&fx, &["config", "set", "bogus", "x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("has no field 'bogus'"));
}

#[test]
fn unknown_provider_is_rejected() {
    let fx = Fixture::new();
    let out = run(&fx, &["config", "use", "ghost"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown provider: ghost"));
    assert!(!fx.project_dir().join(".deploy-watch.json").exists());
}

#[test]
fn failing_provider_exits_non_zero() {
    let fx = Fixture::new();
    fx.provider("broken", "  list) exit 4 ;;");
    assert!(run(&fx, &["config", "use", "broken"]).status.success());

    let out = run(&fx, &["deploys"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Provider exited with status 4"));
}

#[test]
fn deploys_without_provider_succeeds_with_hint() {
    let fx = Fixture::new();
    let out = run(&fx, &["deploys"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No provider configured."));
}

#[test]
fn unset_and_reset() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    assert!(run(&fx, &["config", "set", "--provider", "echo", "team", "web"])
        .status
        .success());
    assert_eq!(stored(fx.project_dir())["echo"]["team"], "web");

    let out = run(&fx, &["config", "unset", "--provider", "echo", "team"]);
    assert!(stdout(&out).contains("Removed echo.team"));

    let out = run(&fx, &["config", "reset"]);
    assert!(out.status.success());
    assert!(!fx.project_dir().join(".deploy-watch.json").exists());
}
