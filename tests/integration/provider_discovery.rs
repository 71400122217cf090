//! Discovery, display names and schema negotiation against real scripts

use watch_dashboard::diagnostics::{Diagnostic, MemorySink};
use watch_dashboard::provider::{list_providers, ConfigField, ProviderRegistry};

use crate::integration::{short_timeouts, Fixture, ECHO_PROVIDER};

#[test]
fn lists_only_executables_sorted() {
    let fx = Fixture::new();
    fx.provider("render", ECHO_PROVIDER);
    fx.provider("fly", ECHO_PROVIDER);
    fx.provider("README", ECHO_PROVIDER);
    fx.provider("notes.md", ECHO_PROVIDER);
    fx.plain_file("vercel", "#!/bin/sh\n");
    std::fs::create_dir(fx.providers_dir.join("subdir")).unwrap();

    let sink = MemorySink::new();
    assert_eq!(list_providers(&fx.providers_dir, &*sink), vec!["fly", "render"]);
    assert!(sink.events().is_empty());
}

#[test]
fn missing_directory_lists_nothing() {
    let fx = Fixture::new();
    let sink = MemorySink::new();
    assert!(list_providers(&fx.project_dir().join("nope"), &*sink).is_empty());
    assert!(matches!(
        sink.events().as_slice(),
        [Diagnostic::ProvidersDirUnreadable { .. }]
    ));
}

#[test]
fn display_name_comes_from_name_command() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    let (registry, _) = fx.registry();
    assert_eq!(registry.display_name("echo"), "Echo Deploys");
}

#[test]
fn display_name_falls_back_to_id() {
    let fx = Fixture::new();
    fx.provider("failing", "  name) echo partial; exit 1 ;;");
    fx.provider("blank", "  name) echo '   ' ;;");
    fx.provider("slow", "  name) sleep 5 ;;");
    let (registry, sink) = fx.registry();
    let registry = registry.with_timeouts(short_timeouts());

    assert_eq!(registry.display_name("failing"), "failing");
    assert_eq!(registry.display_name("blank"), "blank");
    assert_eq!(registry.display_name("slow"), "slow");
    assert_eq!(registry.display_name("absent"), "absent");

    let failures = sink
        .events()
        .into_iter()
        .filter(|d| matches!(d, Diagnostic::MetadataFailed { .. }))
        .count();
    assert_eq!(failures, 2, "non-zero exit and timeout are both reported");
}

#[test]
fn config_fields_are_normalized() {
    let fx = Fixture::new();
    fx.provider(
        "schema",
        r#"  config) echo '{"fields":[{"key":"token","required":true},{"key":"limit","default":25},{"key":"token","label":"again"},{"key":"preview","default":true}]}' ;;"#,
    );
    let (registry, sink) = fx.registry();

    let fields = registry.config_fields("schema");
    assert_eq!(
        fields,
        vec![
            ConfigField::new("token").required(),
            ConfigField::new("limit").with_default("25"),
            ConfigField::new("preview").with_default("True"),
        ]
    );
    assert!(sink.events().contains(&Diagnostic::DuplicateField {
        provider: "schema".to_string(),
        key: "token".to_string(),
    }));

    assert_eq!(registry.config_fields("schema"), fields);
}

#[test]
fn config_fields_empty_on_bad_output() {
    let fx = Fixture::new();
    fx.provider("garbage", "  config) echo 'not json' ;;");
    fx.provider("nofields", "  config) echo '{}' ;;");
    fx.provider("broken", "  config) exit 2 ;;");
    let (registry, _) = fx.registry();

    assert!(registry.config_fields("garbage").is_empty());
    assert!(registry.config_fields("nofields").is_empty());
    assert!(registry.config_fields("broken").is_empty());
    assert!(registry.config_fields("absent").is_empty());
}

#[test]
fn registry_rescans_on_every_call() {
    let fx = Fixture::new();
    let registry = ProviderRegistry::new(&fx.providers_dir);
    assert!(registry.list().is_empty());
    fx.provider("late", ECHO_PROVIDER);
    assert_eq!(registry.list(), vec!["late"]);
    assert!(registry.contains("late"));
}
