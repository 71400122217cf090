//! Deploy fetching end to end through executable providers

use watch_dashboard::diagnostics::Diagnostic;
use watch_dashboard::error::FetchError;
use watch_dashboard::fetch::fetch_deploys;
use watch_dashboard::store::{ConfigStore, JsonFileStore, StoredConfig};

use crate::integration::{short_timeouts, Fixture, ECHO_PROVIDER};

fn store_for(fx: &Fixture, provider: &str) -> JsonFileStore {
    let store = JsonFileStore::for_project(fx.project_dir());
    let mut config = StoredConfig::new();
    config.set_provider(provider);
    store.write(&config).unwrap();
    store
}

#[test]
fn stored_values_and_defaults_are_injected() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    let store = store_for(&fx, "echo");
    let mut config = store.read();
    config.set_field("echo", "api_token", "abc");
    store.write(&config).unwrap();
    let (registry, _) = fx.registry();

    let records = fetch_deploys(&store, &registry).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("token").as_deref(), Some("abc"));
    assert_eq!(records[0].get("team").as_deref(), Some("core"));
    assert_eq!(
        records[0].keys().collect::<Vec<_>>(),
        vec!["id", "token", "team", "build_started", "deploy_finished"]
    );
}

#[test]
fn fetch_leaves_store_untouched() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    let store = store_for(&fx, "echo");
    let before = std::fs::read_to_string(store.path()).unwrap();
    let (registry, _) = fx.registry();

    fetch_deploys(&store, &registry).unwrap();
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn malformed_lines_are_skipped() {
    let fx = Fixture::new();
    fx.provider(
        "noisy",
        r#"  list)
    echo '{"id":"1"}'
    echo 'bad-json'
    echo ''
    echo '[1,2]'
    echo '{"id":"2"}'
    ;;"#,
    );
    let store = store_for(&fx, "noisy");
    let (registry, sink) = fx.registry();

    let records = fetch_deploys(&store, &registry).unwrap();
    let ids: Vec<String> = records
        .iter()
        .map(|r| r.get("id").unwrap().into_owned())
        .collect();
    assert_eq!(ids, vec!["1", "2"]);

    let malformed = sink
        .events()
        .into_iter()
        .filter(|d| matches!(d, Diagnostic::MalformedLine { .. }))
        .count();
    assert_eq!(malformed, 2);
}

#[test]
fn empty_output_is_success() {
    let fx = Fixture::new();
    fx.provider("quiet", "  list) ;;");
    let store = store_for(&fx, "quiet");
    let (registry, _) = fx.registry();
    assert!(fetch_deploys(&store, &registry).unwrap().is_empty());
}

#[test]
fn non_zero_exit_is_failure() {
    let fx = Fixture::new();
    fx.provider("broken", "  list) echo '{\"id\":\"1\"}'; echo 'auth failed' >&2; exit 3 ;;");
    let store = store_for(&fx, "broken");
    let (registry, sink) = fx.registry();

    let err = fetch_deploys(&store, &registry).unwrap_err();
    assert!(matches!(err, FetchError::Exited { code: Some(3) }));
    assert!(sink.events().contains(&Diagnostic::ProviderStderr {
        provider: "broken".to_string(),
        stderr: "auth failed".to_string(),
    }));
}

#[test]
fn slow_list_times_out() {
    let fx = Fixture::new();
    fx.provider("slow", "  list) sleep 10 ;;");
    let store = store_for(&fx, "slow");
    let (registry, sink) = fx.registry();
    let registry = registry.with_timeouts(short_timeouts());

    let started = std::time::Instant::now();
    let err = fetch_deploys(&store, &registry).unwrap_err();
    assert!(matches!(err, FetchError::TimedOut(_)));
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert!(sink
        .events()
        .iter()
        .any(|d| matches!(d, Diagnostic::ProviderTimedOut { .. })));
}

#[test]
fn background_child_holding_stdout_times_out() {
    let fx = Fixture::new();
    fx.provider("forking", "  list) sleep 8 & echo '{\"id\":\"1\"}' ;;");
    let store = store_for(&fx, "forking");
    let (registry, sink) = fx.registry();
    let registry = registry.with_timeouts(short_timeouts());

    let started = std::time::Instant::now();
    let err = fetch_deploys(&store, &registry).unwrap_err();
    assert!(matches!(err, FetchError::TimedOut(_)));
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert!(sink
        .events()
        .iter()
        .any(|d| matches!(d, Diagnostic::ProviderTimedOut { .. })));
}

#[test]
fn unreadable_store_reports_through_sink_and_fetches_nothing() {
    let fx = Fixture::new();
    fx.provider("echo", ECHO_PROVIDER);
    let (registry, sink) = fx.registry();
    let store = JsonFileStore::for_project(fx.project_dir()).with_sink(registry.sink());
    std::fs::write(store.path(), "{\"provider\": ").unwrap();

    assert!(fetch_deploys(&store, &registry).unwrap().is_empty());
    let events = sink.events();
    assert!(events
        .iter()
        .any(|d| matches!(d, Diagnostic::ConfigUnreadable { .. })));
    assert!(events.contains(&Diagnostic::NoProviderConfigured));
}

#[test]
fn non_executable_selection_is_empty_success() {
    let fx = Fixture::new();
    fx.plain_file("disabled", "#!/bin/sh\necho '{\"id\":\"1\"}'\n");
    let store = store_for(&fx, "disabled");
    let (registry, sink) = fx.registry();

    assert!(fetch_deploys(&store, &registry).unwrap().is_empty());
    assert!(sink
        .events()
        .iter()
        .any(|d| matches!(d, Diagnostic::ProviderNotExecutable { .. })));
}
