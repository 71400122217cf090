//! Properties of the provider wire helpers

use proptest::prelude::*;
use serde_json::Value;
use watch_dashboard::diagnostics::MemorySink;
use watch_dashboard::provider::protocol::{env_var_name, parse_deploy_lines, stringify_value};

proptest! {
    #[test]
    fn env_var_names_are_prefixed_uppercase(key in "[a-z_][a-z0-9_]{0,15}") {
        let name = env_var_name(&key);
        prop_assert!(name.starts_with("DEPLOY_WATCH_"));
        prop_assert_eq!(&name["DEPLOY_WATCH_".len()..], key.to_uppercase());
    }

    #[test]
    fn strings_stringify_unchanged(text in ".*") {
        prop_assert_eq!(stringify_value(&Value::String(text.clone())), text);
    }

    #[test]
    fn integers_stringify_as_decimal(n in any::<i64>()) {
        prop_assert_eq!(stringify_value(&Value::from(n)), n.to_string());
    }

    #[test]
    fn one_record_per_object_line(ids in proptest::collection::vec("[a-z0-9]{1,8}", 0..20)) {
        let stdout: String = ids
            .iter()
            .map(|id| format!("{{\"id\":\"{}\"}}\nnot json\n", id))
            .collect();
        let sink = MemorySink::new();
        let records = parse_deploy_lines(&stdout, sink.as_ref());
        let parsed: Vec<String> = records
            .iter()
            .map(|r| r.get("id").unwrap().into_owned())
            .collect();
        prop_assert_eq!(parsed, ids);
    }
}
