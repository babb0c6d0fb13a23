//! End-to-end submission scenarios across the three creation paths.

use std::borrow::Cow;
use std::collections::HashMap;

use yamlparam_core::{
    ParameterError, ParameterSource, ParameterValue, StringParameterValue, Submission,
    YamlParameterDefinition, YamlParameterValue,
};

fn dummy() -> YamlParameterDefinition {
    YamlParameterDefinition::new(
        "DUMMY",
        "default: value",
        Some("error".to_string()),
        "description",
    )
    .expect("valid definition")
}

fn request(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
        .collect()
}

// ---- raw key/value ----

#[test]
fn raw_submission_without_entries_returns_default() {
    let d = dummy();
    let v = d.create_value_from_request(&request(&[])).unwrap();
    assert_eq!(v, YamlParameterValue::new("DUMMY", "default: value"));

    let v = d
        .create_value_from_request(&request(&[("DUMMY", &[])]))
        .unwrap();
    assert_eq!(v.value(), "default: value");
}

#[test]
fn raw_submission_with_duplicate_colon_is_rejected() {
    let d = dummy();
    let err = d
        .create_value_from_request(&request(&[("DUMMY", &["key1: value1: value2"])]))
        .unwrap_err();
    assert!(matches!(err, ParameterError::ConfigurationRejected { .. }));
    let msg = err.to_string();
    assert!(msg.contains("DUMMY"));
    assert!(msg.contains("key1: value1: value2"));
}

#[test]
fn raw_submission_ignores_other_parameters() {
    let d = dummy();
    let v = d
        .create_value_from_request(&request(&[("OTHER", &["x: : y"]), ("DUMMY", &["a: 1"])]))
        .unwrap();
    assert_eq!(v.value(), "a: 1");
}

// ---- command line ----

#[test]
fn cli_empty_string_returns_default() {
    let v = dummy().create_value_from_cli(Some("")).unwrap();
    assert_eq!(v.value(), "default: value");
}

#[test]
fn cli_invalid_yaml_aborts() {
    let err = dummy().create_value_from_cli(Some("key: : value")).unwrap_err();
    assert!(matches!(err, ParameterError::InvocationAborted { .. }));
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn cli_preserves_special_characters_unicode_and_comments() {
    let d = dummy();
    for text in [
        "key: 'value with special chars: !@#$%^&*()'",
        "key: 'value with unicode: 你好世界'",
        "# This is a comment\nkey: value # Inline comment",
    ] {
        assert_eq!(d.create_value_from_cli(Some(text)).unwrap().value(), text);
    }
}

// ---- structured ----

#[test]
fn structured_submission_roundtrip() {
    let d = dummy();
    let payload = serde_json::json!({ "name": "DUMMY", "value": "---\nkey1: value1\n" });
    let v = d.create_value_from_json(&payload).unwrap();
    assert_eq!(v, YamlParameterValue::new("DUMMY", "---\nkey1: value1\n"));
}

#[test]
fn structured_submission_rejects_invalid_yaml() {
    let payload = serde_json::json!({ "name": "DUMMY", "value": "---\nkey1: value1: value2" });
    let err = dummy().create_value_from_json(&payload).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Req: Invalid YAML syntax for parameter [DUMMY] specified:"));
}

// ---- copy with new default ----

#[test]
fn copy_with_unrelated_kind_returns_same_instance() {
    let d = dummy();
    let copied =
        d.copy_with_default_value(&ParameterValue::String(StringParameterValue::new("DUMMY", "x")));
    assert!(matches!(copied, Cow::Borrowed(same) if std::ptr::eq(same, &d)));
}

#[test]
fn copy_with_yaml_value_leaves_original_untouched() {
    let d = dummy();
    let copied = d
        .copy_with_default_value(&YamlParameterValue::new("DUMMY", "new: value").into())
        .into_owned();
    assert_eq!(copied.default_value(), "new: value");
    assert_eq!(d.default_value(), "default: value");
}

// ---- trait surface ----

#[test]
fn parameter_source_default_is_fresh_and_unvalidated() {
    let d = YamlParameterDefinition::new("BROKEN", "a: : b", None, "").unwrap();
    let v = ParameterSource::default_value(&d);
    assert_eq!(v.value(), "a: : b");
    assert!(d.create_from(Submission::CommandLine(None)).is_ok());
    assert!(d.create_from(Submission::CommandLine(Some("a: : b"))).is_err());
}
