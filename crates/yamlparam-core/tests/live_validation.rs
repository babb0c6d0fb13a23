//! Live validation for configuration forms.

use yamlparam_core::{
    ConfigurableResource, FormValidation, Grants, ParameterError, Permission,
    YamlParameterDescriptor,
};

struct LockedItem;

impl ConfigurableResource for LockedItem {
    fn resource_name(&self) -> &str {
        "locked"
    }

    fn has_permission(&self, _permission: Permission) -> bool {
        false
    }
}

fn item() -> Grants {
    Grants::none("deploy").with(Permission::Configure)
}

#[test]
fn invalid_yaml_without_custom_message() {
    let item = item();
    let res = YamlParameterDescriptor
        .validate(Some("key: : value"), Some(""), Some(&item))
        .unwrap();
    assert!(!res.is_ok());
    assert!(res.message().unwrap().starts_with("Invalid yaml string:"));
}

#[test]
fn invalid_yaml_with_custom_message() {
    let item = item();
    let res = YamlParameterDescriptor
        .validate(Some("key: : value"), Some("Custom error"), Some(&item))
        .unwrap();
    assert_eq!(
        res,
        FormValidation::Error {
            message: "Custom error".to_string()
        }
    );
}

#[test]
fn invalid_complex_yaml_with_custom_message() {
    let doc = "---\nkey1: value1\nkey2:\n  nested: value2\n  array:\n    - item1\n    - item2\n  invalid: : value\n";
    let item = item();
    let res = YamlParameterDescriptor
        .validate(Some(doc), Some("Custom error"), Some(&item))
        .unwrap();
    assert_eq!(res.message(), Some("Custom error"));
}

#[test]
fn no_context_always_ok() {
    let res = YamlParameterDescriptor
        .validate(Some("a: [1"), None, None)
        .unwrap();
    assert_eq!(res, FormValidation::Ok);
}

#[test]
fn denied_context_propagates_error() {
    let err = YamlParameterDescriptor
        .validate(Some("a: 1"), None, Some(&LockedItem))
        .unwrap_err();
    match err {
        ParameterError::AccessDenied {
            resource,
            permission,
        } => {
            assert_eq!(resource, "locked");
            assert_eq!(permission, Permission::Configure);
        }
        other => panic!("expected AccessDenied, got {other:?}"),
    }
}
