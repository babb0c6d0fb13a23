//! Execution gate: values restored from persisted state are re-validated
//! right before a step runs.

use yamlparam_core::{guard_execution, run_gated, ParameterError, ParameterValue, YamlParameterValue};

fn restore(json: &str) -> Vec<ParameterValue> {
    serde_json::from_str(json).expect("persisted values")
}

#[test]
fn forged_value_blocks_step() {
    let values = restore(
        r#"[
            {"type": "string", "name": "TARGET", "value": "prod"},
            {"type": "validatingYamlParameter", "name": "CONFIG", "value": "key: : value"}
        ]"#,
    );

    let mut ran = false;
    let err = run_gated(&values, || ran = true).unwrap_err();
    assert!(!ran);
    match err {
        ParameterError::ExecutionGateFailure { parameter, message, .. } => {
            assert_eq!(parameter, "CONFIG");
            assert_eq!(
                message,
                "Invalid value for parameter [CONFIG] specified: key: : value"
            );
        }
        other => panic!("expected ExecutionGateFailure, got {other:?}"),
    }
}

#[test]
fn valid_values_let_step_run() {
    let values = restore(
        r#"[{"type": "validatingYamlParameter", "name": "CONFIG", "value": "key: value"}]"#,
    );
    assert_eq!(run_gated(&values, || "done").unwrap(), "done");
}

#[test]
fn gate_is_recomputed_on_every_call() {
    let v = YamlParameterValue::new("CONFIG", "a: : b");
    let first = v.create_execution_gate();
    let second = v.create_execution_gate();
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn empty_value_does_not_gate() {
    let values = vec![ParameterValue::Yaml(YamlParameterValue::new("CONFIG", ""))];
    assert!(guard_execution(&values).is_ok());
}

#[test]
fn gate_failure_exit_code_is_abort() {
    let gate = YamlParameterValue::new("CONFIG", "a: [1")
        .create_execution_gate()
        .unwrap();
    assert_eq!(gate.set_up().unwrap_err().exit_code(), 1);
}
