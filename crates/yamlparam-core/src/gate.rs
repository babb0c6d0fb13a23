//! Execution-time gate for parameter values.
//!
//! The execution environment asks every value for a gate right before a
//! step runs, whether or not the value was validated on submission. A gate
//! exists only for invalid values and always fails when set up.

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result, YamlSyntaxError};
use crate::parameter::ParameterValue;

/// A pending failure for one invalid parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionGate {
    parameter: String,
    value: String,
    error: YamlSyntaxError,
}

impl ExecutionGate {
    pub(crate) fn new(parameter: &str, value: &str, error: YamlSyntaxError) -> Self {
        Self {
            parameter: parameter.to_string(),
            value: value.to_string(),
            error,
        }
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter
    }

    pub fn message(&self) -> String {
        format!(
            "Invalid value for parameter [{}] specified: {}",
            self.parameter, self.value
        )
    }

    /// Called by the execution environment before the step starts.
    ///
    /// # Errors
    ///
    /// Always returns [`ParameterError::ExecutionGateFailure`].
    pub fn set_up(&self) -> Result<()> {
        Err(ParameterError::ExecutionGateFailure {
            parameter: self.parameter.clone(),
            message: self.message(),
            source: self.error.clone(),
        })
    }
}

/// Check every value's gate, failing on the first invalid one.
pub fn guard_execution<'a, I>(values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ParameterValue>,
{
    for value in values {
        if let Some(gate) = value.create_execution_gate() {
            tracing::warn!(
                event = "gate.blocked",
                parameter = %gate.parameter_name(),
                "execution step aborted by parameter gate"
            );
            gate.set_up()?;
        }
    }
    Ok(())
}

/// Run `step` only when no value installs a gate.
pub fn run_gated<'a, I, T, F>(values: I, step: F) -> Result<T>
where
    I: IntoIterator<Item = &'a ParameterValue>,
    F: FnOnce() -> T,
{
    guard_execution(values)?;
    Ok(step())
}
