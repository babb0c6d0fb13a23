//! Submitted YAML parameter values.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::checker::YamlSyntaxChecker;
use crate::error::{ParameterError, Result};
use crate::gate::ExecutionGate;

/// One submitted or resolved instance of a YAML parameter.
///
/// Equality and hashing look only at `(name, value)`; the failure message
/// and description are presentation details. Validity is not stored here:
/// [`create_execution_gate`](Self::create_execution_gate) re-checks the
/// text every time it is called.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ValueRecord")]
pub struct YamlParameterValue {
    name: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failed_validation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Persisted form, checked before it becomes a value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRecord {
    name: String,
    value: String,
    #[serde(default)]
    failed_validation_message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl TryFrom<ValueRecord> for YamlParameterValue {
    type Error = ParameterError;

    fn try_from(record: ValueRecord) -> Result<Self> {
        let mut value = Self::try_new(record.name, record.value)?
            .with_failed_validation_message(record.failed_validation_message);
        value.description = record.description;
        Ok(value)
    }
}

impl YamlParameterValue {
    /// Value for a name already known to be non-empty, such as one taken
    /// from a validated definition. Use [`try_new`](Self::try_new) for
    /// names from outside.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            failed_validation_message: None,
            description: None,
        }
    }

    /// # Errors
    ///
    /// `ParameterError::InvalidDefinition` when `name` is empty.
    pub fn try_new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ParameterError::InvalidDefinition(
                "parameter value name must not be empty".to_string(),
            ));
        }
        Ok(Self::new(name, value))
    }

    pub fn with_failed_validation_message(mut self, message: Option<String>) -> Self {
        self.failed_validation_message = message;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The submitted text, exactly as received.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn failed_validation_message(&self) -> Option<&str> {
        self.failed_validation_message.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Re-validate the stored text and return a gate when it is invalid.
    ///
    /// `None` means execution may proceed. A returned gate fails the step
    /// as soon as the host sets it up.
    pub fn create_execution_gate(&self) -> Option<ExecutionGate> {
        let result = YamlSyntaxChecker::check(Some(&self.value));
        match result.error {
            None => None,
            Some(error) => {
                crate::obs::emit_gate_installed(&self.name, &error);
                Some(ExecutionGate::new(&self.name, &self.value, error))
            }
        }
    }
}

impl PartialEq for YamlParameterValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for YamlParameterValue {}

impl Hash for YamlParameterValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.value.hash(state);
    }
}

impl std::fmt::Display for YamlParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(ValidatingYamlParameterValue) {}='{}'", self.name, self.value)
    }
}
