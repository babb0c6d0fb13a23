//! Host-side parameter kinds.
//!
//! The host stores definitions and values of several kinds side by side.
//! `type` selects the kind on the wire; `validatingYamlParameter` is the
//! symbol this crate registers, `string` is the plain kind every host has.

use serde::{Deserialize, Serialize};

use crate::definition::YamlParameterDefinition;
use crate::error::{ParameterError, Result};
use crate::gate::ExecutionGate;
use crate::source::{ParameterSource, Submission};
use crate::value::YamlParameterValue;

/// Registration symbol of the YAML parameter kind.
pub const YAML_PARAMETER_SYMBOL: &str = "validatingYamlParameter";

/// A plain, unvalidated string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringParameterValue {
    pub name: String,
    pub value: String,
}

impl StringParameterValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A plain string parameter definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringParameterDefinition {
    pub name: String,
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
struct StringPayload {
    value: String,
}

impl ParameterSource for StringParameterDefinition {
    type Value = StringParameterValue;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> StringParameterValue {
        StringParameterValue::new(&self.name, &self.default_value)
    }

    fn create_from(&self, submission: Submission<'_>) -> Result<StringParameterValue> {
        match submission {
            Submission::Structured(payload) => {
                let bound = StringPayload::deserialize(payload).map_err(|e| {
                    ParameterError::MalformedSubmission {
                        parameter: self.name.clone(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(StringParameterValue::new(&self.name, bound.value))
            }
            Submission::Raw(values) => Ok(values
                .first()
                .map(|v| StringParameterValue::new(&self.name, v.as_str()))
                .unwrap_or_else(|| self.default_value())),
            Submission::CommandLine(Some(v)) => Ok(StringParameterValue::new(&self.name, v)),
            Submission::CommandLine(None) => Ok(self.default_value()),
        }
    }
}

/// Any value the host may hand to a definition or an execution step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterValue {
    #[serde(rename = "validatingYamlParameter")]
    Yaml(YamlParameterValue),
    #[serde(rename = "string")]
    String(StringParameterValue),
}

impl ParameterValue {
    pub fn name(&self) -> &str {
        match self {
            ParameterValue::Yaml(v) => v.name(),
            ParameterValue::String(v) => &v.name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ParameterValue::Yaml(v) => v.value(),
            ParameterValue::String(v) => &v.value,
        }
    }

    /// Only YAML values ever install a gate.
    pub fn create_execution_gate(&self) -> Option<ExecutionGate> {
        match self {
            ParameterValue::Yaml(v) => v.create_execution_gate(),
            ParameterValue::String(_) => None,
        }
    }
}

impl From<YamlParameterValue> for ParameterValue {
    fn from(v: YamlParameterValue) -> Self {
        ParameterValue::Yaml(v)
    }
}

impl From<StringParameterValue> for ParameterValue {
    fn from(v: StringParameterValue) -> Self {
        ParameterValue::String(v)
    }
}

/// Any definition the host may configure on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ParameterDefinition {
    #[serde(rename = "validatingYamlParameter")]
    Yaml(YamlParameterDefinition),
    #[serde(rename = "string")]
    String(StringParameterDefinition),
}

impl ParameterDefinition {
    pub fn description(&self) -> &str {
        match self {
            ParameterDefinition::Yaml(d) => d.description(),
            ParameterDefinition::String(d) => &d.description,
        }
    }

    pub fn type_symbol(&self) -> &'static str {
        match self {
            ParameterDefinition::Yaml(_) => YAML_PARAMETER_SYMBOL,
            ParameterDefinition::String(_) => "string",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ParameterDefinition::Yaml(d) => d.validate(),
            ParameterDefinition::String(d) if d.name.trim().is_empty() => Err(
                ParameterError::InvalidDefinition("parameter name must not be empty".to_string()),
            ),
            ParameterDefinition::String(_) => Ok(()),
        }
    }

    /// Replace the default from `candidate`, keeping `self` when the kinds differ.
    pub fn copy_with_default_value(&self, candidate: &ParameterValue) -> ParameterDefinition {
        match (self, candidate) {
            (ParameterDefinition::Yaml(d), _) => {
                ParameterDefinition::Yaml(d.copy_with_default_value(candidate).into_owned())
            }
            (ParameterDefinition::String(d), ParameterValue::String(v)) => {
                ParameterDefinition::String(StringParameterDefinition {
                    default_value: v.value.clone(),
                    ..d.clone()
                })
            }
            (ParameterDefinition::String(_), _) => self.clone(),
        }
    }
}

impl ParameterSource for ParameterDefinition {
    type Value = ParameterValue;

    fn name(&self) -> &str {
        match self {
            ParameterDefinition::Yaml(d) => d.name(),
            ParameterDefinition::String(d) => &d.name,
        }
    }

    fn default_value(&self) -> ParameterValue {
        match self {
            ParameterDefinition::Yaml(d) => d.default_parameter_value().into(),
            ParameterDefinition::String(d) => ParameterSource::default_value(d).into(),
        }
    }

    fn create_from(&self, submission: Submission<'_>) -> Result<ParameterValue> {
        match self {
            ParameterDefinition::Yaml(d) => d.create_from(submission).map(Into::into),
            ParameterDefinition::String(d) => d.create_from(submission).map(Into::into),
        }
    }
}
