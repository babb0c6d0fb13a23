//! The declared YAML parameter and its three creation paths.
//!
//! | Path          | Invalid YAML                     | Nothing submitted |
//! |---------------|----------------------------------|-------------------|
//! | structured    | `ConfigurationRejected`          | n/a               |
//! | raw key/value | `ConfigurationRejected`          | default value     |
//! | command line  | `InvocationAborted`              | default value     |
//!
//! Defaults are never validated here; the execution gate catches them.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::checker::YamlSyntaxChecker;
use crate::error::{ParameterError, Result};
use crate::obs::{self, ParameterSpan};
use crate::parameter::ParameterValue;
use crate::source::{ParameterLookup, ParameterSource, Submission, SubmissionKind};
use crate::value::YamlParameterValue;

/// A configured parameter whose values must be valid YAML.
///
/// Immutable once built; [`copy_with_default_value`](Self::copy_with_default_value)
/// produces a new definition instead of changing this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YamlParameterDefinition {
    name: String,
    #[serde(default)]
    default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failed_validation_message: Option<String>,
    #[serde(default)]
    description: String,
}

/// Shape of a structured (form) submission.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredPayload {
    #[serde(default)]
    name: Option<String>,
    value: String,
    #[serde(default)]
    failed_validation_message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl YamlParameterDefinition {
    /// # Errors
    ///
    /// `ParameterError::InvalidDefinition` when `name` is empty.
    pub fn new(
        name: impl Into<String>,
        default_value: impl Into<String>,
        failed_validation_message: Option<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let def = Self {
            name: name.into(),
            default_value: default_value.into(),
            failed_validation_message,
            description: description.into(),
        };
        def.validate()?;
        Ok(def)
    }

    /// Check invariants of a definition that came from deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ParameterError::InvalidDefinition(
                "parameter name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Alias of [`default_value`](Self::default_value) used by form rendering.
    pub fn value(&self) -> &str {
        &self.default_value
    }

    pub fn failed_validation_message(&self) -> Option<&str> {
        self.failed_validation_message.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// A fresh value holding the default text. Not validated.
    pub fn default_parameter_value(&self) -> YamlParameterValue {
        YamlParameterValue::new(&self.name, &self.default_value)
    }

    /// Interactive form path: decode the bound payload, then validate it.
    pub fn create_value_from_json(&self, payload: &serde_json::Value) -> Result<YamlParameterValue> {
        let _span = ParameterSpan::enter(&self.name);
        let bound = StructuredPayload::deserialize(payload).map_err(|e| {
            ParameterError::MalformedSubmission {
                parameter: self.name.clone(),
                reason: e.to_string(),
            }
        })?;

        if let Err(source) = YamlSyntaxChecker::check(Some(&bound.value)).into_result() {
            let err = ParameterError::ConfigurationRejected {
                parameter: self.name.clone(),
                message: format!(
                    "Req: Invalid YAML syntax for parameter [{}] specified: {}",
                    self.name, bound.value
                ),
                source,
            };
            obs::emit_submission_rejected(&self.name, SubmissionKind::Structured, &err);
            return Err(err);
        }

        let name = bound
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.name.clone());
        let mut value = YamlParameterValue::new(name, bound.value)
            .with_failed_validation_message(bound.failed_validation_message);
        if let Some(description) = bound.description {
            value = value.with_description(description);
        }
        obs::emit_value_created(&self.name, SubmissionKind::Structured);
        Ok(value)
    }

    /// Raw key/value path, looking up entries under this parameter's name.
    pub fn create_value_from_request<R>(&self, request: &R) -> Result<YamlParameterValue>
    where
        R: ParameterLookup + ?Sized,
    {
        self.create_value_from_raw(request.parameter_values(&self.name))
    }

    /// Raw key/value path. Only the first entry is used; no entries at
    /// all yields the default value.
    pub fn create_value_from_raw(&self, values: &[String]) -> Result<YamlParameterValue> {
        let _span = ParameterSpan::enter(&self.name);
        let Some(first) = values.first() else {
            tracing::debug!(parameter = %self.name, "no raw entries, using default");
            return Ok(self.default_parameter_value());
        };

        if let Err(source) = YamlSyntaxChecker::check(Some(first)).into_result() {
            let err = ParameterError::ConfigurationRejected {
                parameter: self.name.clone(),
                message: format!(
                    "Req: Invalid value for parameter [{}] specified: {}",
                    self.name, first
                ),
                source,
            };
            obs::emit_submission_rejected(&self.name, SubmissionKind::Raw, &err);
            return Err(err);
        }

        obs::emit_value_created(&self.name, SubmissionKind::Raw);
        Ok(YamlParameterValue::new(&self.name, first.as_str()))
    }

    /// Command-line path. `None` or `""` yields the default value; the
    /// created value carries this definition's failure message.
    pub fn create_value_from_cli(&self, value: Option<&str>) -> Result<YamlParameterValue> {
        let _span = ParameterSpan::enter(&self.name);
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(self.default_parameter_value()),
        };

        if let Err(source) = YamlSyntaxChecker::check(Some(value)).into_result() {
            let err = ParameterError::InvocationAborted {
                parameter: self.name.clone(),
                message: format!(
                    "Invalid value for parameter [{}] specified: {}",
                    self.name, value
                ),
                source,
            };
            obs::emit_submission_rejected(&self.name, SubmissionKind::CommandLine, &err);
            return Err(err);
        }

        obs::emit_value_created(&self.name, SubmissionKind::CommandLine);
        Ok(YamlParameterValue::new(&self.name, value)
            .with_failed_validation_message(self.failed_validation_message.clone()))
    }

    /// New definition with `candidate`'s text as default when it is a YAML
    /// value; any other kind leaves this definition as is.
    pub fn copy_with_default_value(&self, candidate: &ParameterValue) -> Cow<'_, Self> {
        match candidate {
            ParameterValue::Yaml(value) => Cow::Owned(Self {
                name: self.name.clone(),
                default_value: value.value().to_string(),
                failed_validation_message: self.failed_validation_message.clone(),
                description: self.description.clone(),
            }),
            _ => Cow::Borrowed(self),
        }
    }
}

impl ParameterSource for YamlParameterDefinition {
    type Value = YamlParameterValue;

    fn name(&self) -> &str {
        &self.name
    }

    fn default_value(&self) -> YamlParameterValue {
        self.default_parameter_value()
    }

    fn create_from(&self, submission: Submission<'_>) -> Result<YamlParameterValue> {
        match submission {
            Submission::Structured(payload) => self.create_value_from_json(payload),
            Submission::Raw(values) => self.create_value_from_raw(values),
            Submission::CommandLine(value) => self.create_value_from_cli(value),
        }
    }
}
