//! Descriptor of the YAML parameter kind and its live-validation query.

use serde::{Deserialize, Serialize};

use crate::authorization::{ConfigurableResource, Permission};
use crate::checker::YamlSyntaxChecker;
use crate::error::Result;
use crate::parameter::YAML_PARAMETER_SYMBOL;

pub const DISPLAY_NAME: &str = "Validating Yaml Parameter";

/// Feedback returned to the form while the user is typing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormValidation {
    Ok,
    Error { message: String },
}

impl FormValidation {
    pub fn is_ok(&self) -> bool {
        matches!(self, FormValidation::Ok)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FormValidation::Ok => None,
            FormValidation::Error { message } => Some(message),
        }
    }
}

/// Describes the parameter kind to the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlParameterDescriptor;

impl YamlParameterDescriptor {
    pub fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    pub fn symbol(&self) -> &'static str {
        YAML_PARAMETER_SYMBOL
    }

    /// Check `value` for the form without creating a parameter value.
    ///
    /// Without a resource there is nothing being configured and the answer
    /// is always `Ok`. With one, the caller needs `Configure` on it.
    /// A non-empty `failed_validation_message` replaces the parser detail.
    ///
    /// # Errors
    ///
    /// `ParameterError::AccessDenied` when the caller may not configure
    /// `resource`.
    pub fn validate(
        &self,
        value: Option<&str>,
        failed_validation_message: Option<&str>,
        resource: Option<&dyn ConfigurableResource>,
    ) -> Result<FormValidation> {
        let Some(resource) = resource else {
            return Ok(FormValidation::Ok);
        };
        resource.check_permission(Permission::Configure)?;

        let result = YamlSyntaxChecker::check(value);
        let verdict = match result.error_detail() {
            None => FormValidation::Ok,
            Some(detail) => match failed_validation_message {
                Some(custom) if !custom.is_empty() => FormValidation::Error {
                    message: custom.to_string(),
                },
                _ => FormValidation::Error {
                    message: format!("Invalid yaml string: {detail}"),
                },
            },
        };
        crate::obs::emit_live_validation(resource.resource_name(), verdict.is_ok());
        Ok(verdict)
    }
}
