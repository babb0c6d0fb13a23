//! Error taxonomy for YAML parameter submission and execution.

use serde::{Deserialize, Serialize};

/// A YAML document that could not be parsed under safe semantics.
///
/// `message` is the parser's own description and already mentions the
/// position when the parser reports one; `line`/`column` repeat it in
/// structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct YamlSyntaxError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl YamlSyntaxError {
    pub(crate) fn from_parser(err: &serde_yaml::Error) -> Self {
        let location = err.location();
        Self {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }

    pub(crate) fn from_scanner(err: &yaml_rust2::ScanError) -> Self {
        let marker = err.marker();
        Self {
            message: err.to_string(),
            line: Some(marker.line()),
            column: Some(marker.col() + 1),
        }
    }

    pub(crate) fn unsafe_tag(tag: &str) -> Self {
        Self {
            message: format!("could not determine a constructor for the tag {tag}"),
            line: None,
            column: None,
        }
    }
}

/// Errors produced by the parameter lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// Invalid YAML submitted through a configuration-time path (form or
    /// raw key/value). The host surfaces this as a rejected change.
    #[error("{message}")]
    ConfigurationRejected {
        parameter: String,
        message: String,
        #[source]
        source: YamlSyntaxError,
    },

    /// Invalid YAML submitted on the command line. Terminates the command.
    #[error("{message}")]
    InvocationAborted {
        parameter: String,
        message: String,
        #[source]
        source: YamlSyntaxError,
    },

    /// A value that was never validated turned out to be invalid when the
    /// execution step was about to use it.
    #[error("{message}")]
    ExecutionGateFailure {
        parameter: String,
        message: String,
        #[source]
        source: YamlSyntaxError,
    },

    #[error("malformed submission for parameter [{parameter}]: {reason}")]
    MalformedSubmission { parameter: String, reason: String },

    #[error("access denied: {permission} on {resource}")]
    AccessDenied {
        resource: String,
        permission: crate::authorization::Permission,
    },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid parameter definition: {0}")]
    InvalidDefinition(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParameterError {
    /// Process exit status a command should terminate with.
    ///
    /// Aborts and gate failures exit with `1`; configuration and usage
    /// problems exit with `2`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParameterError::InvocationAborted { .. } | ParameterError::ExecutionGateFailure { .. } => {
                1
            }
            _ => 2,
        }
    }

    /// Name of the parameter the error concerns, when there is one.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ParameterError::ConfigurationRejected { parameter, .. }
            | ParameterError::InvocationAborted { parameter, .. }
            | ParameterError::ExecutionGateFailure { parameter, .. }
            | ParameterError::MalformedSubmission { parameter, .. } => Some(parameter),
            ParameterError::UnknownParameter(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type for parameter operations.
pub type Result<T> = std::result::Result<T, ParameterError>;
