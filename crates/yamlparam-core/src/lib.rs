//! yamlparam core library
//!
//! A job parameter whose value must be syntactically valid YAML:
//! - `checker`: safe YAML syntax check
//! - `value` / `definition`: the value lifecycle and its three creation paths
//! - `gate`: execution-time re-validation
//! - `descriptor`: live validation for configuration forms

pub mod authorization;
pub mod checker;
pub mod config;
pub mod definition;
pub mod descriptor;
pub mod error;
pub mod gate;
pub mod obs;
pub mod parameter;
pub mod source;
pub mod telemetry;
pub mod value;

pub use authorization::{ConfigurableResource, Grants, Permission};
pub use checker::{ValidationResult, YamlSyntaxChecker};
pub use config::JobConfig;
pub use definition::YamlParameterDefinition;
pub use descriptor::{FormValidation, YamlParameterDescriptor};
pub use error::{ParameterError, Result, YamlSyntaxError};
pub use gate::{guard_execution, run_gated, ExecutionGate};
pub use obs::{
    emit_gate_installed, emit_live_validation, emit_submission_rejected, emit_value_created,
    ParameterSpan,
};
pub use parameter::{
    ParameterDefinition, ParameterValue, StringParameterDefinition, StringParameterValue,
    YAML_PARAMETER_SYMBOL,
};
pub use source::{ParameterLookup, ParameterSource, Submission, SubmissionKind};
pub use telemetry::init_tracing;
pub use value::YamlParameterValue;

/// yamlparam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
