//! Structured observability hooks for the parameter lifecycle.
//!
//! Emitters log at `info!` (success) or `warn!` (rejections, gates) with a
//! stable `event` field so log pipelines can filter on it. Nothing here
//! keeps state.

use tracing::{info, warn};

use crate::error::{ParameterError, YamlSyntaxError};
use crate::source::SubmissionKind;

/// RAII guard that tags everything logged while it lives with the
/// parameter name.
pub struct ParameterSpan {
    _span: tracing::span::EnteredSpan,
}

impl ParameterSpan {
    pub fn enter(parameter: &str) -> Self {
        let span = tracing::info_span!("yamlparam.parameter", parameter = %parameter);
        Self {
            _span: span.entered(),
        }
    }
}

/// A value was created from a submission.
pub fn emit_value_created(parameter: &str, kind: SubmissionKind) {
    info!(event = "value.created", parameter = %parameter, submission = %kind);
}

/// A submission was refused because its YAML did not parse.
pub fn emit_submission_rejected(parameter: &str, kind: SubmissionKind, error: &ParameterError) {
    warn!(
        event = "value.rejected",
        parameter = %parameter,
        submission = %kind,
        error = %error,
    );
}

/// An execution gate was installed for an invalid value.
pub fn emit_gate_installed(parameter: &str, error: &YamlSyntaxError) {
    warn!(event = "gate.installed", parameter = %parameter, detail = %error);
}

/// A live-validation query was answered.
pub fn emit_live_validation(resource: &str, ok: bool) {
    info!(event = "form.validated", resource = %resource, ok = ok);
}
