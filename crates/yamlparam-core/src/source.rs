//! The capability contract a parameter kind registers with the host.
//!
//! A host hands submissions to a [`ParameterSource`] and gets back either
//! a value or a [`ParameterError`](crate::ParameterError). How the host
//! discovers sources (config `type` symbols, a registry, ...) is outside
//! this trait.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which entry point a submission arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    /// Interactive form submit with a structured payload.
    Structured,
    /// Programmatic submit with raw key/value entries.
    Raw,
    /// Command-line argument.
    CommandLine,
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionKind::Structured => write!(f, "structured"),
            SubmissionKind::Raw => write!(f, "raw"),
            SubmissionKind::CommandLine => write!(f, "command_line"),
        }
    }
}

/// Payload of a single submission.
#[derive(Debug, Clone, Copy)]
pub enum Submission<'a> {
    /// Structured payload as decoded by the host's form binder.
    Structured(&'a serde_json::Value),
    /// Zero or more raw entries submitted under the parameter's name.
    Raw(&'a [String]),
    /// The single command-line argument, possibly absent.
    CommandLine(Option<&'a str>),
}

impl Submission<'_> {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Structured(_) => SubmissionKind::Structured,
            Submission::Raw(_) => SubmissionKind::Raw,
            Submission::CommandLine(_) => SubmissionKind::CommandLine,
        }
    }
}

/// A parameter kind that can produce values from host submissions.
pub trait ParameterSource {
    type Value;

    fn name(&self) -> &str;

    /// A fresh value built from the configured default.
    fn default_value(&self) -> Self::Value;

    fn create_from(&self, submission: Submission<'_>) -> Result<Self::Value>;
}

/// Raw key/value extraction: every entry submitted under a name.
pub trait ParameterLookup {
    fn parameter_values(&self, name: &str) -> &[String];
}

impl<S: BuildHasher> ParameterLookup for HashMap<String, Vec<String>, S> {
    fn parameter_values(&self, name: &str) -> &[String] {
        self.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ParameterLookup for BTreeMap<String, Vec<String>> {
    fn parameter_values(&self, name: &str) -> &[String] {
        self.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
