//! YAML syntax checking under safe semantics.
//!
//! Nothing is ever constructed from the document. The text is checked in
//! two passes:
//!
//! 1. `serde_yaml` parses it into `IgnoredAny`, which catches syntax errors
//!    and multiple documents. Mapping keys are not collected, so a repeated
//!    key is accepted and the last one wins.
//! 2. `yaml-rust2` replays the parser events and inspects the tag on every
//!    node. Only the YAML core types a safe loader can build are allowed;
//!    any other tag (`!!python/object:..`, `!!java.net.URL`, `!local`,
//!    `!<tag:yaml.org,2002:python/object>`) is rejected.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use yaml_rust2::parser::{Event, EventReceiver, Parser};

use crate::error::YamlSyntaxError;

/// Prefix that the `!!` handle expands to.
const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Core types a safe loader has a constructor for.
const SAFE_TAGS: &[&str] = &[
    "null",
    "bool",
    "int",
    "float",
    "binary",
    "timestamp",
    "omap",
    "pairs",
    "set",
    "str",
    "seq",
    "map",
];

/// Outcome of a single check. Never mutated after it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub error: Option<YamlSyntaxError>,
}

impl ValidationResult {
    fn valid() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn invalid(error: YamlSyntaxError) -> Self {
        Self {
            ok: false,
            error: Some(error),
        }
    }

    /// Human-readable parser error, present only when `ok` is false.
    pub fn error_detail(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), YamlSyntaxError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Stateless YAML syntax checker.
pub struct YamlSyntaxChecker;

impl YamlSyntaxChecker {
    /// Check that `text` is a single well-formed YAML document.
    ///
    /// `None` and the empty string are the empty document, which is valid.
    pub fn check(text: Option<&str>) -> ValidationResult {
        let text = match text {
            Some(t) if !is_empty_stream(t) => t,
            _ => return ValidationResult::valid(),
        };

        if let Err(err) = serde_yaml::from_str::<IgnoredAny>(text) {
            tracing::debug!(error = %err, "yaml check failed");
            return ValidationResult::invalid(YamlSyntaxError::from_parser(&err));
        }

        match find_unsafe_tag(text) {
            Ok(None) => ValidationResult::valid(),
            Ok(Some(tag)) => {
                tracing::debug!(tag = %tag, "yaml check rejected tag");
                ValidationResult::invalid(YamlSyntaxError::unsafe_tag(&tag))
            }
            Err(err) => {
                tracing::debug!(error = %err, "yaml tag scan failed");
                ValidationResult::invalid(YamlSyntaxError::from_scanner(&err))
            }
        }
    }
}

/// Blank lines and comments only: a stream with no document in it.
fn is_empty_stream(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim_start();
        line.is_empty() || line.starts_with('#')
    })
}

/// Collects the first node tag a safe loader would refuse.
#[derive(Default)]
struct TagScan {
    rejected: Option<String>,
}

impl EventReceiver for TagScan {
    fn on_event(&mut self, ev: Event) {
        if self.rejected.is_some() {
            return;
        }
        let tag = match ev {
            Event::Scalar(.., tag) | Event::SequenceStart(.., tag) | Event::MappingStart(.., tag) => {
                tag
            }
            _ => None,
        };
        if let Some(tag) = tag {
            let full = resolve_tag(&tag.handle, &tag.suffix);
            if !is_safe_tag(&full) {
                self.rejected = Some(full);
            }
        }
    }
}

/// Full tag name, expanding the `!!` shorthand if the parser left it.
fn resolve_tag(handle: &str, suffix: &str) -> String {
    match handle {
        "!!" => format!("{CORE_TAG_PREFIX}{suffix}"),
        _ => format!("{handle}{suffix}"),
    }
}

fn is_safe_tag(full: &str) -> bool {
    // The non-specific tag `!` only forces a plain string.
    if full.is_empty() || full == "!" {
        return true;
    }
    full.strip_prefix(CORE_TAG_PREFIX)
        .is_some_and(|name| SAFE_TAGS.contains(&name))
}

fn find_unsafe_tag(text: &str) -> Result<Option<String>, yaml_rust2::ScanError> {
    let mut scan = TagScan::default();
    Parser::new(text.chars()).load(&mut scan, true)?;
    Ok(scan.rejected)
}
