//! Job configuration: a job name plus its parameter definitions.
//!
//! ```yaml
//! name: deploy
//! parameters:
//!   - type: validatingYamlParameter
//!     name: CONFIG
//!     defaultValue: "key: value"
//!     failedValidationMessage: "bad yaml"
//!   - type: string
//!     name: TARGET
//!     defaultValue: staging
//! ```
//!
//! Configuration is replaced wholesale; nothing here mutates a loaded
//! definition.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ParameterError, Result};
use crate::parameter::ParameterDefinition;
use crate::source::ParameterSource;

/// A job and the parameters it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
}

impl JobConfig {
    /// Parse and check a configuration document.
    ///
    /// # Errors
    ///
    /// - `ParameterError::Config`: the document is not valid configuration.
    /// - `ParameterError::InvalidDefinition`: empty or duplicate parameter names.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: JobConfig =
            serde_yaml::from_str(text).map_err(|e| ParameterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ParameterError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loading job configuration");
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for def in &self.parameters {
            def.validate()?;
            if !seen.insert(def.name()) {
                return Err(ParameterError::InvalidDefinition(format!(
                    "duplicate parameter name: {}",
                    def.name()
                )));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// `ParameterError::UnknownParameter` when the job has no such parameter.
    pub fn parameter(&self, name: &str) -> Result<&ParameterDefinition> {
        self.parameters
            .iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| ParameterError::UnknownParameter(name.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ParameterError::Config(e.to_string()))
    }
}
