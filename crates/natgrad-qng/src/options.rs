//! Options for the quantum natural gradient strategy.
//!
//! Options are plain serde structs and can be loaded from YAML:
//!
//! ```yaml
//! shots: 4096
//! measure_blocks: true
//! verify_reconstruction: false
//! ```
//!
//! Missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{QngError, QngResult};

/// Tunables for [`crate::strategy::QuantumNaturalGradient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QngOptions {
    /// Shots requested for each block circuit.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Append a full measurement to every block circuit.
    #[serde(default)]
    pub measure_blocks: bool,

    /// Compare every layer against the circuit instruction by instruction
    /// after segmentation, on top of the mandatory size check.
    #[serde(default = "default_true")]
    pub verify_reconstruction: bool,
}

fn default_shots() -> u32 {
    1024
}

fn default_true() -> bool {
    true
}

impl Default for QngOptions {
    fn default() -> Self {
        Self {
            shots: default_shots(),
            measure_blocks: false,
            verify_reconstruction: true,
        }
    }
}

impl QngOptions {
    /// Parse options from a YAML string and validate them.
    pub fn from_yaml_str(source: &str) -> QngResult<Self> {
        let options: QngOptions = serde_yaml_ng::from_str(source)
            .map_err(|e| QngError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> QngResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QngError::InvalidOptions(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&contents)
    }

    /// Check option values.
    pub fn validate(&self) -> QngResult<()> {
        if self.shots == 0 {
            return Err(QngError::InvalidOptions(
                "shots must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Enable or disable block measurements.
    #[must_use]
    pub fn with_measure_blocks(mut self, measure: bool) -> Self {
        self.measure_blocks = measure;
        self
    }
}
