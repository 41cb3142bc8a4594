//! `GenerateGroups`: script config in, rule groups and effective config out.

use crate::config::GenerateConfig;
use crate::error::{AlertGenError, Result};
use crate::generator::{Generator, SyntheticGenerator};
use crate::models::AlertRuleGroup;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generators are always invoked in verbose mode from here.
const VERBOSE: bool = true;

/// Result of a `GenerateGroups` call.
///
/// Serializes to exactly `{"groups": [...], "inputConfig": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub groups: Vec<AlertRuleGroup>,
    /// Config actually used, including a clock-assigned seed
    pub input_config: GenerateConfig,
}

impl GenerateOutput {
    /// Convert into the plain object handed back to script callers
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Generate rule groups with the default [`SyntheticGenerator`].
pub fn generate_groups(raw_config: Option<&Value>) -> Result<GenerateOutput> {
    generate_groups_with(&SyntheticGenerator::new(), raw_config)
}

/// Generate rule groups with `generator`.
///
/// `None` and JSON `null` stand for a missing argument and fail before the
/// generator is touched.
pub fn generate_groups_with<G: Generator>(
    generator: &G,
    raw_config: Option<&Value>,
) -> Result<GenerateOutput> {
    let raw_config = match raw_config {
        None | Some(Value::Null) => return Err(AlertGenError::MissingConfiguration),
        Some(raw) => raw,
    };

    let config = GenerateConfig::from_value(raw_config)?;

    let groups = generator
        .generate(&config, VERBOSE)
        .map_err(|e| AlertGenError::GenerationFailed(Box::new(e)))?;

    Ok(GenerateOutput {
        groups,
        input_config: config,
    })
}
