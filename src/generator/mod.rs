//! Rule group generators
//!
//! The adapter in [`crate::groups`] only knows the [`Generator`] trait;
//! [`SyntheticGenerator`] is the seeded implementation used by default.

pub mod synthetic;

pub use synthetic::SyntheticGenerator;

use crate::config::GenerateConfig;
use crate::models::AlertRuleGroup;
use thiserror::Error;

/// Errors reported by [`SyntheticGenerator`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("{field} must not be negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("{requested} rules requested, at most {max} can be generated")]
    TooManyRules { requested: i64, max: i64 },

    #[error("rulesPerGroup must be at least 1 when rules are requested")]
    ZeroRulesPerGroup,

    #[error("groupsPerFolder must be at least 1 when rules are requested")]
    ZeroGroupsPerFolder,
}

/// Trait for producing rule groups from a configuration
pub trait Generator {
    /// Error reported when the configuration cannot be generated
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate the rule groups described by `config`.
    ///
    /// `verbose` raises per-group progress logging to `info`.
    fn generate(
        &self,
        config: &GenerateConfig,
        verbose: bool,
    ) -> Result<Vec<AlertRuleGroup>, Self::Error>;
}
