pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod groups;
pub mod models;
pub mod telemetry;
pub mod upload;

pub use config::GenerateConfig;
pub use error::{AlertGenError, Result};
pub use groups::{GenerateOutput, generate_groups, generate_groups_with};
