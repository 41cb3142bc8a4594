use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertGenError {
    #[error("generateGroups requires a configuration object")]
    MissingConfiguration,

    #[error("Rule group generation failed: {0}")]
    GenerationFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Grafana API error ({status}): {message}")]
    GrafanaApi { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlertGenError>;
