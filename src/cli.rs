use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "alertgen")]
#[command(version)]
#[command(about = "Synthetic Grafana alert rule generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate alert rule groups and optionally upload them to Grafana
    Generate {
        /// JSON or YAML file holding the configuration object
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of alerting rules
        #[arg(long)]
        alert_rule_count: Option<i64>,

        /// Number of recording rules
        #[arg(long)]
        recording_rule_count: Option<i64>,

        /// Datasource UID used by rule queries
        #[arg(long)]
        query_datasource: Option<String>,

        /// Datasource UID recording rules write to
        #[arg(long)]
        write_datasource: Option<String>,

        /// Rules per group
        #[arg(long)]
        rules_per_group: Option<i64>,

        /// Groups per folder
        #[arg(long)]
        groups_per_folder: Option<i64>,

        /// RNG seed (current time if not specified)
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Output file (stdout if not specified)
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,

        /// Upload the generated groups to Grafana
        #[arg(long)]
        upload: bool,

        /// Delete previously generated folders before uploading
        #[arg(long, requires = "upload")]
        nuke: bool,

        /// Maximum number of concurrent rule group uploads
        #[arg(long, default_value = "10", requires = "upload")]
        concurrency: usize,

        /// Existing folder UID to upload into (repeatable)
        #[arg(long = "folder-uid", requires = "upload")]
        folder_uids: Vec<String>,

        #[command(flatten)]
        grafana: GrafanaArgs,
    },

    /// Delete all generated folders and their rules from Grafana
    Nuke {
        #[command(flatten)]
        grafana: GrafanaArgs,
    },
}

/// Grafana connection flags; unset flags fall back to GRAFANA_* env vars
#[derive(Args, Clone, Debug, Default)]
pub struct GrafanaArgs {
    /// Grafana base URL
    #[arg(long)]
    pub grafana_url: Option<String>,

    /// Basic auth user
    #[arg(long)]
    pub username: Option<String>,

    /// Basic auth password
    #[arg(long)]
    pub password: Option<String>,

    /// Service account token (preferred over basic auth)
    #[arg(long)]
    pub token: Option<String>,

    /// Organization ID
    #[arg(long)]
    pub org_id: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}
