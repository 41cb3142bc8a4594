pub mod generate;
pub mod nuke;

pub use generate::{GenerateCommandArgs, execute_generate};
pub use nuke::execute_nuke;

use crate::cli::GrafanaArgs;
use crate::upload::GrafanaConfig;

/// Resolve Grafana settings: flags first, then GRAFANA_* env vars, then defaults
pub fn grafana_config(args: &GrafanaArgs) -> GrafanaConfig {
    apply_grafana_args(GrafanaConfig::from_env(), args)
}

fn apply_grafana_args(mut config: GrafanaConfig, args: &GrafanaArgs) -> GrafanaConfig {
    if let Some(ref url) = args.grafana_url {
        config.url = url.clone();
    }
    if let Some(ref username) = args.username {
        config.username = username.clone();
    }
    if let Some(ref password) = args.password {
        config.password = password.clone();
    }
    if let Some(ref token) = args.token {
        config.token = token.clone();
    }
    if args.org_id.is_some() {
        config.org_id = args.org_id;
    }
    config
}
