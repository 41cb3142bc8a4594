use crate::generator::synthetic::FOLDER_UID_PREFIX;
use crate::upload::{self, GrafanaClient, GrafanaConfig};
use crate::Result;
use colored::*;

/// Delete every generated folder (and its rules) from Grafana
pub async fn execute_nuke(grafana: GrafanaConfig) -> Result<usize> {
    eprintln!("{}", "Deleting generated folders...".bright_blue());
    eprintln!("  Grafana: {}", grafana.url);
    eprintln!("  Prefix: {}", FOLDER_UID_PREFIX);

    let client = GrafanaClient::new(grafana)?;
    let deleted = upload::nuke(&client, FOLDER_UID_PREFIX).await?;

    if deleted == 0 {
        eprintln!("{}", "No generated folders found".yellow());
    } else {
        eprintln!("{} Deleted {} folders", "✓".green(), deleted);
    }

    Ok(deleted)
}
