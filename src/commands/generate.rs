//! Generate command implementation
//!
//! Merges the config file and flags into one configuration object, runs it
//! through [`generate_groups`], writes the output and optionally uploads
//! the groups to Grafana.

use crate::cli::ExportFormat;
use crate::error::{AlertGenError, Result};
use crate::groups::{GenerateOutput, generate_groups};
use crate::upload::{self, GrafanaClient, GrafanaConfig, UploadOptions};
use colored::Colorize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Arguments of the generate command
#[derive(Debug, Clone)]
pub struct GenerateCommandArgs<'a> {
    pub config_path: Option<&'a Path>,
    pub alert_rule_count: Option<i64>,
    pub recording_rule_count: Option<i64>,
    pub query_datasource: Option<&'a str>,
    pub write_datasource: Option<&'a str>,
    pub rules_per_group: Option<i64>,
    pub groups_per_folder: Option<i64>,
    pub seed: Option<i64>,
    pub format: ExportFormat,
    pub output_path: Option<&'a Path>,
    /// Grafana to upload to; `None` skips the upload
    pub upload: Option<(GrafanaConfig, UploadOptions)>,
}

/// Execute the generate command
pub async fn execute_generate(args: GenerateCommandArgs<'_>) -> Result<GenerateOutput> {
    let raw_config = build_raw_config(&args)?;
    let output = generate_groups(Some(&raw_config))?;

    let rule_count: usize = output.groups.iter().map(|g| g.rules.len()).sum();
    eprintln!(
        "{} Generated {} rules in {} groups (seed {})",
        "✓".green(),
        rule_count,
        output.groups.len(),
        output.input_config.seed.to_string().bold()
    );

    let document = render(&output, args.format)?;
    if let Some(path) = args.output_path {
        fs::write(path, &document)?;
        eprintln!("{} Wrote output: {}", "✓".green(), path.display());
    } else {
        println!("{}", document);
    }

    if let Some((grafana, options)) = args.upload {
        eprintln!("{} Uploading to {}...", "→".blue(), grafana.url);

        let client = GrafanaClient::new(grafana)?;
        let summary = upload::upload_groups(&client, &output.groups, &options).await?;

        if summary.folders_deleted > 0 {
            eprintln!(
                "{} Deleted {} generated folders",
                "✓".green(),
                summary.folders_deleted
            );
        }
        eprintln!(
            "{} Uploaded {} groups ({} new folders)",
            "✓".green(),
            summary.groups_uploaded,
            summary.folders_created
        );
    }

    Ok(output)
}

/// Config file contents with flag values layered on top
fn build_raw_config(args: &GenerateCommandArgs<'_>) -> Result<Value> {
    let mut object = match args.config_path {
        Some(path) => load_config_object(path)?,
        None => Map::new(),
    };

    let overrides = [
        ("alertRuleCount", args.alert_rule_count.map(Value::from)),
        ("recordingRuleCount", args.recording_rule_count.map(Value::from)),
        ("queryDatasource", args.query_datasource.map(Value::from)),
        ("writeDatasource", args.write_datasource.map(Value::from)),
        ("rulesPerGroup", args.rules_per_group.map(Value::from)),
        ("groupsPerFolder", args.groups_per_folder.map(Value::from)),
        ("seed", args.seed.map(Value::from)),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            object.insert(key.to_string(), value);
        }
    }

    Ok(Value::Object(object))
}

fn load_config_object(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    match value {
        Value::Object(object) => Ok(object),
        _ => Err(AlertGenError::InvalidConfig(format!(
            "{} must contain a configuration object",
            path.display()
        ))),
    }
}

fn render(output: &GenerateOutput, format: ExportFormat) -> Result<String> {
    let value = output.to_value()?;
    let document = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&value)?,
        ExportFormat::Yaml => serde_yaml::to_string(&value)?,
    };
    Ok(document)
}
