use alertgen::{
    cli::{Cli, Commands},
    commands::{self, GenerateCommandArgs},
    telemetry,
    upload::UploadOptions,
    Result,
};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _telemetry = telemetry::init_telemetry()?;

    match cli.command {
        Commands::Generate {
            config,
            alert_rule_count,
            recording_rule_count,
            query_datasource,
            write_datasource,
            rules_per_group,
            groups_per_folder,
            seed,
            format,
            output,
            upload,
            nuke,
            concurrency,
            folder_uids,
            grafana,
        } => {
            let upload = upload.then(|| {
                (
                    commands::grafana_config(&grafana),
                    UploadOptions {
                        nuke,
                        concurrency,
                        folder_uids,
                    },
                )
            });

            commands::execute_generate(GenerateCommandArgs {
                config_path: config.as_deref(),
                alert_rule_count,
                recording_rule_count,
                query_datasource: query_datasource.as_deref(),
                write_datasource: write_datasource.as_deref(),
                rules_per_group,
                groups_per_folder,
                seed,
                format,
                output_path: output.as_deref(),
                upload,
            })
            .await?;
        }
        Commands::Nuke { grafana } => {
            commands::execute_nuke(commands::grafana_config(&grafana)).await?;
        }
    }

    Ok(())
}
