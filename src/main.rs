use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tourism_dashboard::{charts, config, data, selection, server};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every chart payload and KPI and write the JSON artifact
    Export {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
    /// Serve the dashboard API
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Export { config } => {
            println!("Exporting dashboard data with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let dataset = data::load_dataset(&app_config.input.data_csv)?;

            // One render pass under the default all-selected state.
            let selection = selection::SelectionState::from_dataset(&dataset);
            let dashboard = charts::render_dashboard(&dataset, &selection, &app_config.charts);

            let json = serde_json::to_string_pretty(&dashboard)?;
            std::fs::write(&app_config.output.export_path, json).with_context(|| {
                format!(
                    "Failed to write export file: {:?}",
                    app_config.output.export_path
                )
            })?;

            println!("Export complete: {:?}", app_config.output.export_path);
        }
        Commands::Serve { config } => {
            println!("Serving dashboard with config: {:?}", config);
            let app_config = config::AppConfig::load_from_file(config)?;

            let dataset = data::load_dataset(&app_config.input.data_csv)?;

            server::start_server(app_config, dataset).await?;
        }
    }

    Ok(())
}
