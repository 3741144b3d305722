use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod input;

use cli::{Args, Command};
use config::Settings;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing; stdout carries the reports
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dcat_quality=info,dcat_quality_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    // Load configuration
    let mut settings = Settings::load()?;
    if let Some(model) = args.model {
        settings.model_name = model;
    }
    info!(
        "Using model {} (timeout {}s)",
        settings.model_name, settings.timeout_secs
    );
    let llm_config = settings.llm_config(args.persona.into());

    match args.command {
        Command::Analyze {
            input,
            output,
            concurrency,
        } => {
            let analyzer = commands::build_analyzer(&llm_config)?;
            commands::analyze(&analyzer, &input, output.as_deref(), concurrency).await
        }
        Command::Anomalies {
            input,
            feature,
            skip_hidden_nulls,
        } => {
            let analyzer = commands::build_analyzer(&llm_config)?;
            commands::anomalies(&analyzer, &input, feature.into(), skip_hidden_nulls).await
        }
        Command::Check { input, output } => commands::check(&input, output.as_deref()),
        Command::Reference { table } => commands::reference(table),
    }
}
