mod main_runtime;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use courtside::adapters::OddsApiClient;
use courtside::cli::output::{failure_report, print_warn};
use courtside::cli::{dashboard, print_predictions, Cli, Commands, Dashboard, OutputMode};
use courtside::config::AppConfig;
use courtside::engine::rank_predictions;
use courtside::services::{
    sample_predictions, DataOrigin, FetchOrchestrator, FetchOutcome, PredictionController,
};
use main_runtime::{init_logging, init_logging_simple};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    match &cli.command {
        Commands::Predict { sample, json } => {
            init_logging_simple();
            ensure_valid(&config)?;
            run_predict(&config, *sample, OutputMode::from_json_flag(*json)).await?;
        }
        Commands::Watch => {
            init_logging(&config.logging, false);
            ensure_valid(&config)?;
            run_watch(&config).await?;
        }
        Commands::Sample { json } => {
            let predictions = rank_predictions(&sample_predictions(Utc::now()));
            print_predictions(&predictions, OutputMode::from_json_flag(*json))?;
        }
        Commands::Config => {
            print!("{}", config.to_redacted_toml()?);
            if let Err(problems) = config.validate() {
                for problem in problems {
                    print_warn(&format!("warning: {problem}"));
                }
            }
        }
    }

    Ok(())
}

fn ensure_valid(config: &AppConfig) -> anyhow::Result<()> {
    if let Err(problems) = config.validate() {
        anyhow::bail!("invalid configuration:\n  {}", problems.join("\n  "));
    }
    Ok(())
}

fn build_orchestrator(config: &AppConfig) -> anyhow::Result<FetchOrchestrator> {
    let client = OddsApiClient::new(&config.source)?;
    Ok(FetchOrchestrator::new(Arc::new(client), config.fetch.clone()))
}

async fn run_predict(config: &AppConfig, sample: bool, mode: OutputMode) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let outcome = orchestrator
        .run_cycle(sample || config.controller.start_in_sample_mode, |retry| {
            info!(retry, "Retrying odds fetch");
        })
        .await;

    match outcome {
        FetchOutcome::Success(batch) => {
            if batch.origin == DataOrigin::Fallback {
                print_warn("Live odds unavailable, showing sample data");
            }
            print_predictions(&rank_predictions(&batch.predictions), mode)
        }
        FetchOutcome::Failure(e) => Err(failure_report(e)),
    }
}

async fn run_watch(config: &AppConfig) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(config)?;
    let controller = Arc::new(PredictionController::new(
        orchestrator,
        config.controller.clone(),
    ));
    controller.start();

    let ui = Dashboard::new(Arc::clone(&controller));
    let result = tokio::select! {
        result = ui.run() => result,
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            dashboard::restore_terminal()
        }
    };

    controller.shutdown();
    result?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
