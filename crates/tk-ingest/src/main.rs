//! Tweedekamer motions ETL engine entrypoint: loads config, wires up
//! cancellation, and dispatches to the test probe or the full ingestion run.

mod cli;
mod config;
mod error;
mod orchestrator;
mod since;
mod stats;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::IngestError;

#[tokio::main]
async fn main() {
    color_eyre::install().ok();
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("[error] {err}");
            std::process::exit(1);
        }
    };

    if cfg.test_mode {
        if let Err(err) = cli::run_test_probe(&cfg).await {
            eprintln!("[error] {err}");
            std::process::exit(err.exit_code());
        }
        std::process::exit(0);
    }

    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("signal received, cancelling run");
            cancel_for_signal.cancel();
        }
    });

    match orchestrator::run(&cfg, &cancel).await {
        Ok(outcome) => {
            if cfg.show_stats {
                println!("{}", outcome.stats.summary_block());
            }
            std::process::exit(0);
        }
        Err(IngestError::Cancellation) => {
            eprintln!("[warn] run cancelled");
            std::process::exit(130);
        }
        Err(err) => {
            eprintln!("[error] {err}");
            std::process::exit(err.exit_code());
        }
    }
}
