//! Risk Monitor Binary
//!
//! Runs one report and exits. Schedule it externally (cron, systemd timer).
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin risk-monitor
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `DERIBIT_CLIENT_ID`: Deribit API client id
//! - `DERIBIT_CLIENT_SECRET`: Deribit API client secret
//! - `TELEGRAM_BOT_TOKEN`: Telegram bot token (unless dry run)
//! - `TELEGRAM_CHAT_ID`: Target chat id (unless dry run)
//!
//! ## Optional
//! - `RISK_MONITOR_CONFIG`: Path to a YAML config file (default: ./config.yaml if present)
//! - `DERIBIT_ENV`: mainnet | testnet (default: mainnet)
//! - `RISK_MONITOR_CURRENCIES`: Comma-separated currencies (default: BTC)
//! - `RISK_MONITOR_DRY_RUN`: Log the message instead of sending it (default: false)
//! - `RISK_MONITOR_TITLE`: Message title (default: Deribit Risk Report)
//! - `OTEL_ENABLED`: Export spans over OTLP (default: false)
//! - `RUST_LOG`: Log filter (default: risk_monitor=info)

use std::process::ExitCode;

use risk_monitor::infrastructure::telemetry;
use risk_monitor::{Config, ConfigSource, ReportJob, load_config};
use tracing::Instrument;
use uuid::Uuid;

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();

    let _telemetry_guard = telemetry::init();

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("report_run", %run_id);

    async {
        tracing::info!("Starting risk report");

        let job = match load_config(None) {
            Ok((config, source)) => {
                log_config(&config, &source);
                match ReportJob::from_config(&config) {
                    Ok(job) => job,
                    Err(e) => {
                        tracing::error!(error = %e, "Startup failed");
                        return ExitCode::FAILURE;
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration failed");
                return ExitCode::FAILURE;
            }
        };

        match job.run().await {
            Ok(report) => {
                tracing::info!(
                    total_nav_usd = %report.total_nav_usd,
                    margin_usage_pct = %report.margin_usage_pct,
                    dry_run = job.is_dry_run(),
                    "Risk report complete"
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Risk report failed");
                ExitCode::FAILURE
            }
        }
    }
    .instrument(span)
    .await
}

/// Log the parsed configuration. Secrets are never logged.
fn log_config(config: &Config, source: &ConfigSource) {
    tracing::info!(
        source = %source,
        environment = %config.exchange.environment,
        currencies = ?config.report.currencies,
        exposure = ?config.report.exposure.as_ref().map(|e| e.rule),
        dry_run = config.notifier.dry_run,
        "Configuration loaded"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
