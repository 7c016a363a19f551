pub mod core;
pub mod pipeline;
pub mod providers;
pub mod report;

use crate::core::Notifier;
use crate::core::config::{AppConfig, Credentials};
use crate::pipeline::{Pipeline, RunSummary};
use crate::providers::{er_api::ErApiProvider, goldapi::GoldApiProvider, telegram};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

/// Per-invocation options coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print messages instead of sending them.
    pub dry_run: bool,
    /// Historical quote date instead of the latest spot price.
    pub date: Option<NaiveDate>,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

pub async fn run(
    config: &AppConfig,
    credentials: &Credentials,
    options: &RunOptions,
) -> Result<RunSummary> {
    info!(
        pair = %format!("{}/{}", config.report.metal, config.report.currency),
        rate = %format!("{}/{}", config.report.rate.base, config.report.rate.target),
        delivery = ?config.report.delivery,
        dry_run = options.dry_run,
        "goldbrief starting..."
    );

    let price_provider =
        GoldApiProvider::new(config.goldapi_base_url(), &credentials.gold_api_token);
    let rate_provider = ErApiProvider::new(config.exchange_rate_base_url());

    let console = telegram::ConsoleNotifier;
    let telegram_notifier;
    let notifier: &dyn Notifier = if options.dry_run {
        &console
    } else {
        telegram_notifier = telegram::TelegramNotifier::new(
            config.telegram_base_url(),
            &credentials.bot_token,
            &credentials.chat_id,
        )?;
        &telegram_notifier
    };

    Pipeline {
        price_provider: &price_provider,
        rate_provider: &rate_provider,
        notifier,
    }
    .run(&config.report, options.date, Utc::now())
    .await
}
