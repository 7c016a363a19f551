use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use goldbrief::core::config::{AppConfig, Credentials};
use goldbrief::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch prices and send the report (default)
    Run {
        /// Print the messages to stdout instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Quote a past date (YYYY-MM-DD) instead of the live spot price
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Run { dry_run, date }) => {
            run(cli.config_path.as_deref(), goldbrief::RunOptions { dry_run, date }).await
        }
        None => run(cli.config_path.as_deref(), goldbrief::RunOptions::default()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %format!("{e:#}"), "Application failed");
    }
    result
}

async fn run(config_path: Option<&str>, options: goldbrief::RunOptions) -> Result<()> {
    let config = goldbrief::load_config(config_path)?;
    let credentials = Credentials::from_env()?;
    goldbrief::run(&config, &credentials, &options).await?;
    Ok(())
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = serde_yaml::to_string(&AppConfig::default())
        .context("Failed to render default configuration")?;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    println!("Created default configuration at {}", path.display());
    Ok(())
}
