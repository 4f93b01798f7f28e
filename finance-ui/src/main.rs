use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use finance_ui::app;
use finance_ui::config::{AppConfig, Overrides};
use finance_ui::logging;
use finance_ui::session::Session;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compound interest and mortgage calculator.
///
/// Enter three of the four values on a screen and calculate the fourth.
/// Field values and saved calculations persist between runs.
#[derive(Debug, Parser)]
#[command(name = "FinanceCalculator", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage backend to use (`sqlite` or `memory`).
    #[arg(long)]
    backend: Option<String>,

    /// Storage connection string.
    /// For SQLite this is a file path (e.g. `finance.db`) or `:memory:`.
    #[arg(long)]
    db: Option<String>,

    /// Log level or EnvFilter directive.
    #[arg(long)]
    log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not print logs to stderr.
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            db: self.db.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply(cli.overrides());

    // RUST_LOG wins over the configured level unless a level was passed explicitly.
    if cli.log_level.is_some() || std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&config.logging.level)?;
    }
    logging::set_console_enabled(config.logging.console)?;
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }

    let store_config = config.store_config();
    debug!("connecting to {} backend", store_config.backend);
    let registry = app::build_registry();
    let store = registry
        .create(&store_config)
        .await
        .with_context(|| format!("cannot open {} store", store_config.backend))?;

    let mut session = Session::load(store).await?;
    info!(backend = %store_config.backend, "calculator ready");

    app::run(&mut session, io::stdin().lock(), io::stdout().lock()).await
}
