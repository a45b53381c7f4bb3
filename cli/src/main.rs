//! HireLens command-line entrypoint.
//!
//! This is the thin application shell: argument parsing, configuration
//! loading, browser lifecycle, and result output. The actual work lives
//! in the `crates/` directory.

use anyhow::Context;
use clap::Parser;
use hirelens_browser::{BrowserEngine, LaunchOptions, SessionStore};
use hirelens_core::{AppConfig, CountryProfile, Credentials, SearchQuery};
use hirelens_pipeline::{PipelineRunner, RunOutcome, SessionPersister};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Find hiring posts on LinkedIn by keyword search.
///
/// Credentials come from the environment (or a `.env` file): the
/// variables are named per country profile, e.g. `HIRELENS_EMAIL` /
/// `HIRELENS_PASSWORD` for India and `HIRELENS_EMAIL_USA` /
/// `HIRELENS_PASSWORD_USA` for the United States.
#[derive(Parser, Debug)]
#[command(name = "hirelens", version, about)]
struct Cli {
    /// Country profile to browse as (india, usa)
    #[arg(long, default_value = "india")]
    country: String,

    /// Search query; defaults to the configured default query
    #[arg(long)]
    search: Option<String>,

    /// Maximum number of candidate posts to collect
    #[arg(long)]
    max_results: Option<usize>,

    /// Delay between successive page interactions in seconds
    #[arg(long)]
    delay: Option<u64>,

    /// Run the browser without a visible window
    #[arg(long)]
    headless: Option<bool>,
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hirelens=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Flushes the engine's session through the store at the end of a run.
struct EnginePersister<'a> {
    store: &'a SessionStore,
    engine: &'a BrowserEngine,
}

#[async_trait::async_trait]
impl SessionPersister for EnginePersister<'_> {
    async fn persist(&self) {
        self.store.persist(self.engine).await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting HireLens v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load_with_env().context("loading configuration")?;

    // Command-line flags win over config file and environment
    if let Some(max) = cli.max_results {
        config.search.max_results = max;
    }
    if let Some(secs) = cli.delay {
        config.search.delay_between_requests_secs = secs;
    }
    if let Some(headless) = cli.headless {
        config.browser.headless = headless;
    }

    let profile = CountryProfile::lookup(&cli.country)?;
    profile.validate()?;

    // Fail fast on missing credentials, before any browser is spawned
    let credentials = Credentials::from_env(&profile)?;

    let query_text = cli
        .search
        .unwrap_or_else(|| config.search.default_query.clone());
    let query = SearchQuery::new(
        query_text,
        config.search.max_results,
        Duration::from_secs(config.search.delay_between_requests_secs),
    )?;

    let session_dir = AppConfig::data_dir()?.join(&profile.session_dir);
    let options = LaunchOptions {
        session_dir: session_dir.clone(),
        headless: config.browser.headless,
        latitude: profile.geolocation.latitude,
        longitude: profile.geolocation.longitude,
        accuracy: profile.geolocation.accuracy,
        timezone: profile.timezone.clone(),
        locale: profile.locale.clone(),
        accept_language: format!("{},en;q=0.9", profile.locale),
        window_width: config.browser.window_width,
        window_height: config.browser.window_height,
    };

    let store = SessionStore::new(&session_dir);
    if let Some(marker) = store.load_marker() {
        info!(
            "Found session from {} ({} cookies)",
            marker.saved_at, marker.cookie_count
        );
    }

    info!(
        "Browsing as {} via {}.linkedin.com",
        profile.name, profile.subdomain
    );
    let engine = BrowserEngine::launch(options).await?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, saving session and shutting down");
            signal_cancel.cancel();
        }
    });

    let runner =
        PipelineRunner::new(&profile, &credentials, &config).with_cancellation(cancel);
    let persister = EnginePersister {
        store: &store,
        engine: &engine,
    };
    let result = runner.run(&engine, &persister, &query).await;

    engine.close().await?;

    match result {
        Ok(outcome) => {
            report(&outcome)?;
            Ok(())
        }
        Err(e) => {
            error!(stage = e.stage(), "Run failed: {e}");
            Err(e.into())
        }
    }
}

/// Print hiring results as JSON lines on stdout.
fn report(outcome: &RunOutcome) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for result in &outcome.hiring {
        serde_json::to_writer(&mut stdout, result)?;
        writeln!(stdout)?;
    }

    if outcome.interrupted {
        warn!(
            "Interrupted: {} hiring posts from {} of {} candidates visited",
            outcome.hiring.len(),
            outcome.extracted,
            outcome.candidates
        );
    } else {
        info!(
            "Done: {} hiring posts out of {} candidates",
            outcome.hiring.len(),
            outcome.candidates
        );
    }
    Ok(())
}
