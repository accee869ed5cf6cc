//! litreview - Systematic literature review collector
//!
//! Queries Scopus with the Cartesian product of three term groups, stores the
//! results in SQLite and backfills publisher, continent, editorial URL, open
//! access and journal impact.
//!
//! ## Usage
//!
//! ```bash
//! litreview init
//! litreview search
//! litreview fill all
//! litreview report --output ./reports
//! ```

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use litreview::config::{Config, DEFAULT_CONFIG_FILE};
use litreview::models::STATUS_INCLUDED;
use litreview::{report, Context, Driver, EnrichmentReport, SqliteStore, Store};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Systematic literature review collector
#[derive(Parser)]
#[command(name = "litreview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Elsevier API key
    #[arg(long, global = true, env = "ELSEVIER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and its tables
    Init,

    /// Run every search query and store the results
    Search,

    /// Count the documents each search query returns
    Count {
        /// CSV file for the counts
        #[arg(short, long, default_value = "search_terms_results.csv")]
        output: PathBuf,
    },

    /// Fill a missing attribute from external lookups
    Fill {
        #[arg(value_enum)]
        target: FillTarget,
    },

    /// Manage the study selection
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },

    /// Write aggregate CSVs
    Report {
        /// Output directory
        #[arg(short, long, default_value = "./reports")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FillTarget {
    Publisher,
    Continent,
    Editorial,
    Openaccess,
    Impact,
    All,
}

impl FillTarget {
    fn driver(self) -> Option<Driver> {
        match self {
            FillTarget::Publisher => Some(Driver::Publisher),
            FillTarget::Continent => Some(Driver::Continent),
            FillTarget::Editorial => Some(Driver::Editorial),
            FillTarget::Openaccess => Some(Driver::OpenAccess),
            FillTarget::Impact => Some(Driver::Impact),
            FillTarget::All => None,
        }
    }
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Add a document to the study selection
    Add {
        /// Document id
        id: i64,
        /// Review status (3 = included)
        #[arg(default_value_t = STATUS_INCLUDED)]
        status: i64,
    },
    /// Change the review status of a selected document
    SetStatus {
        /// Document id
        id: i64,
        /// Review status (3 = included)
        status: i64,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.log_json {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }

    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let store = open_store(&config)?;
            println!("Database ready: {}", store.path().display());
            Ok(())
        }
        Commands::Search => {
            let ctx = Context::open(config, cli.api_key)?;
            let fetched = ctx.fetch_all().await.context("Search failed")?;
            println!(
                "Queries: {} ({} abandoned), pages: {}, inserted: {}, duplicates: {}",
                fetched.queries, fetched.aborted, fetched.pages, fetched.inserted, fetched.skipped
            );
            Ok(())
        }
        Commands::Count { output } => {
            let ctx = Context::open(config, cli.api_key)?;
            let counts = ctx
                .count_queries(&output)
                .await
                .context("Counting queries failed")?;
            let total: u64 = counts.iter().filter_map(|c| c.count).sum();
            let failed = counts.iter().filter(|c| c.count.is_none()).count();
            println!(
                "Counted {} queries ({} failed), {} documents in total",
                counts.len(),
                failed,
                total
            );
            println!("Saved: {:?}", output);
            Ok(())
        }
        Commands::Fill { target } => {
            let ctx = Context::open(config, cli.api_key)?;
            match target.driver() {
                Some(driver) => {
                    let report = ctx
                        .fill(driver)
                        .await
                        .with_context(|| format!("Filling {} failed", driver))?;
                    print_report(driver, &report);
                }
                None => {
                    for (driver, report) in ctx.fill_all().await.context("Enrichment failed")? {
                        print_report(driver, &report);
                    }
                }
            }
            Ok(())
        }
        Commands::Review { action } => {
            let store = open_store(&config)?;
            match action {
                ReviewAction::Add { id, status } => {
                    store
                        .add_to_study_selection(id, status)
                        .with_context(|| format!("Cannot select document {}", id))?;
                    println!("Document {} added with status {}", id, status);
                }
                ReviewAction::SetStatus { id, status } => {
                    if store.set_status_studyselection(id, status)? {
                        println!("Document {} set to status {}", id, status);
                    } else {
                        println!("Document {} is not in the study selection; use `review add`", id);
                    }
                }
            }
            Ok(())
        }
        Commands::Report { output } => {
            let store = open_store(&config)?;
            let written = report::write_reports(&store, &output).context("Failed to write reports")?;
            println!("Documents: {}", store.document_count()?);
            for path in written {
                println!("Saved: {:?}", path);
            }
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    info!(
        database = %config.database.display(),
        date_range = %config.date_range,
        "Configuration loaded"
    );
    Ok(config)
}

fn open_store(config: &Config) -> Result<SqliteStore> {
    SqliteStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))
}

fn print_report(driver: Driver, report: &EnrichmentReport) {
    println!("{:<10} {}", driver.name(), report);
}
