//! # litreview
//!
//! Systematic literature review collector: Scopus search, SQLite store and
//! incremental metadata enrichment.
//!
//! ## Modules
//!
//! - [`store`] - SQLite schema, idempotent save and the gap queries
//! - [`scopus`] - Elsevier Scopus API client
//! - [`enrich`] - Publisher, continent, editorial, open access and impact drivers
//! - [`pipeline`] - Query expansion, fetch-and-save, counts, driver dispatch
//! - [`report`] - Aggregate CSVs
//! - [`throttle`] - Rate limiting and retries for outbound calls
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use litreview::{Config, Context, Driver};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("litreview.toml".as_ref())?;
//!     let ctx = Context::open(config, std::env::var("ELSEVIER_API_KEY").ok())?;
//!     let fetched = ctx.fetch_all().await?;
//!     println!("Inserted {} documents", fetched.inserted);
//!     let report = ctx.fill(Driver::Publisher).await?;
//!     println!("Publishers: {}", report);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod continents;
pub mod editorial;
pub mod enrich;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scopus;
pub mod source;
pub mod store;
pub mod throttle;

pub use config::Config;
pub use enrich::{Driver, EnrichmentReport};
pub use error::{Result, ReviewError};
pub use pipeline::Context;
pub use store::{SqliteStore, Store};
