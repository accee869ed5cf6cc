//! Pipeline orchestration: search queries, paginated fetch-and-save, counts
//! and the enrichment drivers.
//!
//! A [`Context`] is built once per process and owns the configuration, the
//! store and the external collaborators. Every remote call is awaited in
//! turn; the collaborators' own throttles pace the run.

use crate::config::Config;
use crate::continents::StaticContinentTable;
use crate::editorial::HttpDoiResolver;
use crate::enrich::{self, Driver, EnrichmentReport};
use crate::error::{ReviewError, Result};
use crate::models::Cursor;
use crate::scopus::ScopusClient;
use crate::source::{BibliographicSource, ContinentResolver, DoiResolver};
use crate::store::{SqliteStore, Store};
use crate::throttle::RetryPolicy;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, warn};

/// Expand three term groups into `TITLE-ABS-KEY` queries.
///
/// Order follows the Cartesian product: the first group varies slowest.
pub fn build_queries(groups: &[Vec<String>]) -> Result<Vec<String>> {
    let [first, second, third] = groups else {
        return Err(ReviewError::Config(format!(
            "expected 3 search term groups, found {}",
            groups.len()
        )));
    };

    let mut queries = Vec::with_capacity(first.len() * second.len() * third.len());
    for a in first {
        for b in second {
            for c in third {
                queries.push(format!("TITLE-ABS-KEY('{}' AND '{}' AND '{}')", a, b, c));
            }
        }
    }
    Ok(queries)
}

/// Totals of a fetch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub queries: usize,
    pub pages: usize,
    pub inserted: usize,
    pub skipped: usize,
    /// Queries cut short by a quota or lookup failure
    pub aborted: usize,
}

impl FetchReport {
    fn absorb(&mut self, other: FetchReport) {
        self.queries += other.queries;
        self.pages += other.pages;
        self.inserted += other.inserted;
        self.skipped += other.skipped;
        self.aborted += other.aborted;
    }
}

/// One row of the query count CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryCount {
    pub index: usize,
    pub query: String,
    /// `None` when the count request failed; written as an empty field
    pub count: Option<u64>,
}

/// Process-wide wiring of configuration, store and collaborators
pub struct Context {
    config: Config,
    store: Box<dyn Store>,
    source: Option<Box<dyn BibliographicSource>>,
    continents: Box<dyn ContinentResolver>,
    doi: Box<dyn DoiResolver>,
}

impl Context {
    pub fn new(
        config: Config,
        store: Box<dyn Store>,
        continents: Box<dyn ContinentResolver>,
        doi: Box<dyn DoiResolver>,
    ) -> Self {
        Self {
            config,
            store,
            source: None,
            continents,
            doi,
        }
    }

    /// Attach the bibliographic source used by search, count and the
    /// publisher / open access / impact drivers
    pub fn with_source(mut self, source: Box<dyn BibliographicSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Production wiring: SQLite at `config.database`, Scopus when a key is
    /// given, the static continent table and doi.org.
    pub fn open(config: Config, api_key: Option<String>) -> Result<Self> {
        let retry = RetryPolicy::from(&config.retry);
        let store = SqliteStore::open(&config.database)?;
        let doi = HttpDoiResolver::new(
            config.scopus.lookup_calls_per_second,
            config.scopus.timeout(),
            retry.clone(),
        )?;

        let source = match api_key {
            Some(key) => Some(ScopusClient::new(
                key,
                config.date_range.clone(),
                &config.scopus,
                retry,
            )?),
            None => None,
        };

        let mut context = Self::new(
            config,
            Box::new(store),
            Box::new(StaticContinentTable),
            Box::new(doi),
        );
        if let Some(source) = source {
            context = context.with_source(Box::new(source));
        }
        Ok(context)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The attached source, or a configuration error naming the missing key
    pub fn source(&self) -> Result<&dyn BibliographicSource> {
        self.source.as_deref().ok_or_else(|| {
            ReviewError::Config(
                "Scopus API key missing: pass --api-key or set ELSEVIER_API_KEY".into(),
            )
        })
    }

    pub fn queries(&self) -> Result<Vec<String>> {
        build_queries(&self.config.search_terms)
    }

    /// Page through one query from the start, saving each page as it arrives.
    pub async fn fetch_query(&self, query: &str) -> Result<FetchReport> {
        let source = self.source()?;
        let mut report = FetchReport {
            queries: 1,
            ..Default::default()
        };
        let mut cursor = Cursor::Start;

        loop {
            let page = source.fetch_page(query, &cursor).await?;
            report.pages += 1;

            if !page.entries.is_empty() {
                let saved = self.store.save(&page.entries)?;
                report.inserted += saved.inserted;
                report.skipped += saved.skipped;
            }
            info!(
                page = report.pages,
                entries = page.entries.len(),
                inserted = report.inserted,
                "Saved page"
            );

            match page.next {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(report)
    }

    /// Run every query. A query that hits the quota or a lookup failure is
    /// abandoned and the run moves on; persistence failures stop it.
    pub async fn fetch_all(&self) -> Result<FetchReport> {
        let queries = self.queries()?;
        let total = queries.len();
        let mut report = FetchReport::default();

        for (i, query) in queries.iter().enumerate() {
            info!("Processing query {} out of {}", i + 1, total);
            info!(query = %query, "Processing");

            match self.fetch_query(query).await {
                Ok(done) => report.absorb(done),
                Err(e @ ReviewError::QuotaExceeded(_)) => {
                    warn!(query = %query, error = %e, "Quota exceeded, abandoning query");
                    report.queries += 1;
                    report.aborted += 1;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!(query = %query, error = %e, "Query failed");
                    report.queries += 1;
                    report.aborted += 1;
                }
            }
        }

        Ok(report)
    }

    /// Fetch the result count of every query and write `index,query,count`
    /// rows to `path`.
    ///
    /// Each row is flushed as soon as it is known, so a fatal error keeps the
    /// rows counted before it. A query whose count failed gets an empty count.
    pub async fn count_queries(&self, path: &Path) -> Result<Vec<QueryCount>> {
        let source = self.source()?;
        let queries = self.queries()?;
        let total = queries.len();
        info!(total, "Counting search queries");

        let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;
        let mut counts = Vec::with_capacity(total);
        for (i, query) in queries.into_iter().enumerate() {
            info!("Counting elements for query {} out of {}", i + 1, total);
            let count = match source.fetch_count(&query).await {
                Ok(count) => {
                    info!(query = %query, count, "Query counted");
                    Some(count)
                }
                Err(e) if e.is_fatal() => {
                    error!(query = %query, error = %e, "Stopping count");
                    return Err(e);
                }
                Err(e) => {
                    error!(query = %query, error = %e, "Count failed");
                    None
                }
            };

            let row = QueryCount {
                index: i + 1,
                query,
                count,
            };
            wtr.serialize(&row)?;
            wtr.flush()?;
            counts.push(row);
        }

        Ok(counts)
    }

    /// Run one enrichment driver
    pub async fn fill(&self, driver: Driver) -> Result<EnrichmentReport> {
        let store = self.store();
        match driver {
            Driver::Publisher => enrich::fill_publisher(store, self.source()?).await,
            Driver::Continent => enrich::fill_continent(store, self.continents.as_ref()),
            Driver::Editorial => enrich::fill_editorial(store, self.doi.as_ref()).await,
            Driver::OpenAccess => enrich::fill_openaccess(store, self.source()?).await,
            Driver::Impact => enrich::fill_impact(store, self.source()?).await,
        }
    }

    /// Run every driver in order, stopping at the first fatal error
    pub async fn fill_all(&self) -> Result<Vec<(Driver, EnrichmentReport)>> {
        let mut reports = Vec::with_capacity(Driver::ALL.len());
        for driver in Driver::ALL {
            let report = self.fill(driver).await?;
            reports.push((driver, report));
        }
        Ok(reports)
    }
}
