//! Enrichment drivers: scan a gap query, resolve each key, write back.
//!
//! Every driver walks its gap list sequentially. A per-item failure is logged
//! and counted; only fatal errors (see [`ReviewError::is_fatal`]) stop the
//! loop and propagate to the caller.

mod continent;
mod editorial;
mod impact;
mod openaccess;
mod publisher;

pub use continent::fill_continent;
pub use editorial::fill_editorial;
pub use impact::fill_impact;
pub use openaccess::fill_openaccess;
pub use publisher::fill_publisher;

use crate::error::{ReviewError, Result};
use std::fmt;
use tracing::{error, info};

/// The enrichable attributes, in the order `fill all` runs them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Publisher,
    Continent,
    Editorial,
    OpenAccess,
    Impact,
}

impl Driver {
    pub const ALL: [Driver; 5] = [
        Driver::Publisher,
        Driver::Continent,
        Driver::Editorial,
        Driver::OpenAccess,
        Driver::Impact,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Driver::Publisher => "publisher",
            Driver::Continent => "continent",
            Driver::Editorial => "editorial",
            Driver::OpenAccess => "openaccess",
            Driver::Impact => "impact",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tally of one driver run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Gap items found at the start of the run
    pub total: usize,
    /// Items whose attribute was written
    pub filled: usize,
    /// Items the lookup had no value for
    pub skipped: usize,
    /// Items that failed with a non-fatal error
    pub failed: usize,
}

impl fmt::Display for EnrichmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items: {} filled, {} skipped, {} failed",
            self.total, self.filled, self.skipped, self.failed
        )
    }
}

/// Result of resolving a single gap item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Filled,
    Skipped,
}

/// Progress and outcome bookkeeping shared by the drivers
pub(crate) struct Batch {
    driver: &'static str,
    report: EnrichmentReport,
}

impl Batch {
    pub(crate) fn new(driver: &'static str, total: usize) -> Self {
        info!(driver, total, "Starting enrichment");
        Self {
            driver,
            report: EnrichmentReport {
                total,
                ..Default::default()
            },
        }
    }

    /// `k` is 1-based
    pub(crate) fn start(&self, k: usize, item: &str) {
        info!(driver = self.driver, item, "Processing item {} of {}", k, self.report.total);
    }

    /// Count an item outcome. Fatal errors are handed back.
    pub(crate) fn record(&mut self, item: &str, result: Result<Outcome>) -> Result<()> {
        match result {
            Ok(Outcome::Filled) => self.report.filled += 1,
            Ok(Outcome::Skipped) => self.report.skipped += 1,
            Err(e) if e.is_fatal() => {
                error!(driver = self.driver, item, error = %e, "Stopping enrichment");
                return Err(e);
            }
            Err(ReviewError::NotFound(what)) => {
                error!(driver = self.driver, item, "Cannot resolve {}", what);
                self.report.failed += 1;
            }
            Err(e) => {
                error!(driver = self.driver, item, error = %e, "Failed to process item");
                self.report.failed += 1;
            }
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> EnrichmentReport {
        info!(
            driver = self.driver,
            total = self.report.total,
            filled = self.report.filled,
            skipped = self.report.skipped,
            failed = self.report.failed,
            "Enrichment finished"
        );
        self.report
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    //! In-process collaborators for driver and orchestrator tests.

    use crate::error::{ReviewError, Result};
    use crate::models::{Cursor, DocumentInput, EntityDetail, IssnImpact, Page};
    use crate::source::{BibliographicSource, DoiResolver};
    use crate::store::SqliteStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    pub fn temp_store() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(&dir.path().join("documents.db")).expect("open store");
        (dir, store)
    }

    pub fn document(n: u32) -> DocumentInput {
        DocumentInput {
            title: Some(format!("Title {}", n)),
            doi: Some(format!("10.1000/{}", n)),
            eid: Some(format!("2-s2.0-{}", n)),
            issn: Some(format!("1234{:04}", n)),
            eissn: Some(format!("5678{:04}", n)),
            affiliation_country: Some("Spain".into()),
            ..Default::default()
        }
    }

    /// Scripted source: pages per query, details per eid, impacts per issn.
    #[derive(Default)]
    pub struct FakeSource {
        pub pages: HashMap<String, Vec<Vec<DocumentInput>>>,
        pub details: HashMap<String, EntityDetail>,
        pub impacts: HashMap<String, IssnImpact>,
        /// Queries answering 429 on the given page index
        pub quota_after: HashMap<String, usize>,
        /// Eids answering with a timeout
        pub timeouts: Vec<String>,
        /// Queries whose count answers 429
        pub quota_on_count: Vec<String>,
        /// Queries whose count times out
        pub failed_counts: Vec<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        fn log(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    #[async_trait]
    impl BibliographicSource for FakeSource {
        fn name(&self) -> &str {
            "Fake"
        }

        async fn fetch_page(&self, query: &str, cursor: &Cursor) -> Result<Page> {
            let index: usize = match cursor {
                Cursor::Start => 0,
                Cursor::Next(n) => n.parse().map_err(|_| ReviewError::Parse(n.clone()))?,
            };
            self.log(format!("page {} {}", query, index));

            if self.quota_after.get(query) == Some(&index) {
                return Err(ReviewError::QuotaExceeded(query.to_string()));
            }

            let pages = self.pages.get(query).cloned().unwrap_or_default();
            let entries = pages.get(index).cloned().unwrap_or_default();
            let next = if index + 1 < pages.len() {
                Some(Cursor::Next((index + 1).to_string()))
            } else {
                None
            };
            Ok(Page { entries, next })
        }

        async fn fetch_count(&self, query: &str) -> Result<u64> {
            self.log(format!("count {}", query));
            if self.quota_on_count.iter().any(|q| q == query) {
                return Err(ReviewError::QuotaExceeded(query.to_string()));
            }
            if self.failed_counts.iter().any(|q| q == query) {
                return Err(ReviewError::Timeout(query.to_string()));
            }
            let pages = self.pages.get(query).cloned().unwrap_or_default();
            Ok(pages.iter().map(|p| p.len() as u64).sum())
        }

        async fn fetch_entity_detail(&self, eid: &str) -> Result<EntityDetail> {
            self.log(format!("detail {}", eid));
            if self.timeouts.iter().any(|t| t == eid) {
                return Err(ReviewError::Timeout(eid.to_string()));
            }
            self.details
                .get(eid)
                .cloned()
                .ok_or_else(|| ReviewError::NotFound(eid.to_string()))
        }

        async fn fetch_impact(&self, issn: &str) -> Result<Option<IssnImpact>> {
            self.log(format!("impact {}", issn));
            Ok(self.impacts.get(issn).cloned())
        }
    }

    /// DOI resolver answering from a fixed table
    #[derive(Default)]
    pub struct FakeDoiResolver {
        pub hosts: HashMap<String, String>,
        pub seen: Mutex<Vec<String>>,
    }

    impl FakeDoiResolver {
        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl DoiResolver for FakeDoiResolver {
        async fn resolve_final_location(&self, doi: &str) -> Result<String> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(doi.to_string());
            }
            self.hosts
                .get(doi)
                .cloned()
                .ok_or_else(|| ReviewError::Api {
                    code: 502,
                    message: format!("no route for {}", doi),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts_outcomes() {
        let mut batch = Batch::new("test", 4);
        batch.record("a", Ok(Outcome::Filled)).expect("not fatal");
        batch.record("b", Ok(Outcome::Skipped)).expect("not fatal");
        batch
            .record("c", Err(ReviewError::NotFound("c".into())))
            .expect("not fatal");
        batch
            .record("d", Err(ReviewError::Timeout("d".into())))
            .expect("not fatal");

        let report = batch.finish();
        assert_eq!(
            report,
            EnrichmentReport {
                total: 4,
                filled: 1,
                skipped: 1,
                failed: 2
            }
        );
    }

    #[test]
    fn test_batch_hands_back_fatal_errors() {
        let mut batch = Batch::new("test", 1);
        let result = batch.record("a", Err(ReviewError::QuotaExceeded("429".into())));
        assert!(matches!(result, Err(ReviewError::QuotaExceeded(_))));
    }

    #[test]
    fn test_report_display() {
        let report = EnrichmentReport {
            total: 3,
            filled: 2,
            skipped: 0,
            failed: 1,
        };
        assert_eq!(report.to_string(), "3 items: 2 filled, 0 skipped, 1 failed");
    }
}
