//! Interfaces of the external collaborators the pipeline talks to.
//!
//! The drivers and the orchestrator only see these traits; the Scopus,
//! doi.org and static-table implementations live in their own modules, and
//! tests substitute in-process fakes.

use crate::error::Result;
use crate::models::{Cursor, EntityDetail, IssnImpact, Page};
use async_trait::async_trait;

/// Paginated bibliographic database (Scopus)
#[async_trait]
pub trait BibliographicSource: Send + Sync {
    /// Label stored in `documents.source`
    fn name(&self) -> &str;

    /// Fetch one page of results; `next` is `None` on the last page.
    async fn fetch_page(&self, query: &str, cursor: &Cursor) -> Result<Page>;

    /// Total number of results for a query
    async fn fetch_count(&self, query: &str) -> Result<u64>;

    /// Per-document metadata (publisher, open access)
    async fn fetch_entity_detail(&self, eid: &str) -> Result<EntityDetail>;

    /// Journal metrics for an ISSN, `None` when the serial has none
    async fn fetch_impact(&self, issn: &str) -> Result<Option<IssnImpact>>;
}

/// Country name to continent name
pub trait ContinentResolver: Send + Sync {
    /// Fails with `ReviewError::NotFound` for unmapped names.
    fn resolve(&self, country: &str) -> Result<String>;
}

/// DOI to the host of the publisher landing page
#[async_trait]
pub trait DoiResolver: Send + Sync {
    async fn resolve_final_location(&self, doi: &str) -> Result<String>;
}
