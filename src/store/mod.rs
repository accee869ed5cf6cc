//! Record store: schema, idempotent persistence and the gap queries.
//!
//! Callers depend on the [`Store`] capability trait; [`SqliteStore`] is the
//! embedded adapter. Side tables are insert-or-ignore caches, so a gap that
//! closes between a gap query and the matching `set_*` call turns that call
//! into a no-op.

pub mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::{DocumentInput, IssnImpact, PublisherGap, SaveReport, SerialKeys, Tally};

/// Persistence capabilities used by the pipeline, the drivers and the reports.
pub trait Store: Send + Sync {
    /// Insert documents; rows colliding on `doi`/`eid` are skipped.
    fn save(&self, documents: &[DocumentInput]) -> Result<SaveReport>;

    // === Gap queries ===

    /// Documents with no cached publisher under their issn nor their eissn.
    fn get_empty_publisher(&self) -> Result<Vec<PublisherGap>>;
    fn get_all_issn_without_publisher(&self) -> Result<Vec<SerialKeys>>;
    fn get_all_eissn_without_publisher(&self) -> Result<Vec<SerialKeys>>;
    /// Distinct affiliation countries with no continent row.
    fn get_empty_continents(&self) -> Result<Vec<String>>;
    /// Non-null dois with no editorial URL row, in insertion order.
    fn get_doi(&self) -> Result<Vec<String>>;
    /// Eids of included documents whose open-access flag is unknown.
    fn get_empty_openaccess(&self) -> Result<Vec<String>>;
    fn get_issn_without_impact(&self) -> Result<Vec<String>>;

    // === Cache reads ===

    fn get_publisher_by_issn(&self, issn: &str) -> Result<Option<String>>;
    fn get_publisher_by_eissn(&self, eissn: &str) -> Result<Option<String>>;
    fn get_impact_by_issn(&self, issn: &str) -> Result<Option<IssnImpact>>;

    // === Cache fills (insert-or-ignore) ===

    fn set_publisher_by_issn(&self, issn: &str, publisher: &str) -> Result<()>;
    fn set_publisher_by_eissn(&self, eissn: &str, publisher: &str) -> Result<()>;
    fn set_continent(&self, pairs: &[(String, String)]) -> Result<()>;
    fn set_doi_eurl(&self, doi: &str, eurl: &str) -> Result<()>;
    /// Set the open-access flag of a document if it is still unset.
    fn set_openaccess(&self, eid: &str, openaccess: &str) -> Result<()>;
    fn set_impact_by_issn(&self, impact: &IssnImpact) -> Result<()>;

    // === Study selection ===

    fn add_to_study_selection(&self, id_document: i64, status: i64) -> Result<()>;
    /// Returns `false` when the document has no study-selection row.
    fn set_status_studyselection(&self, id_document: i64, status: i64) -> Result<bool>;

    // === Aggregates ===

    fn document_count(&self) -> Result<i64>;
    fn get_documents_eid(&self) -> Result<Vec<String>>;
    fn documents_by_year(&self) -> Result<Vec<Tally>>;
    fn documents_by_type(&self) -> Result<Vec<Tally>>;
    fn documents_by_country(&self) -> Result<Vec<Tally>>;
    fn documents_by_continent(&self) -> Result<Vec<Tally>>;
    fn documents_by_publisher(&self) -> Result<Vec<Tally>>;
}
