//! Data model shared by the store, the Scopus client and the drivers.

use chrono::NaiveDate;

/// Study-selection status meaning "included in the review"
pub const STATUS_INCLUDED: i64 = 3;

/// A document as returned by a search page, before it gets a surrogate id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInput {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub doi: Option<String>,
    pub eid: Option<String>,
    pub publication_name: Option<String>,
    pub issn: Option<String>,
    pub eissn: Option<String>,
    pub doc_type: Option<String>,
    pub sub_type: Option<String>,
    pub search_query: Option<String>,
    pub source: Option<String>,
    pub affiliation_country: Option<String>,
    pub citedby_count: Option<i64>,
    pub openaccess: Option<String>,
}

/// Outcome of a batch insert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// A document with no cached publisher under either of its serial numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherGap {
    pub id_document: i64,
    pub eid: Option<String>,
    pub issn: Option<String>,
    pub eissn: Option<String>,
}

/// Serial identifiers of a document, keyed by eid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialKeys {
    pub eid: Option<String>,
    pub issn: Option<String>,
    pub eissn: Option<String>,
}

/// Journal impact snapshot for an ISSN (citeScore and SJR)
#[derive(Debug, Clone, PartialEq)]
pub struct IssnImpact {
    pub issn: String,
    pub cite_score_current: f64,
    pub cite_score_current_year: i32,
    pub cite_score_tracker: f64,
    pub cite_score_tracker_year: i32,
    pub sjr: f64,
    pub sjr_year: i32,
}

/// Per-document metadata from the abstract-retrieval endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDetail {
    pub publisher: Option<String>,
    pub openaccess: Option<bool>,
}

/// Position in a paginated search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Start,
    Next(String),
}

/// One page of search results
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub entries: Vec<DocumentInput>,
    pub next: Option<Cursor>,
}

/// A labelled count, used by the aggregate reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub label: String,
    pub count: i64,
}

/// Render an open-access flag the way it is persisted
pub fn openaccess_label(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}
