//! Scopus (Elsevier) API client.
//!
//! Covers the three endpoints the review needs:
//! - Search (`/search/scopus`), cursor-paginated, one page per call
//! - Abstract retrieval (`/abstract/eid/{eid}`) for publisher and open access
//! - Serial title (`/serial/title/issn/{issn}`) for citeScore / SJR
//!
//! Every request passes through a per-endpoint [`Throttle`] and the shared
//! [`RetryPolicy`]. HTTP 429 becomes [`ReviewError::QuotaExceeded`].

use crate::config::ScopusConfig;
use crate::error::{OptionExt, ReviewError, Result};
use crate::models::{Cursor, DocumentInput, EntityDetail, IssnImpact, Page};
use crate::source::BibliographicSource;
use crate::throttle::{RetryPolicy, Throttle};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Label stored in `documents.source`
pub const SOURCE_NAME: &str = "Scopus";

const USER_AGENT: &str = "litreview/0.1 (systematic review collector)";

/// Scopus client with per-endpoint call budgets
pub struct ScopusClient {
    client: Client,
    api_key: String,
    base_url: String,
    date_range: String,
    search_throttle: Throttle,
    lookup_throttle: Throttle,
    retry: RetryPolicy,
}

impl ScopusClient {
    /// Create a new ScopusClient
    ///
    /// # Arguments
    ///
    /// * `api_key` - Elsevier API key
    /// * `date_range` - Scopus `date` filter applied to searches
    /// * `config` - endpoint, rates and timeout
    /// * `retry` - policy for transient failures
    pub fn new(
        api_key: String,
        date_range: String,
        config: &ScopusConfig,
        retry: RetryPolicy,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(ReviewError::Config(
                "Please define the ELSEVIER_API_KEY environment variable".into(),
            ));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ReviewError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            date_range,
            search_throttle: Throttle::per_second("scopus-search", config.search_calls_per_second),
            lookup_throttle: Throttle::per_second("scopus-lookup", config.lookup_calls_per_second),
            retry,
        })
    }

    /// Throttled GET returning a decoded JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str, throttle: &Throttle) -> Result<T> {
        throttle.wait().await;

        let response = self
            .client
            .get(url)
            .header("X-ELS-APIKey", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(classify)?;

        if let Some(remaining) = response.headers().get("X-RateLimit-Remaining") {
            debug!(remaining = ?remaining, "Scopus requests left");
        }

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ReviewError::QuotaExceeded(format!(
                "Scopus refused {} with 429",
                strip_query(url)
            )));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ReviewError::NotFound(strip_query(url).to_string()));
        }
        if !status.is_success() {
            return Err(ReviewError::Api {
                code: status.as_u16(),
                message: format!("Scopus API error: {}", status),
            });
        }

        response.json::<T>().await.map_err(classify)
    }
}

#[async_trait]
impl BibliographicSource for ScopusClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn fetch_page(&self, query: &str, cursor: &Cursor) -> Result<Page> {
        let url = match cursor {
            Cursor::Start => build_search_url(&self.base_url, query, &self.date_range),
            Cursor::Next(href) => href.clone(),
        };
        debug!(url = %strip_query(&url), "Fetching Scopus page");

        let response: SearchResponse = self
            .retry
            .run("scopus search", || self.get_json(&url, &self.search_throttle))
            .await?;

        let page = parse_search_page(response, query, SOURCE_NAME);
        info!(query, entries = page.entries.len(), "Parsed Scopus page");
        Ok(page)
    }

    async fn fetch_count(&self, query: &str) -> Result<u64> {
        let url = build_count_url(&self.base_url, query, &self.date_range);
        let response: SearchResponse = self
            .retry
            .run("scopus count", || self.get_json(&url, &self.search_throttle))
            .await?;

        response
            .results
            .total_results
            .as_ref()
            .and_then(value_to_string)
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_parse("opensearch:totalResults")
    }

    async fn fetch_entity_detail(&self, eid: &str) -> Result<EntityDetail> {
        let url = format!("{}/abstract/eid/{}", self.base_url, urlencoding::encode(eid));
        let response: Value = self
            .retry
            .run("scopus abstract", || self.get_json(&url, &self.lookup_throttle))
            .await?;

        let detail = parse_entity_detail(&response);
        if detail.publisher.is_none() {
            warn!(eid, "No publisher in abstract record");
        }
        Ok(detail)
    }

    async fn fetch_impact(&self, issn: &str) -> Result<Option<IssnImpact>> {
        let url = format!("{}/serial/title/issn/{}", self.base_url, urlencoding::encode(issn));
        let response: SerialResponse = self
            .retry
            .run("scopus serial", || self.get_json(&url, &self.lookup_throttle))
            .await?;

        Ok(parse_impact(issn, response))
    }
}

/// Map transport failures onto the retry taxonomy
fn classify(e: reqwest::Error) -> ReviewError {
    if e.is_timeout() {
        ReviewError::Timeout(e.to_string())
    } else {
        ReviewError::Network(e)
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Build the first-page search URL (cursor pagination)
fn build_search_url(base_url: &str, query: &str, date_range: &str) -> String {
    format!(
        "{}/search/scopus?query={}&cursor=*&date={}&view=COMPLETE",
        base_url,
        urlencoding::encode(query),
        urlencoding::encode(date_range)
    )
}

/// Build a minimal search URL used only for the total count
fn build_count_url(base_url: &str, query: &str, date_range: &str) -> String {
    format!(
        "{}/search/scopus?query={}&start=0&count=5&date={}",
        base_url,
        urlencoding::encode(query),
        urlencoding::encode(date_range)
    )
}

// === Scopus API Response Types ===

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "search-results")]
    results: SearchResults,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(rename = "opensearch:totalResults", default)]
    total_results: Option<Value>,
    #[serde(default)]
    entry: Vec<ScopusEntry>,
    #[serde(default)]
    link: Vec<ScopusLink>,
}

#[derive(Debug, Deserialize)]
struct ScopusLink {
    #[serde(rename = "@ref")]
    rel: String,
    #[serde(rename = "@href")]
    href: String,
}

#[derive(Debug, Deserialize)]
struct ScopusEntry {
    #[serde(rename = "dc:title")]
    title: Option<String>,
    #[serde(rename = "dc:description")]
    description: Option<String>,
    authkeywords: Option<String>,
    #[serde(rename = "dc:creator")]
    creator: Option<String>,
    #[serde(rename = "prism:coverDate")]
    cover_date: Option<String>,
    eid: Option<String>,
    #[serde(rename = "prism:doi")]
    doi: Option<String>,
    #[serde(rename = "prism:publicationName")]
    publication_name: Option<String>,
    #[serde(rename = "prism:issn")]
    issn: Option<String>,
    #[serde(rename = "prism:eIssn")]
    eissn: Option<String>,
    #[serde(rename = "prism:aggregationType")]
    aggregation_type: Option<String>,
    #[serde(rename = "subtypeDescription")]
    subtype_description: Option<String>,
    #[serde(default)]
    affiliation: Option<Vec<ScopusAffiliation>>,
    #[serde(rename = "citedby-count")]
    citedby_count: Option<Value>,
    /// Set on the placeholder entry of an empty result set
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScopusAffiliation {
    #[serde(rename = "affiliation-country")]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SerialResponse {
    #[serde(rename = "serial-metadata-response")]
    response: SerialMetadata,
}

#[derive(Debug, Deserialize)]
struct SerialMetadata {
    #[serde(default)]
    entry: Vec<SerialEntry>,
}

#[derive(Debug, Deserialize)]
struct SerialEntry {
    #[serde(rename = "citeScoreYearInfoList")]
    cite_score: Option<CiteScoreInfo>,
    #[serde(rename = "SJRList")]
    sjr_list: Option<SjrList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CiteScoreInfo {
    cite_score_current_metric: Option<Value>,
    cite_score_current_metric_year: Option<Value>,
    cite_score_tracker: Option<Value>,
    cite_score_tracker_year: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SjrList {
    #[serde(rename = "SJR", default)]
    sjr: Vec<SjrValue>,
}

#[derive(Debug, Deserialize)]
struct SjrValue {
    #[serde(rename = "$")]
    value: Option<Value>,
    #[serde(rename = "@year")]
    year: Option<Value>,
}

/// Turn a search response into documents plus the next cursor
fn parse_search_page(response: SearchResponse, query: &str, source: &str) -> Page {
    let entries: Vec<DocumentInput> = response
        .results
        .entry
        .into_iter()
        .filter(|e| e.error.is_none())
        .map(|e| to_document(e, query, source))
        .collect();

    // An empty page ends the walk even if Scopus still offers a next link.
    let next = if entries.is_empty() {
        None
    } else {
        response
            .results
            .link
            .into_iter()
            .find(|l| l.rel == "next")
            .map(|l| Cursor::Next(l.href))
    };

    Page { entries, next }
}

fn to_document(entry: ScopusEntry, query: &str, source: &str) -> DocumentInput {
    let affiliation_country = entry
        .affiliation
        .as_ref()
        .and_then(|list| list.first())
        .and_then(|a| a.country.clone());
    if affiliation_country.is_none() {
        debug!(author = entry.creator.as_deref().unwrap_or("-"), "Entry has no affiliation");
    }

    let published_date = entry
        .cover_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

    let citedby_count = entry
        .citedby_count
        .as_ref()
        .and_then(value_to_string)
        .and_then(|s| s.parse::<i64>().ok());

    DocumentInput {
        title: entry.title,
        abstract_text: entry.description,
        keywords: entry.authkeywords,
        author: entry.creator,
        published_date,
        doi: entry.doi,
        eid: entry.eid,
        publication_name: entry.publication_name,
        issn: entry.issn,
        eissn: entry.eissn,
        doc_type: entry.aggregation_type,
        sub_type: entry.subtype_description,
        search_query: Some(query.to_string()),
        source: Some(source.to_string()),
        affiliation_country,
        citedby_count,
        openaccess: None,
    }
}

/// Extract publisher and open-access flag from an abstract-retrieval body
fn parse_entity_detail(body: &Value) -> EntityDetail {
    let root = &body["abstracts-retrieval-response"];

    // `publisher` is an object for most records and a list for a few.
    let publisher_node = &root["item"]["bibrecord"]["head"]["source"]["publisher"];
    let publisher = match publisher_node {
        Value::Array(list) => list.iter().find_map(|p| p["publishername"].as_str()),
        other => other["publishername"].as_str(),
    }
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(String::from);

    let coredata = &root["coredata"];
    let openaccess = parse_flag(&coredata["openaccess"]).or_else(|| parse_flag(&coredata["openaccessFlag"]));

    EntityDetail {
        publisher,
        openaccess,
    }
}

/// Extract citeScore and SJR figures; `None` unless all six are present
fn parse_impact(issn: &str, response: SerialResponse) -> Option<IssnImpact> {
    let entry = response.response.entry.into_iter().next()?;
    let cite = entry.cite_score?;
    let sjr = entry.sjr_list?.sjr.into_iter().next()?;

    Some(IssnImpact {
        issn: issn.to_string(),
        cite_score_current: parse_number(cite.cite_score_current_metric.as_ref())?,
        cite_score_current_year: parse_number(cite.cite_score_current_metric_year.as_ref())?,
        cite_score_tracker: parse_number(cite.cite_score_tracker.as_ref())?,
        cite_score_tracker_year: parse_number(cite.cite_score_tracker_year.as_ref())?,
        sjr: parse_number(sjr.value.as_ref())?,
        sjr_year: parse_number(sjr.year.as_ref())?,
    })
}

fn parse_number<T: std::str::FromStr>(value: Option<&Value>) -> Option<T> {
    value.and_then(value_to_string)?.trim().parse().ok()
}

/// Scopus encodes flags as "1"/"0", 1/0 or booleans depending on endpoint
fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Convert JSON value to string
fn value_to_string(val: &Value) -> Option<String> {
    match val {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        _ => Some(val.to_string()),
    }
}
