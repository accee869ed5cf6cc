use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, error, info, warn};

use super::schema::{apply_pragmas, create_tables};
use super::Store;
use crate::error::{ReviewError, Result};
use crate::models::{DocumentInput, IssnImpact, PublisherGap, SaveReport, SerialKeys, Tally, STATUS_INCLUDED};

const INSERT_DOCUMENT: &str = "
    INSERT INTO documents (
        title, abstract, keywords, author, published_date, doi, eid,
        publication_name, issn, eissn, type, sub_type, search_query, source,
        affiliation_country, citedby_count, openaccess
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)";

/// SQLite-backed [`Store`]. Every call opens its own connection and drops
/// it on return; nothing is held open between calls.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database file and its schema
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self {
            path: path.to_path_buf(),
        };
        let conn = store.connect()?;
        create_tables(&conn)?;
        debug!(path = %path.display(), "Database ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        apply_pragmas(&conn)?;
        Ok(conn)
    }

    fn query_strings(&self, sql: &str) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn query_serial_keys(&self, sql: &str) -> Result<Vec<SerialKeys>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SerialKeys {
                    eid: row.get(0)?,
                    issn: row.get(1)?,
                    eissn: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn query_tallies(&self, sql: &str) -> Result<Vec<Tally>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Tally {
                    label: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn lookup_publisher(&self, sql: &str, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let publisher = conn
            .query_row(sql, params![key], |row| row.get(0))
            .optional()?;
        Ok(publisher)
    }

    /// Run a cache write, logging the failure before handing it up as fatal.
    fn write<F>(&self, what: &str, op: F) -> Result<usize>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> rusqlite::Result<usize>,
    {
        let outcome = self.connect().and_then(|mut conn| {
            let tx = conn.transaction()?;
            let changed = op(&tx)?;
            tx.commit()?;
            Ok(changed)
        });
        match outcome {
            Ok(changed) => {
                debug!(what, changed, "Write committed");
                Ok(changed)
            }
            Err(e) => {
                error!(what, error = %e, "Failed to write");
                Err(e)
            }
        }
    }
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation)
}

impl Store for SqliteStore {
    fn save(&self, documents: &[DocumentInput]) -> Result<SaveReport> {
        let mut report = SaveReport::default();
        if documents.is_empty() {
            return Ok(report);
        }

        let mut conn = self.connect()?;
        let mut tx = conn.transaction()?;

        for doc in documents {
            let sp = tx.savepoint()?;
            let outcome = sp.execute(
                INSERT_DOCUMENT,
                params![
                    doc.title,
                    doc.abstract_text,
                    doc.keywords,
                    doc.author,
                    doc.published_date,
                    doc.doi,
                    doc.eid,
                    doc.publication_name,
                    doc.issn,
                    doc.eissn,
                    doc.doc_type,
                    doc.sub_type,
                    doc.search_query,
                    doc.source,
                    doc.affiliation_country,
                    doc.citedby_count,
                    doc.openaccess,
                ],
            );
            match outcome {
                Ok(_) => {
                    sp.commit()?;
                    report.inserted += 1;
                }
                Err(e) if is_constraint_violation(&e) => {
                    // Dropping the savepoint rolls back this row only.
                    drop(sp);
                    report.skipped += 1;
                    warn!(
                        doi = doc.doi.as_deref().unwrap_or("-"),
                        eid = doc.eid.as_deref().unwrap_or("-"),
                        "Document already exists, skipping"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to insert document");
                    return Err(e.into());
                }
            }
        }

        tx.commit()?;
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "Documents saved"
        );
        Ok(report)
    }

    fn get_empty_publisher(&self) -> Result<Vec<PublisherGap>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT d.id_document, d.eid, d.issn, d.eissn FROM documents d
             LEFT JOIN issn_publisher ip ON d.issn = ip.issn
             LEFT JOIN eissn_publisher ep ON d.eissn = ep.eissn
             WHERE ip.publisher IS NULL AND ep.publisher IS NULL
             ORDER BY d.id_document",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PublisherGap {
                    id_document: row.get(0)?,
                    eid: row.get(1)?,
                    issn: row.get(2)?,
                    eissn: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn get_all_issn_without_publisher(&self) -> Result<Vec<SerialKeys>> {
        self.query_serial_keys(
            "SELECT d.eid, d.issn, d.eissn FROM documents d
             LEFT JOIN issn_publisher p ON d.issn = p.issn
             WHERE p.publisher IS NULL AND d.issn IS NOT NULL
             ORDER BY d.id_document",
        )
    }

    fn get_all_eissn_without_publisher(&self) -> Result<Vec<SerialKeys>> {
        self.query_serial_keys(
            "SELECT d.eid, d.issn, d.eissn FROM documents d
             LEFT JOIN eissn_publisher p ON d.eissn = p.eissn
             WHERE p.publisher IS NULL AND d.eissn IS NOT NULL
             ORDER BY d.id_document",
        )
    }

    fn get_empty_continents(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT DISTINCT d.affiliation_country FROM documents d
             LEFT JOIN continents c ON d.affiliation_country = c.affiliation_country
             WHERE c.continent IS NULL AND d.affiliation_country IS NOT NULL
             ORDER BY d.affiliation_country",
        )
    }

    fn get_doi(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT d.doi FROM documents d
             LEFT OUTER JOIN doi_eurl de ON d.doi = de.doi
             WHERE d.doi IS NOT NULL AND de.eurl IS NULL
             ORDER BY d.id_document",
        )
    }

    fn get_empty_openaccess(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT d.eid FROM documents d
             WHERE d.openaccess IS NULL AND d.eid IS NOT NULL
             AND EXISTS (
                 SELECT 1 FROM study_selection ss
                 WHERE ss.id_document = d.id_document AND ss.status = ?1
             )
             ORDER BY d.id_document",
        )?;
        let rows = stmt
            .query_map(params![STATUS_INCLUDED], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn get_issn_without_impact(&self) -> Result<Vec<String>> {
        self.query_strings(
            "SELECT DISTINCT d.issn FROM documents d
             LEFT JOIN issn_impact i ON d.issn = i.issn
             WHERE d.issn IS NOT NULL AND i.issn IS NULL
             ORDER BY d.issn",
        )
    }

    fn get_publisher_by_issn(&self, issn: &str) -> Result<Option<String>> {
        self.lookup_publisher("SELECT publisher FROM issn_publisher WHERE issn = ?1", issn)
    }

    fn get_publisher_by_eissn(&self, eissn: &str) -> Result<Option<String>> {
        self.lookup_publisher("SELECT publisher FROM eissn_publisher WHERE eissn = ?1", eissn)
    }

    fn get_impact_by_issn(&self, issn: &str) -> Result<Option<IssnImpact>> {
        let conn = self.connect()?;
        let impact = conn
            .query_row(
                "SELECT citeScoreCurrentMetric, citeScoreCurrentMetricYear, citeScoreTracker,
                        citeScoreTrackerYear, sjrMetric, sjrYear
                 FROM issn_impact WHERE issn = ?1",
                params![issn],
                |row| {
                    Ok(IssnImpact {
                        issn: issn.to_string(),
                        cite_score_current: row.get(0)?,
                        cite_score_current_year: row.get(1)?,
                        cite_score_tracker: row.get(2)?,
                        cite_score_tracker_year: row.get(3)?,
                        sjr: row.get(4)?,
                        sjr_year: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(impact)
    }

    fn set_publisher_by_issn(&self, issn: &str, publisher: &str) -> Result<()> {
        self.write("issn_publisher", |tx| {
            tx.execute(
                "INSERT OR IGNORE INTO issn_publisher (issn, publisher) VALUES (?1, ?2)",
                params![issn, publisher],
            )
        })?;
        Ok(())
    }

    fn set_publisher_by_eissn(&self, eissn: &str, publisher: &str) -> Result<()> {
        self.write("eissn_publisher", |tx| {
            tx.execute(
                "INSERT OR IGNORE INTO eissn_publisher (eissn, publisher) VALUES (?1, ?2)",
                params![eissn, publisher],
            )
        })?;
        Ok(())
    }

    fn set_continent(&self, pairs: &[(String, String)]) -> Result<()> {
        self.write("continents", |tx| {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO continents (affiliation_country, continent) VALUES (?1, ?2)",
            )?;
            let mut changed = 0;
            for (country, continent) in pairs {
                changed += stmt.execute(params![country, continent])?;
            }
            Ok(changed)
        })?;
        Ok(())
    }

    fn set_doi_eurl(&self, doi: &str, eurl: &str) -> Result<()> {
        self.write("doi_eurl", |tx| {
            tx.execute(
                "INSERT OR IGNORE INTO doi_eurl (doi, eurl) VALUES (?1, ?2)",
                params![doi, eurl],
            )
        })?;
        Ok(())
    }

    fn set_openaccess(&self, eid: &str, openaccess: &str) -> Result<()> {
        let changed = self.write("documents.openaccess", |tx| {
            tx.execute(
                "UPDATE documents SET openaccess = ?1 WHERE eid = ?2 AND openaccess IS NULL",
                params![openaccess, eid],
            )
        })?;
        if changed == 0 {
            debug!(eid, "Open access already set or document unknown");
        }
        Ok(())
    }

    fn set_impact_by_issn(&self, impact: &IssnImpact) -> Result<()> {
        self.write("issn_impact", |tx| {
            tx.execute(
                "INSERT OR IGNORE INTO issn_impact (
                    issn, citeScoreCurrentMetric, citeScoreCurrentMetricYear, citeScoreTracker,
                    citeScoreTrackerYear, sjrMetric, sjrYear
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    impact.issn,
                    impact.cite_score_current,
                    impact.cite_score_current_year,
                    impact.cite_score_tracker,
                    impact.cite_score_tracker_year,
                    impact.sjr,
                    impact.sjr_year,
                ],
            )
        })?;
        Ok(())
    }

    fn add_to_study_selection(&self, id_document: i64, status: i64) -> Result<()> {
        let conn = self.connect()?;
        let exists = conn
            .query_row(
                "SELECT 1 FROM documents WHERE id_document = ?1",
                params![id_document],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        drop(conn);

        if !exists {
            return Err(ReviewError::NotFound(format!("document {}", id_document)));
        }

        self.write("study_selection", |tx| {
            tx.execute(
                "INSERT INTO study_selection (id_document, status) VALUES (?1, ?2)",
                params![id_document, status],
            )
        })?;
        Ok(())
    }

    fn set_status_studyselection(&self, id_document: i64, status: i64) -> Result<bool> {
        let changed = self.write("study_selection.status", |tx| {
            tx.execute(
                "UPDATE study_selection SET status = ?1 WHERE id_document = ?2",
                params![status, id_document],
            )
        })?;
        if changed == 0 {
            error!(id_document, "Study selection not found for the given document");
            return Ok(false);
        }
        info!(id_document, status, "Study selection status updated");
        Ok(true)
    }

    fn document_count(&self) -> Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count)
    }

    fn get_documents_eid(&self) -> Result<Vec<String>> {
        self.query_strings("SELECT eid FROM documents WHERE eid IS NOT NULL ORDER BY id_document")
    }

    fn documents_by_year(&self) -> Result<Vec<Tally>> {
        self.query_tallies(
            "SELECT substr(published_date, 1, 4) AS year, COUNT(*) FROM documents
             WHERE published_date IS NOT NULL
             GROUP BY year ORDER BY year",
        )
    }

    fn documents_by_type(&self) -> Result<Vec<Tally>> {
        self.query_tallies(
            "SELECT COALESCE(sub_type, 'Unknown') AS label, COUNT(*) AS n FROM documents
             GROUP BY label ORDER BY n DESC, label",
        )
    }

    fn documents_by_country(&self) -> Result<Vec<Tally>> {
        self.query_tallies(
            "SELECT COALESCE(affiliation_country, 'Unknown') AS label, COUNT(*) AS n FROM documents
             GROUP BY label ORDER BY n DESC, label",
        )
    }

    fn documents_by_continent(&self) -> Result<Vec<Tally>> {
        self.query_tallies(
            "SELECT COALESCE(c.continent, 'Unknown') AS label, COUNT(*) AS n FROM documents d
             LEFT JOIN continents c ON d.affiliation_country = c.affiliation_country
             GROUP BY label ORDER BY n DESC, label",
        )
    }

    fn documents_by_publisher(&self) -> Result<Vec<Tally>> {
        self.query_tallies(
            "SELECT COALESCE(ip.publisher, ep.publisher, 'Unknown') AS label, COUNT(*) AS n
             FROM documents d
             LEFT JOIN issn_publisher ip ON d.issn = ip.issn
             LEFT JOIN eissn_publisher ep ON d.eissn = ep.eissn
             GROUP BY label ORDER BY n DESC, label",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, SqliteStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteStore::open(&dir.path().join("documents.db")).expect("open store");
        (dir, store)
    }

    fn doc(n: u32) -> DocumentInput {
        DocumentInput {
            title: Some(format!("Title {}", n)),
            doi: Some(format!("10.1000/{}", n)),
            eid: Some(format!("2-s2.0-{}", n)),
            issn: Some(format!("1234{:04}", n)),
            eissn: Some(format!("5678{:04}", n)),
            published_date: NaiveDate::from_ymd_opt(2020 + n as i32 % 3, 1, 1),
            sub_type: Some("Article".into()),
            affiliation_country: Some("Spain".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_twice_is_idempotent() {
        let (_dir, store) = setup();
        let first = store.save(&[doc(1)]).expect("save");
        let second = store.save(&[doc(1)]).expect("save again");

        assert_eq!(first, SaveReport { inserted: 1, skipped: 0 });
        assert_eq!(second, SaveReport { inserted: 0, skipped: 1 });
        assert_eq!(store.document_count().expect("count"), 1);
    }

    #[test]
    fn test_conflicting_row_is_rejected_not_merged() {
        let (_dir, store) = setup();
        store.save(&[doc(1)]).expect("save");

        let mut clash = doc(2);
        clash.doi = doc(1).doi;
        clash.title = Some("Different".into());
        let report = store.save(&[clash]).expect("save clash");

        assert_eq!(report.skipped, 1);
        assert_eq!(store.document_count().expect("count"), 1);
        assert_eq!(store.get_documents_eid().expect("eids"), vec!["2-s2.0-1".to_string()]);
    }

    #[test]
    fn test_batch_survives_duplicate_in_the_middle() {
        let (_dir, store) = setup();
        store.save(&[doc(10)]).expect("seed");

        let mut dup = doc(2);
        dup.doi = doc(10).doi;
        let report = store.save(&[doc(1), dup, doc(3)]).expect("batch");

        assert_eq!(report, SaveReport { inserted: 2, skipped: 1 });
        assert_eq!(store.document_count().expect("count"), 3);
    }

    #[test]
    fn test_documents_without_identifiers_do_not_collide() {
        let (_dir, store) = setup();
        let bare = DocumentInput {
            title: Some("No ids".into()),
            ..Default::default()
        };
        let report = store.save(&[bare.clone(), bare]).expect("save");
        assert_eq!(report.inserted, 2);
    }

    #[test]
    fn test_empty_publisher_requires_both_keys_uncached() {
        let (_dir, store) = setup();
        store.save(&[doc(1), doc(2), doc(3)]).expect("save");

        store.set_publisher_by_issn("12340001", "Elsevier").expect("issn");
        store.set_publisher_by_eissn("56780002", "Springer").expect("eissn");

        let gaps = store.get_empty_publisher().expect("gaps");
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].eid.as_deref(), Some("2-s2.0-3"));
        assert_eq!(gaps[0].issn.as_deref(), Some("12340003"));
    }

    #[test]
    fn test_publisher_cache_first_write_wins() {
        let (_dir, store) = setup();
        store.set_publisher_by_issn("0001", "First").expect("first");
        store.set_publisher_by_issn("0001", "Second").expect("second");
        assert_eq!(
            store.get_publisher_by_issn("0001").expect("get"),
            Some("First".to_string())
        );
        assert_eq!(store.get_publisher_by_eissn("0001").expect("get"), None);
    }

    #[test]
    fn test_issn_and_eissn_gap_queries() {
        let (_dir, store) = setup();
        let mut no_eissn = doc(1);
        no_eissn.eissn = None;
        store.save(&[no_eissn, doc(2)]).expect("save");
        store.set_publisher_by_issn("12340002", "Wiley").expect("set");

        let issn_gaps = store.get_all_issn_without_publisher().expect("issn gaps");
        assert_eq!(issn_gaps.len(), 1);
        assert_eq!(issn_gaps[0].issn.as_deref(), Some("12340001"));

        let eissn_gaps = store.get_all_eissn_without_publisher().expect("eissn gaps");
        assert_eq!(eissn_gaps.len(), 1);
        assert_eq!(eissn_gaps[0].eissn.as_deref(), Some("56780002"));
    }

    #[test]
    fn test_continent_cache_fill_once() {
        let (_dir, store) = setup();
        let mut other = doc(2);
        other.affiliation_country = Some("Japan".into());
        store.save(&[doc(1), other, doc(3)]).expect("save");

        assert_eq!(
            store.get_empty_continents().expect("gaps"),
            vec!["Japan".to_string(), "Spain".to_string()]
        );

        let pair = vec![("Spain".to_string(), "Europe".to_string())];
        store.set_continent(&pair).expect("first");
        store.set_continent(&pair).expect("second");

        assert_eq!(store.get_empty_continents().expect("gaps"), vec!["Japan".to_string()]);
    }

    #[test]
    fn test_get_doi_anti_join() {
        let (_dir, store) = setup();
        let mut no_doi = doc(2);
        no_doi.doi = None;
        store.save(&[doc(1), no_doi]).expect("save");

        assert_eq!(store.get_doi().expect("dois"), vec!["10.1000/1".to_string()]);
        store.set_doi_eurl("10.1000/1", "www.sciencedirect.com").expect("eurl");
        assert!(store.get_doi().expect("dois").is_empty());
    }

    #[test]
    fn test_openaccess_gap_follows_study_selection() {
        let (_dir, store) = setup();
        store.save(&[doc(1), doc(2)]).expect("save");
        store.add_to_study_selection(1, STATUS_INCLUDED).expect("select 1");
        store.add_to_study_selection(2, 1).expect("select 2");

        assert_eq!(store.get_empty_openaccess().expect("gaps"), vec!["2-s2.0-1".to_string()]);

        store.set_openaccess("2-s2.0-1", "true").expect("set");
        assert!(store.get_empty_openaccess().expect("gaps").is_empty());

        // The flag transitions only once.
        store.set_openaccess("2-s2.0-1", "false").expect("set again");
        let conn = store.connect().expect("conn");
        let value: String = conn
            .query_row("SELECT openaccess FROM documents WHERE eid = '2-s2.0-1'", [], |r| r.get(0))
            .expect("read");
        assert_eq!(value, "true");
    }

    #[test]
    fn test_set_status_reports_missing_row() {
        let (_dir, store) = setup();
        store.save(&[doc(1)]).expect("save");

        assert!(!store.set_status_studyselection(1, STATUS_INCLUDED).expect("missing"));
        store.add_to_study_selection(1, 1).expect("add");
        assert!(store.set_status_studyselection(1, STATUS_INCLUDED).expect("update"));
        assert_eq!(store.get_empty_openaccess().expect("gaps").len(), 1);
    }

    #[test]
    fn test_add_to_study_selection_unknown_document() {
        let (_dir, store) = setup();
        let err = store.add_to_study_selection(42, 1).expect_err("unknown document");
        assert!(matches!(err, ReviewError::NotFound(_)));
    }

    #[test]
    fn test_impact_round_trip_and_gap() {
        let (_dir, store) = setup();
        store.save(&[doc(1)]).expect("save");
        assert_eq!(store.get_issn_without_impact().expect("gaps"), vec!["12340001".to_string()]);

        let impact = IssnImpact {
            issn: "12340001".into(),
            cite_score_current: 4.2,
            cite_score_current_year: 2022,
            cite_score_tracker: 4.5,
            cite_score_tracker_year: 2023,
            sjr: 1.1,
            sjr_year: 2022,
        };
        store.set_impact_by_issn(&impact).expect("set");
        assert_eq!(store.get_impact_by_issn("12340001").expect("get"), Some(impact));
        assert!(store.get_issn_without_impact().expect("gaps").is_empty());
    }

    #[test]
    fn test_aggregates() {
        let (_dir, store) = setup();
        let mut japan = doc(2);
        japan.affiliation_country = Some("Japan".into());
        store.save(&[doc(1), japan, doc(4)]).expect("save");
        store
            .set_continent(&[("Spain".to_string(), "Europe".to_string())])
            .expect("continent");
        store.set_publisher_by_issn("12340001", "Elsevier").expect("publisher");

        let countries = store.documents_by_country().expect("countries");
        assert_eq!(countries[0], Tally { label: "Spain".into(), count: 2 });

        let continents = store.documents_by_continent().expect("continents");
        assert!(continents.contains(&Tally { label: "Europe".into(), count: 2 }));
        assert!(continents.contains(&Tally { label: "Unknown".into(), count: 1 }));

        let years = store.documents_by_year().expect("years");
        assert_eq!(years[0], Tally { label: "2021".into(), count: 2 });

        let publishers = store.documents_by_publisher().expect("publishers");
        assert!(publishers.contains(&Tally { label: "Elsevier".into(), count: 1 }));

        let types = store.documents_by_type().expect("types");
        assert_eq!(types, vec![Tally { label: "Article".into(), count: 3 }]);
    }
}
