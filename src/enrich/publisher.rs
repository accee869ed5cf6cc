use super::{Batch, Outcome};
use crate::error::Result;
use crate::models::PublisherGap;
use crate::source::BibliographicSource;
use crate::store::Store;
use tracing::debug;

/// Fill the publisher caches for documents that have neither serial cached.
///
/// Serials already resolved earlier in the run are answered from the cache,
/// so each journal costs at most one remote lookup.
pub async fn fill_publisher(
    store: &dyn Store,
    source: &dyn BibliographicSource,
) -> Result<super::EnrichmentReport> {
    let gaps = store.get_empty_publisher()?;
    let mut batch = Batch::new("publisher", gaps.len());

    for (k, gap) in gaps.iter().enumerate() {
        let item = gap.eid.clone().unwrap_or_else(|| gap.id_document.to_string());
        batch.start(k + 1, &item);
        let outcome = resolve(store, source, gap).await;
        batch.record(&item, outcome)?;
    }

    Ok(batch.finish())
}

async fn resolve(
    store: &dyn Store,
    source: &dyn BibliographicSource,
    gap: &PublisherGap,
) -> Result<Outcome> {
    if gap.issn.is_none() && gap.eissn.is_none() {
        debug!(id_document = gap.id_document, "Document has no serial number");
        return Ok(Outcome::Skipped);
    }

    let publisher = match cached(store, gap)? {
        Some(publisher) => publisher,
        None => {
            let Some(eid) = gap.eid.as_deref() else {
                return Ok(Outcome::Skipped);
            };
            match source.fetch_entity_detail(eid).await?.publisher {
                Some(publisher) => publisher,
                None => {
                    debug!(eid, "No publisher in abstract record");
                    return Ok(Outcome::Skipped);
                }
            }
        }
    };

    if let Some(issn) = gap.issn.as_deref() {
        store.set_publisher_by_issn(issn, &publisher)?;
    }
    if let Some(eissn) = gap.eissn.as_deref() {
        store.set_publisher_by_eissn(eissn, &publisher)?;
    }
    Ok(Outcome::Filled)
}

fn cached(store: &dyn Store, gap: &PublisherGap) -> Result<Option<String>> {
    if let Some(issn) = gap.issn.as_deref() {
        if let Some(publisher) = store.get_publisher_by_issn(issn)? {
            return Ok(Some(publisher));
        }
    }
    match gap.eissn.as_deref() {
        Some(eissn) => store.get_publisher_by_eissn(eissn),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::fakes::{document, temp_store, FakeSource};
    use crate::enrich::EnrichmentReport;
    use crate::error::ReviewError;
    use crate::models::EntityDetail;

    fn detail(publisher: &str) -> EntityDetail {
        EntityDetail {
            publisher: Some(publisher.to_string()),
            openaccess: None,
        }
    }

    #[tokio::test]
    async fn test_fills_both_caches_and_closes_gaps() {
        let (_dir, store) = temp_store();
        store.save(&[document(1), document(2)]).expect("save");

        let mut source = FakeSource::default();
        source.details.insert("2-s2.0-1".into(), detail("Elsevier"));
        source.details.insert("2-s2.0-2".into(), detail("Springer"));

        let report = fill_publisher(&store, &source).await.expect("fill");

        assert_eq!(report.filled, 2);
        assert_eq!(store.get_publisher_by_issn("12340001").expect("read").as_deref(), Some("Elsevier"));
        assert_eq!(store.get_publisher_by_eissn("56780002").expect("read").as_deref(), Some("Springer"));
        assert!(store.get_empty_publisher().expect("gaps").is_empty());
    }

    #[tokio::test]
    async fn test_shared_journal_is_looked_up_once() {
        let (_dir, store) = temp_store();
        let mut second = document(2);
        second.issn = Some("12340001".into());
        second.eissn = None;
        store.save(&[document(1), second]).expect("save");

        let mut source = FakeSource::default();
        source.details.insert("2-s2.0-1".into(), detail("Elsevier"));

        let report = fill_publisher(&store, &source).await.expect("fill");

        assert_eq!(report.total, 2);
        assert_eq!(report.filled, 2);
        assert_eq!(source.calls(), vec!["detail 2-s2.0-1".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_publisher_and_lookup_failures_do_not_stop_the_run() {
        let (_dir, store) = temp_store();
        store
            .save(&[document(1), document(2), document(3)])
            .expect("save");

        let mut source = FakeSource::default();
        source.details.insert("2-s2.0-1".into(), EntityDetail::default());
        source.timeouts.push("2-s2.0-2".into());
        source.details.insert("2-s2.0-3".into(), detail("Wiley"));

        let report = fill_publisher(&store, &source).await.expect("fill");

        assert_eq!(
            report,
            EnrichmentReport {
                total: 3,
                filled: 1,
                skipped: 1,
                failed: 1
            }
        );
        assert_eq!(store.get_empty_publisher().expect("gaps").len(), 2);
    }

    #[tokio::test]
    async fn test_documents_without_serials_are_skipped() {
        let (_dir, store) = temp_store();
        let mut bare = document(1);
        bare.issn = None;
        bare.eissn = None;
        store.save(&[bare]).expect("save");

        let source = FakeSource::default();
        let report = fill_publisher(&store, &source).await.expect("fill");

        assert_eq!(report.skipped, 1);
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_quota_exceeded_stops_the_driver() {
        struct Exhausted;

        #[async_trait::async_trait]
        impl BibliographicSource for Exhausted {
            fn name(&self) -> &str {
                "Exhausted"
            }
            async fn fetch_page(&self, _: &str, _: &crate::models::Cursor) -> Result<crate::models::Page> {
                Err(ReviewError::QuotaExceeded("429".into()))
            }
            async fn fetch_count(&self, _: &str) -> Result<u64> {
                Err(ReviewError::QuotaExceeded("429".into()))
            }
            async fn fetch_entity_detail(&self, _: &str) -> Result<EntityDetail> {
                Err(ReviewError::QuotaExceeded("429".into()))
            }
            async fn fetch_impact(&self, _: &str) -> Result<Option<crate::models::IssnImpact>> {
                Err(ReviewError::QuotaExceeded("429".into()))
            }
        }

        let (_dir, store) = temp_store();
        store.save(&[document(1), document(2)]).expect("save");

        let result = fill_publisher(&store, &Exhausted).await;
        assert!(matches!(result, Err(ReviewError::QuotaExceeded(_))));
    }
}
