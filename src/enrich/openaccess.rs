use super::{Batch, EnrichmentReport, Outcome};
use crate::error::Result;
use crate::models::openaccess_label;
use crate::source::BibliographicSource;
use crate::store::Store;
use tracing::debug;

/// Record the open-access flag of included documents that lack one.
pub async fn fill_openaccess(
    store: &dyn Store,
    source: &dyn BibliographicSource,
) -> Result<EnrichmentReport> {
    let eids = store.get_empty_openaccess()?;
    let mut batch = Batch::new("openaccess", eids.len());

    for (k, eid) in eids.iter().enumerate() {
        batch.start(k + 1, eid);
        let outcome = match source.fetch_entity_detail(eid).await {
            Ok(detail) => match detail.openaccess {
                Some(flag) => store
                    .set_openaccess(eid, openaccess_label(flag))
                    .map(|_| Outcome::Filled),
                None => {
                    debug!(eid, "No open access flag in abstract record");
                    Ok(Outcome::Skipped)
                }
            },
            Err(e) => Err(e),
        };
        batch.record(eid, outcome)?;
    }

    Ok(batch.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::fakes::{document, temp_store, FakeSource};
    use crate::models::{EntityDetail, STATUS_INCLUDED};

    #[tokio::test]
    async fn test_only_included_documents_are_looked_up() {
        let (_dir, store) = temp_store();
        store.save(&[document(1), document(2)]).expect("save");
        store.add_to_study_selection(1, STATUS_INCLUDED).expect("select");
        store.add_to_study_selection(2, 1).expect("select");

        let mut source = FakeSource::default();
        source.details.insert(
            "2-s2.0-1".into(),
            EntityDetail {
                publisher: None,
                openaccess: Some(true),
            },
        );

        let report = fill_openaccess(&store, &source).await.expect("fill");

        assert_eq!(report.total, 1);
        assert_eq!(report.filled, 1);
        assert_eq!(source.calls(), vec!["detail 2-s2.0-1".to_string()]);
        assert!(store.get_empty_openaccess().expect("gaps").is_empty());
    }

    #[tokio::test]
    async fn test_unknown_flag_leaves_the_gap() {
        let (_dir, store) = temp_store();
        store.save(&[document(1)]).expect("save");
        store.add_to_study_selection(1, STATUS_INCLUDED).expect("select");

        let mut source = FakeSource::default();
        source.details.insert("2-s2.0-1".into(), EntityDetail::default());

        let report = fill_openaccess(&store, &source).await.expect("fill");

        assert_eq!(report.skipped, 1);
        assert_eq!(store.get_empty_openaccess().expect("gaps"), vec!["2-s2.0-1".to_string()]);
    }
}
