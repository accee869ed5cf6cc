use super::{Batch, EnrichmentReport, Outcome};
use crate::error::Result;
use crate::source::DoiResolver;
use crate::store::Store;

/// Resolve the editorial host of every DOI without one, newest first.
pub async fn fill_editorial(store: &dyn Store, resolver: &dyn DoiResolver) -> Result<EnrichmentReport> {
    let dois = store.get_doi()?;
    let mut batch = Batch::new("editorial", dois.len());

    for (k, doi) in dois.iter().rev().enumerate() {
        batch.start(k + 1, doi);
        let outcome = match resolver.resolve_final_location(doi).await {
            Ok(host) => store.set_doi_eurl(doi, &host).map(|_| Outcome::Filled),
            Err(e) => Err(e),
        };
        batch.record(doi, outcome)?;
    }

    Ok(batch.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::fakes::{document, temp_store, FakeDoiResolver};

    #[tokio::test]
    async fn test_walks_newest_first_and_continues_on_errors() {
        let (_dir, store) = temp_store();
        store
            .save(&[document(1), document(2), document(3)])
            .expect("save");

        let mut resolver = FakeDoiResolver::default();
        resolver
            .hosts
            .insert("10.1000/1".into(), "www.sciencedirect.com".into());
        resolver
            .hosts
            .insert("10.1000/3".into(), "link.springer.com".into());

        let report = fill_editorial(&store, &resolver).await.expect("fill");

        assert_eq!(
            resolver.seen(),
            vec!["10.1000/3".to_string(), "10.1000/2".to_string(), "10.1000/1".to_string()]
        );
        assert_eq!(report.filled, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(store.get_doi().expect("gaps"), vec!["10.1000/2".to_string()]);
    }
}
