use super::{Batch, EnrichmentReport, Outcome};
use crate::error::Result;
use crate::source::BibliographicSource;
use crate::store::Store;
use tracing::debug;

/// Snapshot citeScore and SJR for every ISSN without an impact row.
pub async fn fill_impact(store: &dyn Store, source: &dyn BibliographicSource) -> Result<EnrichmentReport> {
    let issns = store.get_issn_without_impact()?;
    let mut batch = Batch::new("impact", issns.len());

    for (k, issn) in issns.iter().enumerate() {
        batch.start(k + 1, issn);
        let outcome = match source.fetch_impact(issn).await {
            Ok(Some(impact)) => store.set_impact_by_issn(&impact).map(|_| Outcome::Filled),
            Ok(None) => {
                debug!(issn, "Serial has no metrics");
                Ok(Outcome::Skipped)
            }
            Err(e) => Err(e),
        };
        batch.record(issn, outcome)?;
    }

    Ok(batch.finish())
}
