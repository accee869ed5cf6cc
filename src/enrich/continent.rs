use super::{Batch, EnrichmentReport, Outcome};
use crate::error::Result;
use crate::source::ContinentResolver;
use crate::store::Store;

/// Map every uncached affiliation country to its continent.
///
/// Unmapped countries are logged and stay in the gap list.
pub fn fill_continent(store: &dyn Store, resolver: &dyn ContinentResolver) -> Result<EnrichmentReport> {
    let countries = store.get_empty_continents()?;
    let mut batch = Batch::new("continent", countries.len());

    for (k, country) in countries.iter().enumerate() {
        batch.start(k + 1, country);
        let outcome = resolver.resolve(country).and_then(|continent| {
            store.set_continent(&[(country.clone(), continent)])?;
            Ok(Outcome::Filled)
        });
        batch.record(country, outcome)?;
    }

    Ok(batch.finish())
}
