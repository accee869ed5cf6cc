//! Descriptive aggregates written as CSV files.
//!
//! One file per distribution, two columns each: the grouping label and the
//! number of documents.

use crate::error::Result;
use crate::models::Tally;
use crate::store::Store;
use std::path::{Path, PathBuf};
use tracing::info;

type Aggregate = fn(&dyn Store) -> Result<Vec<Tally>>;

/// Aggregate files produced by [`write_reports`]: file name, label column
/// and the store query behind it
pub const REPORTS: &[(&str, &str, Aggregate)] = &[
    ("documents_by_year.csv", "year", |s| s.documents_by_year()),
    ("documents_by_type.csv", "type", |s| s.documents_by_type()),
    ("documents_by_country.csv", "country", |s| s.documents_by_country()),
    ("documents_by_continent.csv", "continent", |s| s.documents_by_continent()),
    ("documents_by_publisher.csv", "publisher", |s| s.documents_by_publisher()),
];

/// Write every aggregate into `dir`, creating it if needed.
///
/// Returns the paths written, in [`REPORTS`] order.
pub fn write_reports(store: &dyn Store, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(REPORTS.len());
    for (file, label, aggregate) in REPORTS {
        let tallies = aggregate(store)?;
        let path = dir.join(file);
        write_tallies(&path, label, &tallies)?;
        info!(path = %path.display(), rows = tallies.len(), "Report written");
        written.push(path);
    }
    Ok(written)
}

fn write_tallies(path: &Path, label: &str, tallies: &[Tally]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record([label, "documents"])?;
    for tally in tallies {
        wtr.write_record([tally.label.as_str(), &tally.count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
