//! CSV report output

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::extract::Record;

/// Report column names, in row order.
pub const HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// What [`write_report`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to write; no file was touched
    NoData,
}

/// Write header plus one row per record to `writer`. Returns the data row count.
pub fn write_records<W: Write>(records: &[Record], writer: W) -> Result<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for record in records {
        csv.write_record(record.to_row())?;
    }
    csv.flush()?;
    Ok(records.len())
}

/// Write `records` as CSV to `path`, creating parent directories.
///
/// An empty slice writes nothing and yields [`ReportOutcome::NoData`].
pub fn write_report(records: &[Record], path: &Path) -> Result<ReportOutcome> {
    if records.is_empty() {
        return Ok(ReportOutcome::NoData);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let rows = write_records(records, file)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote {rows} records to {}", path.display());
    Ok(ReportOutcome::Written {
        path: path.to_path_buf(),
        rows,
    })
}
