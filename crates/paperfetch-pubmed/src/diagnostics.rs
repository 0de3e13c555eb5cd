//! Optional diagnostic output
//!
//! Raw upstream payloads and intermediate tables are handed to a
//! [`DiagnosticSink`]. The default sink discards everything; [`DirSink`]
//! writes them to a directory chosen by the user.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Receiver for debugging artifacts. Failures to record must never fail the pipeline.
pub trait DiagnosticSink {
    /// Store `contents` under the artifact name `name` (e.g. "esearch.json").
    fn record(&self, name: &str, contents: &str);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _name: &str, _contents: &str) {}
}

/// Sink that writes each artifact to `<dir>/<run-stamp>_<name>`.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
    stamp: String,
}

impl DirSink {
    /// Create the directory if needed. All artifacts of this sink share one run prefix:
    /// a millisecond timestamp plus the process id.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create debug directory {}", dir.display()))?;
        let stamp = format!(
            "{}-{}",
            chrono::Local::now().format("%Y%m%dT%H%M%S%3f"),
            std::process::id()
        );
        Ok(Self { dir, stamp })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an artifact named `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}_{name}", self.stamp))
    }
}

impl DiagnosticSink for DirSink {
    fn record(&self, name: &str, contents: &str) {
        let path = self.path_for(name);
        match std::fs::write(&path, contents) {
            Ok(()) => log::debug!("Saved {name} to {}", path.display()),
            Err(e) => log::warn!("Could not save {name} to {}: {e}", path.display()),
        }
    }
}

/// Render (pmid, author, affiliation) matches as CSV for diagnostics.
pub fn matches_csv(matches: &[(String, String, String)]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["PubmedID", "Author", "Affiliation"])?;
    for (pmid, author, affiliation) in matches {
        writer.write_record([pmid, author, affiliation])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV buffer")?;
    Ok(String::from_utf8(bytes)?)
}
