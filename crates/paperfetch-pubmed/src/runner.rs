//! Main runner for the PubMed pipeline

use std::time::{Duration, Instant};

use paperfetch_core::{ProgressContext, finish_stage};

use crate::config::Config;
use crate::diagnostics::{DiagnosticSink, matches_csv};
use crate::eutils::{EutilsError, FetchClient, SearchClient};
use crate::extract::{Record, extract_record_with_details};

/// Why a run produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// esearch matched nothing
    NoIdentifiers,
    /// efetch returned no articles for the identifiers
    NoDocuments,
}

/// Result of a successful run.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Records(Vec<Record>),
    Empty(EmptyReason),
}

/// Pipeline execution summary
#[derive(Debug)]
struct Summary {
    ids_found: usize,
    records_built: usize,
    elapsed: Duration,
}

/// Search, fetch, and extract one record per article.
///
/// Transport and payload failures end the run; no partial result is returned.
pub fn run(
    config: &Config,
    sink: &dyn DiagnosticSink,
    progress: &ProgressContext,
) -> Result<Outcome, EutilsError> {
    let start = Instant::now();
    log::info!("Searching PubMed for {:?}", config.query);

    let search_line = progress.stage_line("search");
    search_line.set_message(config.query.clone());
    let ids = SearchClient::new(config, sink).search(&config.query);
    let ids = match ids {
        Ok(ids) => {
            finish_stage(&search_line, format!("{} ids", ids.len()));
            ids
        }
        Err(e) => {
            finish_stage(&search_line, "failed");
            return Err(e);
        }
    };

    if ids.is_empty() {
        log::info!("No PubMed identifiers matched {:?}", config.query);
        return Ok(Outcome::Empty(EmptyReason::NoIdentifiers));
    }
    log::debug!("PMIDs: {}", ids.join(","));

    let fetch_line = progress.stage_line("fetch");
    fetch_line.set_message(format!("{} articles", ids.len()));
    let articles = match FetchClient::new(config, sink).fetch(&ids) {
        Ok(articles) => {
            finish_stage(&fetch_line, format!("{} articles", articles.len()));
            articles
        }
        Err(e) => {
            finish_stage(&fetch_line, "failed");
            return Err(e);
        }
    };

    if articles.is_empty() {
        log::info!("efetch returned no articles for {} ids", ids.len());
        return Ok(Outcome::Empty(EmptyReason::NoDocuments));
    }

    let options = config.extract_options();
    let mut records = Vec::with_capacity(articles.len());
    let mut matches = Vec::new();
    for article in &articles {
        let (record, summary) = extract_record_with_details(article, &options);
        matches.extend(
            summary
                .matches
                .into_iter()
                .map(|(author, affiliation)| (record.pmid().to_string(), author, affiliation)),
        );
        records.push(record);
    }
    record_matches(sink, &matches);

    let summary = Summary {
        ids_found: ids.len(),
        records_built: records.len(),
        elapsed: start.elapsed(),
    };
    log_summary(&config.query, &summary);

    Ok(Outcome::Records(records))
}

fn record_matches(sink: &dyn DiagnosticSink, matches: &[(String, String, String)]) {
    if matches.is_empty() {
        return;
    }
    match matches_csv(matches) {
        Ok(csv) => sink.record("extracted_authors.csv", &csv),
        Err(e) => log::warn!("Could not render author matches: {e:#}"),
    }
}

fn log_summary(query: &str, summary: &Summary) {
    log::info!("=== PubMed Fetch Summary ===");
    log::info!("Query: {query:?}");
    log::info!(
        "Identifiers: {}, records: {}",
        summary.ids_found,
        summary.records_built
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());
}
