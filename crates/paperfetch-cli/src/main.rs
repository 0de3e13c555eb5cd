//! paperfetch - find industry-affiliated authors in PubMed results
//!
//! Searches PubMed, fetches the matching articles, and lists authors whose
//! affiliations look non-academic, as a CSV file or a console table.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use paperfetch_pubmed::{
    ClassifierPolicy, DiagnosticSink, DirSink, EmptyReason, HEADER, NoopSink, Outcome, Record,
    ReportOutcome, write_report,
};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "paperfetch")]
#[command(about = "List non-academic authors of PubMed articles matching a query")]
#[command(version)]
struct Cli {
    /// PubMed search query
    #[arg(default_value = paperfetch_pubmed::config::DEFAULT_QUERY)]
    query: String,

    /// Write results to this CSV file instead of the console
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Config file path (default: ./paperfetch.toml or ~/.config/paperfetch/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of articles to fetch
    #[arg(long)]
    max_results: Option<usize>,

    /// Affiliation classification policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Save raw responses and extracted author matches to this directory
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Non-academic unless an academic keyword appears
    AcademicAbsence,
    /// Non-academic only with a corporate keyword and no academic keyword
    CorporateMarkers,
}

impl From<PolicyArg> for ClassifierPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::AcademicAbsence => ClassifierPolicy::AcademicAbsence,
            PolicyArg::CorporateMarkers => ClassifierPolicy::CorporateMarkers,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = paperfetch_core::ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug, spinners show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    paperfetch_core::init_logging(quiet, cli.debug, multi);

    // Load configuration
    let file_config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Config file defaults, CLI overrides
    let mut pipeline = file_config.to_pipeline_config(&cli.query);
    if let Some(n) = cli.max_results {
        pipeline.max_results = n;
    }
    if let Some(policy) = cli.policy {
        pipeline.policy = policy.into();
    }

    if cli.show_config {
        print_config(&pipeline, &cli);
        return Ok(());
    }

    let sink: Box<dyn DiagnosticSink> = match &cli.debug_dir {
        Some(dir) => Box::new(DirSink::create(dir)?),
        None => Box::new(NoopSink),
    };

    let outcome = paperfetch_pubmed::run(&pipeline, sink.as_ref(), &progress)
        .context("PubMed request failed")?;

    let records = match outcome {
        Outcome::Records(records) => records,
        Outcome::Empty(EmptyReason::NoIdentifiers) => {
            log::warn!("No PubMed articles matched {:?}", pipeline.query);
            return Ok(());
        }
        Outcome::Empty(EmptyReason::NoDocuments) => {
            log::warn!("PubMed returned no article documents for the matched identifiers");
            return Ok(());
        }
    };

    match &cli.file {
        Some(path) => match write_report(&records, path)? {
            ReportOutcome::Written { path, rows } => {
                eprintln!("Saved {rows} records to {}", path.display());
            }
            ReportOutcome::NoData => log::warn!("No records to write"),
        },
        None => println!("{}", records_table(&records)),
    }

    Ok(())
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn records_table(records: &[Record]) -> Table {
    let mut table = styled_table();
    table.set_header(HEADER.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    for record in records {
        table.add_row(record.to_row());
    }
    table
}

fn print_config(pipeline: &paperfetch_pubmed::Config, cli: &Cli) {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    table.add_row(vec!["Query", &pipeline.query]);
    table.add_row(vec!["E-utilities URL", &pipeline.base_url]);
    table.add_row(vec!["Max results", &pipeline.max_results.to_string()]);
    table.add_row(vec![
        "API key",
        if pipeline.api_key.is_some() {
            "configured"
        } else {
            "not set"
        },
    ]);
    table.add_row(vec!["Tool", pipeline.tool.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Email", pipeline.email.as_deref().unwrap_or("-")]);
    table.add_row(vec!["Timeout", &format_secs(pipeline.timeout)]);
    table.add_row(vec!["Title placeholder", &pipeline.title_placeholder]);
    table.add_row(vec!["Classifier policy", pipeline.policy.as_str()]);
    table.add_row(vec![
        "Output",
        &cli.file
            .as_ref()
            .map_or("console".to_string(), |p| p.display().to_string()),
    ]);
    table.add_row(vec![
        "Debug directory",
        &cli.debug_dir
            .as_ref()
            .map_or("-".to_string(), |p| p.display().to_string()),
    ]);

    eprintln!("\n{table}");
}

fn format_secs(d: Duration) -> String {
    format!("{}s", d.as_secs())
}
