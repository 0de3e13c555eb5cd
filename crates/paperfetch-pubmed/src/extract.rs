//! Record extraction from one PubMed article node

use crate::classify::ClassifierPolicy;
use crate::node::XmlNode;
use crate::resolve::{AuthorSummary, NOT_AVAILABLE, resolve_authors};

/// Default title when an article has no `<ArticleTitle>`
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// One article's report row.
///
/// Always six fields; list fields are never empty (they hold `["N/A"]` instead).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pmid: String,
    title: String,
    publication_date: String,
    authors: Vec<String>,
    affiliations: Vec<String>,
    email: String,
}

impl Record {
    /// Build a record, substituting "N/A" for blank scalars and empty lists.
    pub fn new(
        pmid: impl Into<String>,
        title: impl Into<String>,
        publication_date: impl Into<String>,
        authors: Vec<String>,
        affiliations: Vec<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            pmid: scalar_or_na(pmid.into()),
            title: scalar_or_na(title.into()),
            publication_date: scalar_or_na(publication_date.into()),
            authors: list_or_na(authors),
            affiliations: list_or_na(affiliations),
            email: scalar_or_na(email.into()),
        }
    }

    pub fn pmid(&self) -> &str {
        &self.pmid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    /// Non-academic author names
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Company affiliation strings
    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    /// Corresponding-author email(s), "; "-joined
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Flatten to report columns, joining list fields with "; ".
    pub fn to_row(&self) -> [String; 6] {
        [
            self.pmid.clone(),
            self.title.clone(),
            self.publication_date.clone(),
            self.authors.join("; "),
            self.affiliations.join("; "),
            self.email.clone(),
        ]
    }
}

/// Knobs for extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Title used when none is present ("Unknown Title", or "N/A" for the terse profile)
    pub title_placeholder: String,
    pub policy: ClassifierPolicy,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            title_placeholder: UNKNOWN_TITLE.to_string(),
            policy: ClassifierPolicy::default(),
        }
    }
}

/// Extract a [`Record`] and the resolver details from one article.
///
/// Never fails: missing pieces become defaults.
pub fn extract_record_with_details(
    article: &XmlNode,
    options: &ExtractOptions,
) -> (Record, AuthorSummary) {
    let summary = resolve_authors(article, options.policy);
    let record = Record {
        pmid: article
            .descendant_text("PMID")
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        title: article
            .descendant_text("ArticleTitle")
            .unwrap_or_else(|| options.title_placeholder.clone()),
        publication_date: publication_date(article),
        authors: summary.authors.clone(),
        affiliations: summary.affiliations.clone(),
        email: summary.email.clone(),
    };
    (record, summary)
}

/// Extract a [`Record`] from one article.
pub fn extract_record(article: &XmlNode, options: &ExtractOptions) -> Record {
    extract_record_with_details(article, options).0
}

/// Publication date as "YEAR MONTH DAY", degrading to "YEAR MONTH", "YEAR", then "N/A".
///
/// Without a year nothing else is used.
pub fn publication_date(article: &XmlNode) -> String {
    let Some(pub_date) = article.descendant("PubDate") else {
        return NOT_AVAILABLE.to_string();
    };

    let year = pub_date.child_text("Year");
    let month = pub_date.child_text("Month");
    let day = pub_date.child_text("Day");

    match (year, month, day) {
        (Some(y), Some(m), Some(d)) => format!("{y} {m} {d}"),
        (Some(y), Some(m), None) => format!("{y} {m}"),
        (Some(y), None, _) => y,
        (None, _, _) => NOT_AVAILABLE.to_string(),
    }
}

fn scalar_or_na(value: String) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}

fn list_or_na(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        values
    }
}
