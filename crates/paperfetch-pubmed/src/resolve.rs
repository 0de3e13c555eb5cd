//! Author/affiliation resolution for one article
//!
//! Walks the `<AuthorList>`, classifies every affiliation, and collects the
//! names of authors with at least one non-academic affiliation, the distinct
//! non-academic affiliation strings, and any email addresses found in
//! affiliation text.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::classify::ClassifierPolicy;
use crate::node::XmlNode;

/// Placeholder for any field with no extractable value.
pub const NOT_AVAILABLE: &str = "N/A";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w.-]+@[\w.-]+\.[A-Za-z]{2,}").expect("invalid email pattern")
});

type NameStrategy = fn(&XmlNode) -> Option<String>;
type AffiliationStrategy = fn(&XmlNode) -> Vec<String>;

/// Display-name derivations, tried in order until one yields a name.
static NAME_STRATEGIES: &[NameStrategy] = &[full_name, last_name_only, fore_name_only, collective_name];

/// Affiliation layouts seen across PubMed schema versions, tried in order.
///
/// NOTE: The first strategy that yields anything wins; they are never merged.
static AFFILIATION_STRATEGIES: &[AffiliationStrategy] = &[nested_affiliations, direct_affiliations];

/// What the resolver found for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    /// Non-academic author names, each at most once, or `["N/A"]`
    pub authors: Vec<String>,
    /// Distinct non-academic affiliation strings, first-seen order, or `["N/A"]`
    pub affiliations: Vec<String>,
    /// Every email match joined with "; ", or "N/A"
    pub email: String,
    /// (author, affiliation) for every non-academic match, for diagnostics
    pub matches: Vec<(String, String)>,
}

impl AuthorSummary {
    fn not_available() -> Self {
        Self {
            authors: vec![NOT_AVAILABLE.to_string()],
            affiliations: vec![NOT_AVAILABLE.to_string()],
            email: NOT_AVAILABLE.to_string(),
            matches: Vec::new(),
        }
    }
}

/// Resolve non-academic authors, their affiliations and emails for one article.
pub fn resolve_authors(article: &XmlNode, policy: ClassifierPolicy) -> AuthorSummary {
    let Some(author_list) = article.descendant("AuthorList") else {
        return AuthorSummary::not_available();
    };

    let mut authors = Vec::new();
    let mut seen_authors = FxHashSet::default();
    let mut affiliations = Vec::new();
    let mut seen_affiliations = FxHashSet::default();
    let mut emails = Vec::new();
    let mut matches = Vec::new();

    for author in author_list.children("Author") {
        let Some(name) = display_name(author) else {
            continue;
        };

        for affiliation in author_affiliations(author) {
            emails.extend(extract_emails(&affiliation));

            if !policy.is_non_academic(&affiliation) {
                continue;
            }
            if seen_authors.insert(name.clone()) {
                authors.push(name.clone());
            }
            if seen_affiliations.insert(affiliation.clone()) {
                affiliations.push(affiliation.clone());
            }
            matches.push((name.clone(), affiliation));
        }
    }

    AuthorSummary {
        authors: or_not_available(authors),
        affiliations: or_not_available(affiliations),
        email: if emails.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            emails.join("; ")
        },
        matches,
    }
}

/// Display name for an author entry, or `None` if it has no usable name.
pub fn display_name(author: &XmlNode) -> Option<String> {
    NAME_STRATEGIES.iter().find_map(|f| f(author))
}

/// Non-blank affiliation strings attached to an author entry.
pub fn author_affiliations(author: &XmlNode) -> Vec<String> {
    AFFILIATION_STRATEGIES
        .iter()
        .map(|f| f(author))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// All email-like substrings, in order of appearance.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn full_name(author: &XmlNode) -> Option<String> {
    let last = author.child_text("LastName")?;
    let fore = author.child_text("ForeName")?;
    Some(format!("{fore} {last}"))
}

fn last_name_only(author: &XmlNode) -> Option<String> {
    author.child_text("LastName")
}

fn fore_name_only(author: &XmlNode) -> Option<String> {
    author.child_text("ForeName")
}

fn collective_name(author: &XmlNode) -> Option<String> {
    author.child_text("CollectiveName")
}

/// `<Author><AffiliationInfo><Affiliation>…` (current schema)
fn nested_affiliations(author: &XmlNode) -> Vec<String> {
    author
        .children("AffiliationInfo")
        .filter_map(|info| info.child("Affiliation"))
        .map(XmlNode::trimmed_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// `<Author><Affiliation>…` (older schema)
fn direct_affiliations(author: &XmlNode) -> Vec<String> {
    author
        .children("Affiliation")
        .map(XmlNode::trimmed_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn or_not_available(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![NOT_AVAILABLE.to_string()]
    } else {
        values
    }
}
