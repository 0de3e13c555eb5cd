//! Affiliation classifier
//!
//! Decides from free text alone whether an affiliation belongs to a
//! non-academic (industry) organisation. Matching is case-insensitive
//! substring search over fixed keyword lists.

use std::str::FromStr;

/// Markers of an academic affiliation.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "institute",
    "college",
    "school",
    "department",
    "academy",
    "faculty",
    "centre for",
    "research center",
    "laboratory",
];

/// Markers of a corporate affiliation, used only by [`ClassifierPolicy::CorporateMarkers`].
pub const CORPORATE_KEYWORDS: &[&str] = &["pharma", "biotech", "inc.", "ltd.", "corporation", "gmbh"];

/// How an affiliation string is judged non-academic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifierPolicy {
    /// Non-academic iff no academic keyword occurs. An empty string is non-academic.
    #[default]
    AcademicAbsence,
    /// Non-academic iff a corporate keyword occurs and no academic keyword does.
    CorporateMarkers,
}

impl ClassifierPolicy {
    pub fn is_non_academic(self, affiliation: &str) -> bool {
        let text = affiliation.to_lowercase();
        let academic = contains_any(&text, ACADEMIC_KEYWORDS);
        match self {
            Self::AcademicAbsence => !academic,
            Self::CorporateMarkers => !academic && contains_any(&text, CORPORATE_KEYWORDS),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AcademicAbsence => "academic-absence",
            Self::CorporateMarkers => "corporate-markers",
        }
    }
}

impl FromStr for ClassifierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "academic-absence" => Ok(Self::AcademicAbsence),
            "corporate-markers" => Ok(Self::CorporateMarkers),
            other => Err(format!(
                "unknown classifier policy '{other}' (expected academic-absence or corporate-markers)"
            )),
        }
    }
}

impl std::fmt::Display for ClassifierPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify with the default policy (absence of academic markers).
pub fn is_non_academic(affiliation: &str) -> bool {
    ClassifierPolicy::AcademicAbsence.is_non_academic(affiliation)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|k| haystack.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_and_university_are_academic() {
        assert!(!is_non_academic("Department of Biology, State University"));
    }

    #[test]
    fn company_without_academic_markers_is_non_academic() {
        assert!(is_non_academic("Acme Pharma Inc., Boston, MA, USA"));
    }

    #[test]
    fn every_keyword_is_matched_case_insensitively() {
        for kw in ACADEMIC_KEYWORDS {
            let upper = format!("The {} of Things", kw.to_uppercase());
            assert!(!is_non_academic(&upper), "{upper}");
            let mixed = format!("x {kw} y");
            assert!(!is_non_academic(&mixed), "{mixed}");
        }
    }

    #[test]
    fn keyword_inside_longer_word_still_matches() {
        // Substring semantics: "schools" contains "school"
        assert!(!is_non_academic("Graduate Schools of Medicine"));
    }

    #[test]
    fn empty_string_is_non_academic_by_default() {
        assert!(is_non_academic(""));
        assert!(!ClassifierPolicy::CorporateMarkers.is_non_academic(""));
    }

    #[test]
    fn classification_is_idempotent() {
        for aff in ["Genentech, South San Francisco", "Harvard Medical School", ""] {
            assert_eq!(is_non_academic(aff), is_non_academic(aff));
        }
    }

    #[test]
    fn corporate_policy_requires_marker() {
        let policy = ClassifierPolicy::CorporateMarkers;
        assert!(policy.is_non_academic("Novartis Pharma AG, Basel"));
        assert!(policy.is_non_academic("Roche Diagnostics GmbH, Penzberg"));
        // No corporate marker: academic-absence says yes, corporate policy says no
        assert!(is_non_academic("Mayo Clinic, Rochester"));
        assert!(!policy.is_non_academic("Mayo Clinic, Rochester"));
        // Both markers present: academic wins
        assert!(!policy.is_non_academic("Biotech Institute of Maryland"));
    }

    #[test]
    fn policy_round_trips_through_str() {
        for policy in [ClassifierPolicy::AcademicAbsence, ClassifierPolicy::CorporateMarkers] {
            assert_eq!(policy.as_str().parse::<ClassifierPolicy>(), Ok(policy));
        }
        assert!("strict".parse::<ClassifierPolicy>().is_err());
    }
}
