//! Rule-based classification fallback.
//!
//! Produces the same `Classification` shape as the remote model from fixed,
//! deterministic rules. Used whenever the remote call fails, and directly by
//! `RuleBasedClassifier` for offline runs and tests.

use std::sync::LazyLock;

use regex::Regex;

use super::Classifier;
use crate::pipeline::types::{Classification, ContactBundle, LeadType};

/// Senior titles that bump fallback quality.
static SENIOR_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ceo|president|founder|owner|executive").expect("invalid senior title pattern")
});

/// Event/sponsor page markers that short-circuit to a skip.
const EVENT_MARKERS: &[&str] = &["event", "sponsor", "conference", "gala"];

/// Classify a lead from its text and extraction bundle alone.
pub fn classify_rules(text: &str, bundle: &ContactBundle) -> Classification {
    let lower_text = text.to_lowercase();

    if EVENT_MARKERS.iter().any(|m| lower_text.contains(m)) {
        return Classification {
            lead_type: LeadType::Event,
            is_person: false,
            quality: 0,
            needs_contact_search: false,
            skip_reason: Some("Event or sponsor page".to_string()),
            reasoning: None,
        };
    }

    let is_person = !bundle.names.is_empty()
        && (!bundle.titles.is_empty()
            || lower_text.contains("ceo")
            || lower_text.contains("president")
            || lower_text.contains("founder"));

    let is_business = !bundle.companies.is_empty()
        || lower_text.contains("company")
        || lower_text.contains("corporation")
        || lower_text.contains("llc");

    let mut quality: u8 = 5;
    if !bundle.emails.is_empty() {
        quality += 2;
    }
    if !bundle.phones.is_empty() {
        quality += 1;
    }
    if is_person && bundle.titles.iter().any(|t| SENIOR_TITLE.is_match(t)) {
        quality += 2;
    }
    quality = quality.min(10);

    let lead_type = if is_person {
        LeadType::Person
    } else if is_business {
        LeadType::Business
    } else {
        LeadType::Unknown
    };

    Classification {
        lead_type,
        is_person,
        quality,
        needs_contact_search: is_business && bundle.emails.is_empty(),
        skip_reason: None,
        reasoning: Some("Classified using fallback rules".to_string()),
    }
}

/// A `Classifier` that never leaves the process. Deterministic; useful for
/// offline runs and as the reference implementation in orchestrator tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedClassifier;

impl Classifier for RuleBasedClassifier {
    async fn classify(&self, _url: &str, text: &str, bundle: &ContactBundle) -> Classification {
        classify_rules(text, bundle)
    }
}
