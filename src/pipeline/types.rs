//! Core types for the lead enrichment pipeline.
//!
//! These types model the full lifecycle:
//! Row → ContactBundle → Confidence score + Classification → LeadResult.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance tag stamped on every `LeadResult`.
pub const RESULT_SOURCE: &str = "csv-import";

// ═══════════════════════════════════════════
// Input Row
// ═══════════════════════════════════════════

/// One input record, as decoded from a tabular source by the caller.
///
/// `url` must be non-empty; at least one of `snippet`/`description` is
/// expected to carry free text. The explicit `contact_*` fields are
/// structured data the source already knew and always outrank anything
/// the pattern extractor derives. Rows are never mutated by the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_title: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact_address: Option<String>,
    /// Comma-separated keyword seed list.
    #[serde(default)]
    pub keywords: Option<String>,
}

impl Row {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

// ═══════════════════════════════════════════
// Contact Bundle (aggregated extraction)
// ═══════════════════════════════════════════

/// Aggregated extraction result for one row.
///
/// Every list is ordered-unique: first occurrence wins, explicit row fields
/// occupy index 0. Emails and keywords are unique after lowercasing.
/// Created fresh per row and consumed immediately by scoring and
/// classification; never retained across rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactBundle {
    pub names: Vec<String>,
    pub titles: Vec<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub companies: Vec<String>,
    pub addresses: Vec<String>,
    pub keywords: Vec<String>,
}

impl ContactBundle {
    /// True when no extractor and no explicit field produced anything.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.titles.is_empty()
            && self.emails.is_empty()
            && self.phones.is_empty()
            && self.companies.is_empty()
            && self.addresses.is_empty()
            && self.keywords.is_empty()
    }
}

// ═══════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════

/// The four lead natures the classifier distinguishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadType {
    Person,
    Business,
    Event,
    #[default]
    Unknown,
}

impl LeadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Business => "business",
            Self::Event => "event",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "person" => Some(Self::Person),
            "business" => Some(Self::Business),
            "event" => Some(Self::Event),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn all() -> &'static [LeadType] {
        &[Self::Person, Self::Business, Self::Event, Self::Unknown]
    }
}

impl std::fmt::Display for LeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Judgment of a lead's nature and partnership quality.
///
/// Produced either by the remote model or by the rule-based fallback; both
/// populate the same shape. Every field defaults so a partial remote
/// response still parses (`unknown`, quality 0, flags false). Field names
/// follow the remote wire contract (camelCase, `type` for the lead type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(rename = "type", default)]
    pub lead_type: LeadType,
    #[serde(default)]
    pub is_person: bool,
    /// Partnership quality on the 0-10 rubric. Independent of the 0-100
    /// confidence score; the two scales are never normalized against each
    /// other.
    #[serde(default)]
    pub quality: u8,
    #[serde(default)]
    pub needs_contact_search: bool,
    #[serde(default)]
    pub skip_reason: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

// ═══════════════════════════════════════════
// Lead Result (durable per-row output)
// ═══════════════════════════════════════════

/// The enriched output record for one successfully processed row.
///
/// Failed rows produce no `LeadResult`, only an error entry on the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadResult {
    pub url: String,
    pub matched_keywords: Vec<String>,
    pub contact_name: String,
    pub contact_title: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub company_name: String,
    pub contact_address: String,
    /// Truncated excerpt of the classification text, max 500 chars.
    pub additional_info: String,
    pub classification: LeadType,
    pub is_person_profile: bool,
    /// 0-10 partnership quality from the classifier.
    pub quality: u8,
    /// 0-100 deterministic extraction confidence.
    pub confidence_score: u8,
    pub needs_contact_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    pub processed_at: DateTime<Utc>,
    pub source: String,
}

// ═══════════════════════════════════════════
// Run status + events
// ═══════════════════════════════════════════

/// Terminal state of one orchestrator run. A run cannot fail globally —
/// it either drains all rows or observes cancellation at a batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Cancelled,
}

/// Event emitted through the orchestrator's progress callback.
///
/// `Completed` fires exactly once on natural exhaustion and is suppressed
/// when the run was cancelled; the last `BatchCompleted` then carries the
/// partial data.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RunEvent {
    Started {
        total_rows: u32,
    },
    BatchCompleted {
        processed: u32,
        total: u32,
        results: Vec<LeadResult>,
        errors: Vec<String>,
        current_url: Option<String>,
    },
    Completed {
        results: Vec<LeadResult>,
        duration_ms: u64,
    },
    Cancelled {
        processed: u32,
    },
}

/// Final accumulation of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub status: RunStatus,
    /// Completion order, not input order. Sort by url or re-key against the
    /// input if stable ordering matters downstream.
    pub results: Vec<LeadResult>,
    /// One entry per failed row, keyed by that row's url.
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

/// Aggregate counts over a finished run, bucketed by the caller's
/// score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: u32,
    pub processed: u32,
    pub qualified: u32,
    pub rejected: u32,
    pub errors: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_type_roundtrip() {
        for t in LeadType::all() {
            assert_eq!(LeadType::from_str(t.as_str()), Some(*t));
        }
    }

    #[test]
    fn lead_type_display() {
        assert_eq!(LeadType::Person.to_string(), "person");
        assert_eq!(LeadType::Unknown.to_string(), "unknown");
    }

    #[test]
    fn lead_type_from_invalid() {
        assert_eq!(LeadType::from_str("conference"), None);
        assert_eq!(LeadType::from_str(""), None);
    }

    #[test]
    fn lead_type_serde_lowercase() {
        let json = serde_json::to_string(&LeadType::Business).unwrap();
        assert_eq!(json, "\"business\"");
        let parsed: LeadType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LeadType::Business);
    }

    #[test]
    fn classification_defaults_on_empty_object() {
        let c: Classification = serde_json::from_str("{}").unwrap();
        assert_eq!(c.lead_type, LeadType::Unknown);
        assert!(!c.is_person);
        assert_eq!(c.quality, 0);
        assert!(!c.needs_contact_search);
        assert!(c.skip_reason.is_none());
        assert!(c.reasoning.is_none());
    }

    #[test]
    fn classification_parses_type_field() {
        let c: Classification =
            serde_json::from_str(r#"{"type": "person", "isPerson": false, "quality": 8}"#)
                .unwrap();
        assert_eq!(c.lead_type, LeadType::Person);
        assert_eq!(c.quality, 8);
    }

    #[test]
    fn contact_bundle_empty() {
        let bundle = ContactBundle::default();
        assert!(bundle.is_empty());
    }

    #[test]
    fn contact_bundle_not_empty_with_keyword() {
        let bundle = ContactBundle {
            keywords: vec!["sponsor".to_string()],
            ..Default::default()
        };
        assert!(!bundle.is_empty());
    }

    #[test]
    fn row_new_has_url_only() {
        let row = Row::new("https://example.com/a");
        assert_eq!(row.url, "https://example.com/a");
        assert!(row.snippet.is_none());
        assert!(row.keywords.is_none());
    }

    #[test]
    fn run_event_serde_tagged() {
        let event = RunEvent::Started { total_rows: 12 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Started\""));
        assert!(json.contains("\"total_rows\":12"));
    }

    #[test]
    fn lead_result_skip_reason_omitted_when_none() {
        let result = LeadResult {
            url: "https://example.com".to_string(),
            matched_keywords: vec![],
            contact_name: String::new(),
            contact_title: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            company_name: String::new(),
            contact_address: String::new(),
            additional_info: String::new(),
            classification: LeadType::Unknown,
            is_person_profile: false,
            quality: 0,
            confidence_score: 0,
            needs_contact_search: false,
            skip_reason: None,
            processed_at: Utc::now(),
            source: RESULT_SOURCE.to_string(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("skip_reason"));
        assert!(json.contains("csv-import"));
    }
}
