//! Per-row enrichment: aggregate, score, classify, assemble.
//!
//! `EnrichmentProcessor` owns no run state; it turns one `Row` into one
//! `LeadResult` and is shared across in-flight rows by reference.

use chrono::Utc;

use super::aggregate::aggregate;
use super::classify::prompt::truncate_chars;
use super::classify::Classifier;
use super::error::EnrichError;
use super::scoring::confidence_score;
use super::types::{LeadResult, Row, RESULT_SOURCE};

/// Maximum characters carried into `LeadResult::additional_info`.
const ADDITIONAL_INFO_CHARS: usize = 500;

/// The seam the orchestrator schedules through. One row in, one enriched
/// result or one error out.
pub trait LeadProcessor: Send + Sync {
    fn process(
        &self,
        row: &Row,
    ) -> impl std::future::Future<Output = Result<LeadResult, EnrichError>> + Send;
}

/// The production processor: pattern aggregation, deterministic confidence
/// scoring, then classification through the configured `Classifier`.
pub struct EnrichmentProcessor<C> {
    classifier: C,
}

impl<C: Classifier> EnrichmentProcessor<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: Classifier> LeadProcessor for EnrichmentProcessor<C> {
    async fn process(&self, row: &Row) -> Result<LeadResult, EnrichError> {
        if row.url.trim().is_empty() {
            return Err(EnrichError::MissingUrl);
        }

        let bundle = aggregate(row);
        let confidence = confidence_score(&bundle);

        // Free text plus the strongest extracted entities, so the classifier
        // sees names and companies even when they only appear in structured
        // fields.
        let text = [
            row.snippet.clone().unwrap_or_default(),
            row.description.clone().unwrap_or_default(),
            bundle.names.join(" "),
            bundle.titles.join(" "),
            bundle.companies.join(" "),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let classification = self.classifier.classify(&row.url, &text, &bundle).await;

        tracing::debug!(
            url = %row.url,
            confidence,
            lead_type = classification.lead_type.as_str(),
            quality = classification.quality,
            "Row enriched"
        );

        let first = |list: &[String]| list.first().cloned().unwrap_or_default();

        Ok(LeadResult {
            url: row.url.clone(),
            matched_keywords: bundle.keywords.clone(),
            contact_name: first(&bundle.names),
            contact_title: first(&bundle.titles),
            contact_email: first(&bundle.emails),
            contact_phone: first(&bundle.phones),
            company_name: first(&bundle.companies),
            contact_address: first(&bundle.addresses),
            additional_info: truncate_chars(&text, ADDITIONAL_INFO_CHARS).to_string(),
            classification: classification.lead_type,
            is_person_profile: classification.is_person,
            quality: classification.quality,
            confidence_score: confidence,
            needs_contact_search: classification.needs_contact_search,
            skip_reason: classification.skip_reason,
            processed_at: Utc::now(),
            source: RESULT_SOURCE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::RuleBasedClassifier;
    use crate::pipeline::types::{Classification, ContactBundle, LeadType};

    /// Classifier returning one canned answer, ignoring its inputs.
    struct CannedClassifier(Classification);

    impl Classifier for CannedClassifier {
        async fn classify(
            &self,
            _url: &str,
            _text: &str,
            _bundle: &ContactBundle,
        ) -> Classification {
            self.0.clone()
        }
    }

    fn rich_row() -> Row {
        Row {
            url: "https://example.com/profile".to_string(),
            snippet: Some(
                "John Doe, CEO of Acme LLC. Contact john@acme.com or (913) 555-1234."
                    .to_string(),
            ),
            keywords: Some("sponsor".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let processor = EnrichmentProcessor::new(RuleBasedClassifier);
        let err = processor.process(&Row::new("   ")).await.unwrap_err();
        assert!(matches!(err, EnrichError::MissingUrl));
    }

    #[tokio::test]
    async fn enriches_row_end_to_end() {
        let processor = EnrichmentProcessor::new(RuleBasedClassifier);
        let result = processor.process(&rich_row()).await.unwrap();

        assert_eq!(result.url, "https://example.com/profile");
        assert_eq!(result.contact_name, "John Doe");
        assert_eq!(result.contact_email, "john@acme.com");
        assert_eq!(result.contact_phone, "(913) 555-1234");
        assert!(result.confidence_score >= 60);
        assert_eq!(result.source, RESULT_SOURCE);
    }

    #[tokio::test]
    async fn classifier_verdict_flows_into_result() {
        let processor = EnrichmentProcessor::new(CannedClassifier(Classification {
            lead_type: LeadType::Event,
            is_person: false,
            quality: 2,
            needs_contact_search: false,
            skip_reason: Some("Sponsor listing".to_string()),
            reasoning: None,
        }));
        let result = processor.process(&rich_row()).await.unwrap();

        assert_eq!(result.classification, LeadType::Event);
        assert_eq!(result.quality, 2);
        assert_eq!(result.skip_reason.as_deref(), Some("Sponsor listing"));
    }

    #[tokio::test]
    async fn missing_fields_become_empty_strings() {
        let processor = EnrichmentProcessor::new(RuleBasedClassifier);
        let row = Row {
            url: "https://example.com/bare".to_string(),
            snippet: Some("nothing here".to_string()),
            ..Default::default()
        };
        let result = processor.process(&row).await.unwrap();

        assert_eq!(result.contact_name, "");
        assert_eq!(result.contact_email, "");
        assert_eq!(result.company_name, "");
        assert_eq!(result.confidence_score, 0);
    }

    #[tokio::test]
    async fn additional_info_capped_at_five_hundred_chars() {
        let processor = EnrichmentProcessor::new(RuleBasedClassifier);
        let row = Row {
            url: "https://example.com/long".to_string(),
            snippet: Some("z".repeat(2000)),
            ..Default::default()
        };
        let result = processor.process(&row).await.unwrap();

        assert_eq!(result.additional_info.chars().count(), 500);
    }

    #[tokio::test]
    async fn confidence_independent_of_classifier_quality() {
        let high = EnrichmentProcessor::new(CannedClassifier(Classification {
            quality: 10,
            ..Default::default()
        }));
        let low = EnrichmentProcessor::new(CannedClassifier(Classification::default()));

        let a = high.process(&rich_row()).await.unwrap();
        let b = low.process(&rich_row()).await.unwrap();

        assert_eq!(a.confidence_score, b.confidence_score);
        assert_ne!(a.quality, b.quality);
    }
}
