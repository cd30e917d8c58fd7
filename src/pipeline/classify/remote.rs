//! Remote classification over an OpenAI-style chat-completions endpoint.
//!
//! Transport failures never propagate: after `retry_attempts` extra tries the
//! adapter logs a warning and answers with the rule-based fallback, so a dead
//! or flaky service degrades the run's classifications, not its completion.

use serde::{Deserialize, Serialize};

use super::fallback::classify_rules;
use super::prompt::{build_classification_prompt, SYSTEM_INSTRUCTION};
use super::Classifier;
use crate::config::{ProcessingConfig, RemoteConfig};
use crate::pipeline::error::ClassifyError;
use crate::pipeline::types::{Classification, ContactBundle};

/// Chat-completions backed classifier.
pub struct RemoteClassifier {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
    retry_attempts: u32,
}

impl RemoteClassifier {
    pub fn new(remote: &RemoteConfig, processing: &ProcessingConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(remote.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: remote.base_url.trim_end_matches('/').to_string(),
            api_key: remote.api_key.clone(),
            model: remote.model.clone(),
            temperature: remote.temperature,
            timeout_secs: remote.timeout_secs,
            retry_attempts: processing.retry_attempts,
        })
    }

    /// The model name being used.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request_classification(
        &self,
        url: &str,
        text: &str,
        bundle: &ContactBundle,
    ) -> Result<Classification, ClassifyError> {
        let endpoint = format!("{}/v1/chat/completions", self.base_url);
        let prompt = build_classification_prompt(url, text, bundle);
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            response_format: ResponseFormat { kind: "json_object" },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(self.api_key.trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ClassifyError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    ClassifyError::Timeout(self.timeout_secs)
                } else {
                    ClassifyError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClassifyError::MalformedResponse("empty choices array".into()))?;

        parse_classification(&content)
    }
}

/// Parse the model's JSON content into a `Classification`.
///
/// Lenient: absent fields take their defaults (unknown/false/0), so a
/// partially-formed answer still classifies rather than erroring.
pub fn parse_classification(content: &str) -> Result<Classification, ClassifyError> {
    serde_json::from_str(content).map_err(|e| ClassifyError::MalformedResponse(e.to_string()))
}

impl Classifier for RemoteClassifier {
    async fn classify(&self, url: &str, text: &str, bundle: &ContactBundle) -> Classification {
        let attempts = self.retry_attempts + 1;
        for attempt in 1..=attempts {
            match self.request_classification(url, text, bundle).await {
                Ok(classification) => {
                    tracing::debug!(
                        url,
                        lead_type = classification.lead_type.as_str(),
                        quality = classification.quality,
                        "Remote classification succeeded"
                    );
                    return classification;
                }
                Err(e) => {
                    tracing::warn!(
                        url,
                        attempt,
                        attempts,
                        error = %e,
                        "Remote classification attempt failed"
                    );
                }
            }
        }

        tracing::warn!(url, "Remote classification exhausted, using rule-based fallback");
        classify_rules(text, bundle)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::LeadType;

    #[test]
    fn parses_complete_response() {
        let content = r#"{
            "type": "person",
            "isPerson": true,
            "quality": 8,
            "needsContactSearch": false,
            "skipReason": null,
            "reasoning": "Senior executive in region"
        }"#;
        let c = parse_classification(content).unwrap();
        assert_eq!(c.lead_type, LeadType::Person);
        assert!(c.is_person);
        assert_eq!(c.quality, 8);
        assert_eq!(c.reasoning.as_deref(), Some("Senior executive in region"));
    }

    #[test]
    fn absent_fields_take_defaults() {
        let c = parse_classification(r#"{"quality": 3}"#).unwrap();
        assert_eq!(c.lead_type, LeadType::Unknown);
        assert!(!c.is_person);
        assert_eq!(c.quality, 3);
        assert!(!c.needs_contact_search);
    }

    #[test]
    fn non_json_content_is_malformed() {
        assert!(matches!(
            parse_classification("I think this is a business lead."),
            Err(ClassifyError::MalformedResponse(_))
        ));
    }

    #[test]
    fn chat_request_serializes_wire_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            temperature: 0.2,
            response_format: ResponseFormat { kind: "json_object" },
            messages: vec![ChatMessage {
                role: "system",
                content: "instruction",
            }],
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o-mini\""));
        assert!(json.contains("\"response_format\":{\"type\":\"json_object\"}"));
        assert!(json.contains("\"role\":\"system\""));
    }

    #[test]
    fn chat_response_parses_choices() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"{}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "{}");
    }

    #[tokio::test]
    async fn unreachable_service_falls_back_to_rules() {
        let remote = RemoteConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            timeout_secs: 1,
        };
        let processing = ProcessingConfig {
            retry_attempts: 0,
            ..Default::default()
        };
        let classifier = RemoteClassifier::new(&remote, &processing).unwrap();

        let bundle = ContactBundle {
            names: vec!["Jane Smith".to_string()],
            titles: vec!["CEO".to_string()],
            ..Default::default()
        };
        let c = classifier
            .classify("https://x.com", "chief executive profile", &bundle)
            .await;

        // Fallback shape, not an error.
        assert_eq!(c.lead_type, LeadType::Person);
        assert_eq!(
            c.reasoning.as_deref(),
            Some("Classified using fallback rules")
        );
    }
}
