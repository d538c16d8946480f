//! Wire types for the external summarization service

use serde::{Deserialize, Serialize};

/// A piece of content exchanged with the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content (e.g., "user", "model")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts that make up this content
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create user content from a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// One text part of a content block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text payload
    pub text: String,
}

/// Sampling controls for a generation call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature; low for deterministic summaries
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: i32,
}

/// Request body for a generateContent call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Prompt contents
    pub contents: Vec<Content>,

    /// Sampling configuration
    pub generation_config: GenerationConfig,
}

/// Response body of a generateContent call
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, usually one
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content
    pub content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any non-empty text
    /// was generated
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text("hello")],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 120,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.1).abs() < 1e-6);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 120);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "A short synopsis."}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "A short synopsis.");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }
}
