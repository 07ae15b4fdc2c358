//! Gemini `generateContent` client over plain HTTPS.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use super::{AiConfig, AiError, GenerateRequest, TextModel};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let api_key = config.api_key.clone().ok_or(AiError::MissingApiKey)?;
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: API_BASE.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let response = self
            .http
            .post(self.endpoint())
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.text().ok_or(AiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let schema = json!({"type": "OBJECT"});
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: "hi" }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "contents": [{"parts": [{"text": "hi"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn plain_prompt_omits_generation_config() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: "hi" }],
            }],
            generation_config: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Neon "}, {"text": "rain."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Neon rain."));

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.text(), None);
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(&AiConfig {
            api_key: Some("k".into()),
            model: "gemini-test".into(),
            timeout: Duration::from_secs(1),
            offline: false,
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
    }
}
