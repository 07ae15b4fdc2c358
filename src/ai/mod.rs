//! Text-model collaborators: sample sentences and font recommendations.
//!
//! Every public operation here recovers at the boundary.  Transport and
//! parse failures turn into fixed fallback values, so callers always get
//! something displayable and never see a transport error.

pub mod gemini;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::core::catalog::Catalog;

pub use gemini::GeminiClient;

pub const FALLBACK_SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog.";

pub const FALLBACK_FONTS: &[&str] = &["Roboto", "Open Sans", "Lato", "Montserrat", "Poppins", "Inter"];

pub const FALLBACK_REASONING: &str =
    "AI was temporarily unreachable, so here are some high-quality classics.";

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Environment variables checked for the API credential, in order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key found (set {})", API_KEY_VARS.join(" or "))]
    MissingApiKey,
    #[error("offline mode is enabled")]
    Offline,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model endpoint returned status {0}")]
    Status(u16),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("unparsable model output: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Connection settings for the text model.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    pub offline: bool,
}

impl AiConfig {
    /// Read the credential from the environment; everything else comes from
    /// the caller (usually the persisted config).
    pub fn from_env(model: &str, timeout: Duration, offline: bool) -> Self {
        let api_key = first_api_key(|var| std::env::var(var).ok());
        Self {
            api_key,
            model: model.to_string(),
            timeout,
            offline,
        }
    }
}

/// First non-blank credential among [`API_KEY_VARS`].
fn first_api_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    API_KEY_VARS
        .iter()
        .find_map(|var| lookup(var).filter(|key| !key.trim().is_empty()))
}

/// One prompt sent to a text model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// When set, the model is asked for JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String, AiError>;
}

/// Model used when networking is disabled; every call fails fast so the
/// fallbacks kick in.
pub struct OfflineModel;

#[async_trait]
impl TextModel for OfflineModel {
    async fn generate(&self, _request: GenerateRequest) -> Result<String, AiError> {
        Err(AiError::Offline)
    }
}

/// Build the configured model.  A missing credential is a configuration
/// error reported here, at construction time.
pub fn connect(config: &AiConfig) -> Result<Box<dyn TextModel>, AiError> {
    if config.offline {
        return Ok(Box::new(OfflineModel));
    }
    Ok(Box::new(GeminiClient::new(config)?))
}

// ───────────────────────────────────────── sample text ───────

fn sample_text_prompt(vibe: &str) -> String {
    format!(
        "Generate a single short, punchy, creative sentence (max 10 words) that demonstrates the vibe: \"{vibe}\". No quotes."
    )
}

/// A short sentence in the mood of `vibe`, or [`FALLBACK_SAMPLE_TEXT`].
pub async fn generate_sample_text(model: &dyn TextModel, vibe: &str) -> String {
    let request = GenerateRequest {
        prompt: sample_text_prompt(vibe),
        response_schema: None,
    };
    match model.generate(request).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => FALLBACK_SAMPLE_TEXT.to_string(),
        Err(e) => {
            tracing::warn!(vibe, error = %e, "sample text generation failed");
            FALLBACK_SAMPLE_TEXT.to_string()
        }
    }
}

// ───────────────────────────────────────── recommendations ───

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FontRecommendation {
    pub fonts: Vec<String>,
    pub reasoning: String,
}

impl FontRecommendation {
    pub fn fallback() -> Self {
        Self {
            fonts: FALLBACK_FONTS.iter().map(|f| f.to_string()).collect(),
            reasoning: FALLBACK_REASONING.to_string(),
        }
    }
}

fn recommendation_prompt(query: &str, catalog: &Catalog) -> String {
    format!(
        "You are a typography expert. The user wants fonts matching this description: \"{query}\".\n\
         \n\
         Select the best matching fonts from this specific list of available Google Fonts:\n\
         [{}]\n\
         \n\
         Return a JSON object with:\n\
         1. \"fonts\": An array of strings containing exactly the font family names from the list that match the vibe. Aim for a generous selection of 10-20 best matches.\n\
         2. \"reasoning\": A short, punchy sentence explaining why these fit the vibe.",
        catalog.family_list()
    )
}

fn recommendation_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fonts": { "type": "ARRAY", "items": { "type": "STRING" } },
            "reasoning": { "type": "STRING" }
        },
        "required": ["fonts", "reasoning"]
    })
}

/// Ask the model for catalog fonts matching `query`; any failure yields
/// [`FontRecommendation::fallback`].
pub async fn get_font_recommendations(
    model: &dyn TextModel,
    catalog: &Catalog,
    query: &str,
) -> FontRecommendation {
    let request = GenerateRequest {
        prompt: recommendation_prompt(query, catalog),
        response_schema: Some(recommendation_schema()),
    };
    let parsed = match model.generate(request).await {
        Ok(text) if text.trim().is_empty() => Err(AiError::EmptyResponse),
        Ok(text) => serde_json::from_str::<FontRecommendation>(&text).map_err(AiError::from),
        Err(e) => Err(e),
    };
    parsed.unwrap_or_else(|e| {
        tracing::warn!(query, error = %e, "font recommendation failed");
        FontRecommendation::fallback()
    })
}

/// Connect and ask for recommendations.  A model that cannot even be built
/// (no credential) gets the same fallback as a failed request.
pub async fn recommend(config: &AiConfig, catalog: &Catalog, query: &str) -> FontRecommendation {
    match connect(config) {
        Ok(model) => get_font_recommendations(model.as_ref(), catalog, query).await,
        Err(e) => {
            tracing::warn!(query, error = %e, "font recommendation unavailable");
            FontRecommendation::fallback()
        }
    }
}
