//! Gemini `generateContent` adapter.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use timberline_shared::ExtractionConfig;
use tracing::debug;

use super::error::ExtractionError;
use super::repair::extract_json;
use super::types::ExtractedInvoice;
use super::DocumentExtractor;

/// Instruction sent alongside every document.
pub const EXTRACTION_PROMPT: &str = "\
Analyze this invoice PDF. Extract into JSON:
1. \"vendor_detected\": Company name.
2. \"invoice_no\": Invoice number.
3. \"date_detected\": YYYY-MM-DD.
4. \"amount_detected\": Total numeric amount.
Return ONLY valid JSON.";

/// Maximum characters of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Gemini API adapter for document extraction.
#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiExtractor {
    /// Create from application configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        Self::with_config(
            &config.api_key,
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create with explicit settings.
    pub fn with_config(
        api_key: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        if api_key.trim().is_empty() {
            return Err(ExtractionError::Configuration("API key missing".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| ExtractionError::Configuration("Invalid API key format".into()))?;
        headers.insert("x-goog-api-key", key);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(|e| {
                ExtractionError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Inline { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract(&self, pdf: &[u8]) -> Result<ExtractedInvoice, ExtractionError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "application/pdf",
                            data: STANDARD.encode(pdf),
                        },
                    },
                    Part::Text {
                        text: EXTRACTION_PROMPT,
                    },
                ],
            }],
        };

        debug!(model = %self.model, bytes = pdf.len(), "Requesting invoice extraction");
        let response = self.client.post(self.generate_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Http {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let text: String = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyResponse);
        }

        serde_json::from_str(extract_json(&text)).map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}
