//! HuggingFace Inference API client for the three pretrained classifiers.
//!
//! This client uses HuggingFace's serverless inference endpoints.
//! See: <https://huggingface.co/docs/api-inference/index>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{EmotionProvider, SarcasmProvider, ToxicityProvider, is_sarcasm_label};
use crate::types::{EmotionScore, LabelScore, top_label};
use crate::{Result, TrollGuardError};

/// Default base URL for HuggingFace Inference API
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default HTTP timeout; cold models can take a while to answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Requested distribution size; the API truncates it to the model's label count.
const FULL_DISTRIBUTION_TOP_K: usize = 64;

/// Client for HuggingFace Inference API.
///
/// Supports:
/// - Text classification, returning the full label distribution
/// - Text-to-text models used as classifiers (the generated text is the label)
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl HuggingFaceClient {
    /// Create a new HuggingFace client with the given API key.
    ///
    /// An empty key sends requests anonymously (rate limited by HuggingFace).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            TrollGuardError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a text-classification model and return its label distribution.
    ///
    /// Entries keep the order the API returned them in (descending score for
    /// the standard pipelines). A text-to-text model's answer comes back as a
    /// single entry whose label is the generated text and whose score is 1.0.
    ///
    /// # Arguments
    /// * `text` - Text to classify
    /// * `model` - Full HuggingFace model ID (e.g., `unitary/toxic-bert`)
    pub async fn classify(&self, text: &str, model: &str) -> Result<Vec<LabelScore>> {
        self.post_model(
            model,
            &ClassifyRequest {
                inputs: text,
                parameters: Some(ClassifyParameters {
                    top_k: FULL_DISTRIBUTION_TOP_K,
                }),
            },
        )
        .await
    }

    /// Run a model and return its single best label.
    ///
    /// No distribution parameters are sent, so this works for text-to-text
    /// models that reject `top_k`.
    ///
    /// # Arguments
    /// * `text` - Text to classify
    /// * `model` - Full HuggingFace model ID
    pub async fn predict_label(&self, text: &str, model: &str) -> Result<String> {
        let distribution = self
            .post_model(
                model,
                &ClassifyRequest {
                    inputs: text,
                    parameters: None,
                },
            )
            .await?;

        top_label(&distribution)
            .map(|entry| entry.label.clone())
            .ok_or(TrollGuardError::EmptyResponse)
    }

    async fn post_model(&self, model: &str, body: &ClassifyRequest<'_>) -> Result<Vec<LabelScore>> {
        let url = format!("{}/models/{}", self.base_url, model);

        let mut request = self.http.post(&url).json(body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TrollGuardError::Http(e.to_string()))?;

        self.handle_response_errors(&response, model)?;

        let body = response
            .text()
            .await
            .map_err(|e| TrollGuardError::Http(e.to_string()))?;

        let distribution = parse_classification(&body)?;
        debug!(model, labels = distribution.len(), "classifier responded");
        Ok(distribution)
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response, model: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(TrollGuardError::AuthenticationFailed),
            404 => Err(TrollGuardError::ModelNotFound(model.to_string())),
            429 => {
                // Try to parse retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(TrollGuardError::RateLimited { retry_after })
            }
            503 => Err(TrollGuardError::Api {
                status: 503,
                message: "Model is loading, please retry".to_string(),
            }),
            code => Err(TrollGuardError::Api {
                status: code,
                message: format!("HuggingFace API error: {}", status),
            }),
        }
    }
}

/// Parse any of the response shapes the inference API uses for classifiers.
///
/// - `[[{"label", "score"}, ...]]`: text classification, single input
/// - `[{"label", "score"}, ...]`: text classification, older endpoints
/// - `[{"generated_text"}]`: text-to-text models
///
/// Valid JSON of any other shape is `UnexpectedOutput`; a body that is not
/// JSON at all is a `Json` error.
pub(crate) fn parse_classification(body: &str) -> Result<Vec<LabelScore>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let response = ClassificationResponse::deserialize(&value)
        .map_err(|_| TrollGuardError::UnexpectedOutput(describe_unexpected(&value)))?;

    match response {
        ClassificationResponse::Nested(batches) => {
            Ok(batches.into_iter().next().unwrap_or_default())
        }
        ClassificationResponse::Flat(entries) => Ok(entries),
        ClassificationResponse::Generated(outputs) => Ok(outputs
            .into_iter()
            .map(|o| LabelScore::new(o.generated_text.trim(), 1.0))
            .collect()),
    }
}

/// Short description of an unrecognised body, preferring the API's own
/// `error` message when it sent one.
fn describe_unexpected(value: &serde_json::Value) -> String {
    match value.get("error").and_then(|e| e.as_str()) {
        Some(message) => message.to_string(),
        None => {
            let mut text = value.to_string();
            if text.len() > 200 {
                let cut = (0..=200).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
                text.truncate(cut);
                text.push_str("...");
            }
            text
        }
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<ClassifyParameters>,
}

#[derive(Serialize)]
struct ClassifyParameters {
    top_k: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Generated(Vec<GeneratedText>),
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

// ============================================================================
// Provider Trait Implementations
// ============================================================================

/// Toxicity via a multi-label classifier such as `unitary/toxic-bert`.
///
/// Reads the score of the `toxic` label out of the distribution.
#[derive(Clone)]
pub struct HuggingFaceToxicity {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceToxicity {
    pub fn new(client: HuggingFaceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ToxicityProvider for HuggingFaceToxicity {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn toxicity(&self, text: &str) -> Result<f32> {
        let distribution = self.client.classify(text, &self.model).await?;
        distribution
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case("toxic"))
            .map(|entry| entry.score)
            .ok_or_else(|| TrollGuardError::MissingLabel("toxic".to_string()))
    }
}

/// Emotion via a single-label classifier such as
/// `bhadresh-savani/distilbert-base-uncased-emotion`.
#[derive(Clone)]
pub struct HuggingFaceEmotion {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceEmotion {
    pub fn new(client: HuggingFaceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmotionProvider for HuggingFaceEmotion {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn emotion(&self, text: &str) -> Result<EmotionScore> {
        let distribution = self.client.classify(text, &self.model).await?;
        EmotionScore::from_distribution(&distribution).ok_or(TrollGuardError::EmptyResponse)
    }
}

/// Sarcasm via a model that answers with a free-text label, such as
/// `mrm8488/t5-base-finetuned-sarcasm-twitter`.
#[derive(Clone)]
pub struct HuggingFaceSarcasm {
    client: HuggingFaceClient,
    model: String,
}

impl HuggingFaceSarcasm {
    pub fn new(client: HuggingFaceClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl SarcasmProvider for HuggingFaceSarcasm {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn sarcasm(&self, text: &str) -> Result<bool> {
        let label = self.client.predict_label(text, &self.model).await?;
        Ok(is_sarcasm_label(&label))
    }
}
