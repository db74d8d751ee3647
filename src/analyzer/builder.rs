//! Builder for configuring analyzer instances

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::ToneAnalyzer;
use crate::cache::{CacheConfig, SignalCache};
use crate::providers::{
    EmotionProvider, RetryConfig, RetryingEmotionProvider, RetryingSarcasmProvider,
    RetryingToxicityProvider, SarcasmProvider, SentimentProvider, ToxicityProvider,
    VaderSentiment,
};
use crate::{Result, TrollGuardError};

/// Default toxicity model.
pub const DEFAULT_TOXICITY_MODEL: &str = "unitary/toxic-bert";

/// Default emotion model.
pub const DEFAULT_EMOTION_MODEL: &str = "bhadresh-savani/distilbert-base-uncased-emotion";

/// Default sarcasm model.
pub const DEFAULT_SARCASM_MODEL: &str = "mrm8488/t5-base-finetuned-sarcasm-twitter";

/// Model IDs for the three remote classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_toxicity_model")]
    pub toxicity: String,
    #[serde(default = "default_emotion_model")]
    pub emotion: String,
    #[serde(default = "default_sarcasm_model")]
    pub sarcasm: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            toxicity: default_toxicity_model(),
            emotion: default_emotion_model(),
            sarcasm: default_sarcasm_model(),
        }
    }
}

fn default_toxicity_model() -> String {
    DEFAULT_TOXICITY_MODEL.to_string()
}

fn default_emotion_model() -> String {
    DEFAULT_EMOTION_MODEL.to_string()
}

fn default_sarcasm_model() -> String {
    DEFAULT_SARCASM_MODEL.to_string()
}

/// Builder for configuring analyzer instances.
///
/// Each classifier comes from an explicit provider override if one was set,
/// otherwise from HuggingFace if it was configured. Sentiment defaults to
/// the bundled VADER lexicon.
pub struct ToneAnalyzerBuilder {
    #[cfg(feature = "huggingface")]
    huggingface_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    models: ModelConfig,
    retry: RetryConfig,
    cache: Option<CacheConfig>,
    toxicity: Option<Arc<dyn ToxicityProvider>>,
    emotion: Option<Arc<dyn EmotionProvider>>,
    sarcasm: Option<Arc<dyn SarcasmProvider>>,
    sentiment: Option<Arc<dyn SentimentProvider>>,
}

impl ToneAnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "huggingface")]
            huggingface_key: None,
            base_url: None,
            timeout: None,
            models: ModelConfig::default(),
            retry: RetryConfig::default(),
            cache: None,
            toxicity: None,
            emotion: None,
            sarcasm: None,
            sentiment: None,
        }
    }

    /// Use the HuggingFace Inference API for the three classifiers.
    ///
    /// An empty key sends anonymous requests.
    #[cfg(feature = "huggingface")]
    pub fn huggingface(mut self, api_key: impl Into<String>) -> Self {
        self.huggingface_key = Some(api_key.into());
        self
    }

    /// Override the inference API base URL.
    ///
    /// Only used by the HuggingFace backend; without
    /// [`huggingface()`](Self::huggingface) it has no effect.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Like [`base_url()`](Self::base_url), this only applies to the
    /// HuggingFace backend and is ignored otherwise.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Choose the classifier models.
    pub fn models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    /// Configure retry for the classifier calls.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Disable retries (single attempt per classifier call).
    pub fn disable_retry(mut self) -> Self {
        self.retry = RetryConfig::disabled();
        self
    }

    /// Cache signals per input text for the lifetime of the analyzer.
    pub fn signal_cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    pub fn toxicity_provider(mut self, provider: Arc<dyn ToxicityProvider>) -> Self {
        self.toxicity = Some(provider);
        self
    }

    pub fn emotion_provider(mut self, provider: Arc<dyn EmotionProvider>) -> Self {
        self.emotion = Some(provider);
        self
    }

    pub fn sarcasm_provider(mut self, provider: Arc<dyn SarcasmProvider>) -> Self {
        self.sarcasm = Some(provider);
        self
    }

    pub fn sentiment_provider(mut self, provider: Arc<dyn SentimentProvider>) -> Self {
        self.sentiment = Some(provider);
        self
    }

    /// Build the analyzer.
    ///
    /// Fails with `NoProvider` when a classifier has neither an override nor
    /// a HuggingFace backend.
    pub fn build(self) -> Result<ToneAnalyzer> {
        #[cfg(feature = "huggingface")]
        let (toxicity, emotion, sarcasm) = {
            let mut toxicity = self.toxicity;
            let mut emotion = self.emotion;
            let mut sarcasm = self.sarcasm;

            if let Some(key) = &self.huggingface_key {
                use crate::providers::huggingface::{
                    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HuggingFaceClient, HuggingFaceEmotion,
                    HuggingFaceSarcasm, HuggingFaceToxicity,
                };

                let client = HuggingFaceClient::with_options(
                    key.clone(),
                    self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                    self.timeout.unwrap_or(DEFAULT_TIMEOUT),
                )?;
                if toxicity.is_none() {
                    toxicity = Some(Arc::new(HuggingFaceToxicity::new(
                        client.clone(),
                        &self.models.toxicity,
                    )));
                }
                if emotion.is_none() {
                    emotion = Some(Arc::new(HuggingFaceEmotion::new(
                        client.clone(),
                        &self.models.emotion,
                    )));
                }
                if sarcasm.is_none() {
                    sarcasm = Some(Arc::new(HuggingFaceSarcasm::new(
                        client,
                        &self.models.sarcasm,
                    )));
                }
            }
            (toxicity, emotion, sarcasm)
        };

        #[cfg(not(feature = "huggingface"))]
        let (toxicity, emotion, sarcasm) = (self.toxicity, self.emotion, self.sarcasm);

        let toxicity = toxicity.ok_or(TrollGuardError::NoProvider("toxicity"))?;
        let emotion = emotion.ok_or(TrollGuardError::NoProvider("emotion"))?;
        let sarcasm = sarcasm.ok_or(TrollGuardError::NoProvider("sarcasm"))?;
        let sentiment: Arc<dyn SentimentProvider> = match self.sentiment {
            Some(provider) => provider,
            None => Arc::new(VaderSentiment::new()),
        };

        let (toxicity, emotion, sarcasm) = if self.retry.max_attempts > 1 {
            let toxicity: Arc<dyn ToxicityProvider> =
                Arc::new(RetryingToxicityProvider::new(toxicity, self.retry.clone()));
            let emotion: Arc<dyn EmotionProvider> =
                Arc::new(RetryingEmotionProvider::new(emotion, self.retry.clone()));
            let sarcasm: Arc<dyn SarcasmProvider> =
                Arc::new(RetryingSarcasmProvider::new(sarcasm, self.retry.clone()));
            (toxicity, emotion, sarcasm)
        } else {
            (toxicity, emotion, sarcasm)
        };

        let cache = self.cache.as_ref().map(SignalCache::new);

        Ok(ToneAnalyzer::from_parts(
            toxicity, emotion, sarcasm, sentiment, cache,
        ))
    }
}

impl Default for ToneAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
