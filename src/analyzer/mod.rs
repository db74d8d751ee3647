//! The tone analyzer: collaborators in, [`ToneReport`] out.
//!
//! A [`ToneAnalyzer`] is built once per process and then used read-only.
//! Front-ends hold it by reference; nothing about it is global.

mod builder;

pub use builder::{ModelConfig, ToneAnalyzerBuilder};

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::cache::SignalCache;
use crate::fusion;
use crate::providers::{EmotionProvider, SarcasmProvider, SentimentProvider, ToxicityProvider};
use crate::telemetry;
use crate::types::{AnalysisInput, ClassifierSignals, ToneReport};
use crate::{Result, TrollGuardError};

/// Names of the collaborators an analyzer was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderNames {
    pub toxicity: String,
    pub emotion: String,
    pub sarcasm: String,
    pub sentiment: String,
}

/// Runs the four collaborators for a text and fuses their signals.
pub struct ToneAnalyzer {
    toxicity: Arc<dyn ToxicityProvider>,
    emotion: Arc<dyn EmotionProvider>,
    sarcasm: Arc<dyn SarcasmProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    cache: Option<SignalCache>,
}

impl ToneAnalyzer {
    /// Create a new builder for configuring the analyzer.
    pub fn builder() -> ToneAnalyzerBuilder {
        ToneAnalyzerBuilder::new()
    }

    pub(crate) fn from_parts(
        toxicity: Arc<dyn ToxicityProvider>,
        emotion: Arc<dyn EmotionProvider>,
        sarcasm: Arc<dyn SarcasmProvider>,
        sentiment: Arc<dyn SentimentProvider>,
        cache: Option<SignalCache>,
    ) -> Self {
        Self {
            toxicity,
            emotion,
            sarcasm,
            sentiment,
            cache,
        }
    }

    pub fn provider_names(&self) -> ProviderNames {
        ProviderNames {
            toxicity: self.toxicity.name().to_string(),
            emotion: self.emotion.name().to_string(),
            sarcasm: self.sarcasm.name().to_string(),
            sentiment: self.sentiment.name().to_string(),
        }
    }

    /// Validate `text`, gather its signals and fuse them.
    ///
    /// Blank input fails with `InvalidInput` before any collaborator runs.
    /// If any collaborator fails the whole analysis fails; there are no
    /// partial verdicts.
    #[instrument(skip_all, fields(chars = text.chars().count()))]
    pub async fn analyze(&self, text: &str) -> Result<ToneReport> {
        let start = Instant::now();
        let outcome = self.analyze_inner(text).await;

        match &outcome {
            Ok(report) => {
                metrics::counter!(telemetry::ANALYSES_TOTAL,
                    "status" => "ok",
                    "label" => report.result.classification.key(),
                )
                .increment(1);
                info!(
                    label = report.result.classification.key(),
                    confidence = report.result.confidence,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "analysis complete"
                );
            }
            Err(TrollGuardError::InvalidInput(reason)) => {
                debug!(%reason, "input rejected");
            }
            Err(e) => {
                metrics::counter!(telemetry::ANALYSES_TOTAL, "status" => "error").increment(1);
                warn!(error = %e, "analysis failed");
            }
        }
        metrics::histogram!(telemetry::ANALYSIS_DURATION_SECONDS)
            .record(start.elapsed().as_secs_f64());

        outcome
    }

    async fn analyze_inner(&self, text: &str) -> Result<ToneReport> {
        let input = AnalysisInput::new(text)?;
        let signals = self.signals(&input).await?;
        let result = fusion::classify(&signals);
        Ok(ToneReport {
            input,
            signals,
            result,
        })
    }

    /// Gather the four classifier signals for `input`.
    ///
    /// The collaborators are independent, so their calls are in flight
    /// together; this returns once all have answered or the first one fails.
    /// With a signal cache configured, a repeated text skips the calls.
    pub async fn signals(&self, input: &AnalysisInput) -> Result<ClassifierSignals> {
        let text = input.as_str();

        if let Some(cache) = &self.cache {
            if let Some(signals) = cache.get(text).await {
                debug!("signal cache hit");
                return Ok(signals);
            }
        }

        let (toxic_score, top_emotion, sarcasm_detected, sentiment) = tokio::try_join!(
            timed(self.toxicity.name(), "toxicity", self.toxicity.toxicity(text)),
            timed(self.emotion.name(), "emotion", self.emotion.emotion(text)),
            timed(self.sarcasm.name(), "sarcasm", self.sarcasm.sarcasm(text)),
            timed(self.sentiment.name(), "sentiment", self.sentiment.polarity(text)),
        )?;

        let signals = ClassifierSignals {
            toxic_score,
            top_emotion,
            sarcasm_detected,
            sentiment_compound: sentiment.compound,
        };
        debug!(?signals, "signals gathered");

        if let Some(cache) = &self.cache {
            cache.insert(text, signals.clone()).await;
        }

        Ok(signals)
    }
}

/// Await a collaborator call, recording its duration.
async fn timed<T>(
    provider: &str,
    operation: &'static str,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    let start = Instant::now();
    let result = call.await;
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "provider" => provider.to_owned(),
        "operation" => operation,
    )
    .record(start.elapsed().as_secs_f64());
    if let Err(e) = &result {
        warn!(provider, operation, error = %e, "collaborator failed");
    }
    result
}
