//! Provider traits, one per collaborator.
//!
//! Each collaborator of the analysis sits behind its own narrow trait that
//! returns a typed result rather than raw classifier output. This enables:
//! - Decorators: `Retrying*Provider` wraps any implementation
//! - Test doubles: the analyzer is exercised without a network
//! - Mixed sources: remote classifiers next to a local lexicon scorer
//!
//! Interpretation of raw model output (which label to read, how to spot
//! sarcasm in free text) happens inside the implementations, never in the
//! analyzer.

use async_trait::async_trait;

use crate::Result;
use crate::types::{EmotionScore, SentimentScores};

/// Provider for toxicity scores.
#[async_trait]
pub trait ToxicityProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Probability in `[0, 1]` that `text` is toxic.
    ///
    /// Returns `MissingLabel` if the model output has no toxic score.
    async fn toxicity(&self, text: &str) -> Result<f32>;
}

/// Provider for the dominant emotion of a text.
#[async_trait]
pub trait EmotionProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Highest-scoring emotion of the distribution, ties going to the
    /// first-listed entry.
    async fn emotion(&self, text: &str) -> Result<EmotionScore>;
}

/// Provider for sarcasm detection.
#[async_trait]
pub trait SarcasmProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Whether `text` reads as sarcastic.
    async fn sarcasm(&self, text: &str) -> Result<bool>;
}

/// Provider for lexicon sentiment polarity.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Polarity scores for `text`.
    async fn polarity(&self, text: &str) -> Result<SentimentScores>;
}

/// Whether a free-text sarcasm label signals sarcasm.
///
/// Sarcasm models answer with free text rather than a fixed label set; a
/// case-insensitive substring check for `"sarcasm"` is the whole contract.
pub fn is_sarcasm_label(label: &str) -> bool {
    label.to_lowercase().contains("sarcasm")
}
