//! Lexicon sentiment scores.

use serde::{Deserialize, Serialize};

/// Polarity scores from the lexicon sentiment scorer.
///
/// `pos`, `neu` and `neg` are proportions of the text; `compound` is the
/// normalised aggregate in `[-1, 1]`. Only `compound` feeds the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}
