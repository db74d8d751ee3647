//! Tone verdict types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AnalysisInput, ClassifierSignals};

/// The five possible verdicts of the fusion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneLabel {
    ToxicAbusive,
    Sarcastic,
    DisgustAngry,
    PositiveNormal,
    NeutralNormal,
}

impl ToneLabel {
    /// Human-readable name, e.g. `"Toxic / Abusive"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneLabel::ToxicAbusive => "Toxic / Abusive",
            ToneLabel::Sarcastic => "Sarcastic",
            ToneLabel::DisgustAngry => "Disgust / Angry",
            ToneLabel::PositiveNormal => "Positive / Normal",
            ToneLabel::NeutralNormal => "Neutral / Normal",
        }
    }

    /// Stable identifier used in metric labels and JSON.
    pub fn key(&self) -> &'static str {
        match self {
            ToneLabel::ToxicAbusive => "toxic_abusive",
            ToneLabel::Sarcastic => "sarcastic",
            ToneLabel::DisgustAngry => "disgust_angry",
            ToneLabel::PositiveNormal => "positive_normal",
            ToneLabel::NeutralNormal => "neutral_normal",
        }
    }

    /// Emoji shown in front of the label.
    pub fn badge(&self) -> &'static str {
        match self {
            ToneLabel::ToxicAbusive => "⚠️",
            ToneLabel::Sarcastic => "😏",
            ToneLabel::DisgustAngry => "🤢",
            ToneLabel::PositiveNormal => "😊",
            ToneLabel::NeutralNormal => "😐",
        }
    }

    /// Hex colour a graphical front-end paints the label with.
    pub fn color(&self) -> &'static str {
        match self {
            ToneLabel::ToxicAbusive => "#ef233c",
            ToneLabel::Sarcastic => "#ffb703",
            ToneLabel::DisgustAngry => "#f77f00",
            ToneLabel::PositiveNormal => "#06d6a0",
            ToneLabel::NeutralNormal => "#118ab2",
        }
    }
}

impl fmt::Display for ToneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the fusion rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub classification: ToneLabel,
    /// Heuristic salience percentage in `[0, 99.9]`. Not a calibrated probability.
    pub confidence: f64,
}

/// A complete analysis: the input, the raw signals and the verdict.
///
/// This is what front-ends render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneReport {
    pub input: AnalysisInput,
    pub signals: ClassifierSignals,
    pub result: AnalysisResult,
}
