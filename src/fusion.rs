//! Decision fusion: four classifier signals in, one tone verdict out.
//!
//! The rule is an ordered cascade where the first matching branch wins:
//!
//! 1. toxicity above [`TOXICITY_THRESHOLD`] or compound sentiment below
//!    [`STRONG_NEGATIVE_THRESHOLD`] → [`ToneLabel::ToxicAbusive`]
//! 2. sarcasm flagged → [`ToneLabel::Sarcastic`]
//! 3. top emotion is anger or disgust → [`ToneLabel::DisgustAngry`]
//! 4. compound sentiment at or above [`POSITIVE_THRESHOLD`] → [`ToneLabel::PositiveNormal`]
//! 5. otherwise → [`ToneLabel::NeutralNormal`]
//!
//! Thresholds are strict where written strict: a toxicity of exactly `0.6`
//! or a compound of exactly `-0.5` falls through to the later branches.

use crate::types::{AnalysisResult, ClassifierSignals, ToneLabel};

/// Toxicity strictly above this is abusive.
pub const TOXICITY_THRESHOLD: f32 = 0.6;

/// Compound sentiment strictly below this is abusive.
pub const STRONG_NEGATIVE_THRESHOLD: f64 = -0.5;

/// Compound sentiment at or above this is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;

/// Multiplier applied to the confidence when sarcasm is flagged.
pub const SARCASM_BOOST: f64 = 1.2;

/// Upper bound on the reported confidence percentage.
pub const MAX_CONFIDENCE: f64 = 99.9;

/// Fuse classifier signals into a verdict.
///
/// Pure and total: identical signals always give an identical result.
pub fn classify(signals: &ClassifierSignals) -> AnalysisResult {
    AnalysisResult {
        classification: classify_label(signals),
        confidence: confidence(signals),
    }
}

fn classify_label(signals: &ClassifierSignals) -> ToneLabel {
    if signals.toxic_score > TOXICITY_THRESHOLD
        || signals.sentiment_compound < STRONG_NEGATIVE_THRESHOLD
    {
        ToneLabel::ToxicAbusive
    } else if signals.sarcasm_detected {
        ToneLabel::Sarcastic
    } else if signals.top_emotion.label.is_hostile() {
        ToneLabel::DisgustAngry
    } else if signals.sentiment_compound >= POSITIVE_THRESHOLD {
        ToneLabel::PositiveNormal
    } else {
        ToneLabel::NeutralNormal
    }
}

/// Salience of the strongest signal as a percentage.
///
/// `max(toxicity, top emotion score, |compound|) * 100`, boosted by
/// [`SARCASM_BOOST`] when sarcasm is flagged and clamped to
/// `[0, MAX_CONFIDENCE]`. NaN inputs count as zero.
pub fn confidence(signals: &ClassifierSignals) -> f64 {
    let strongest = [
        f64::from(signals.toxic_score),
        f64::from(signals.top_emotion.score),
        signals.sentiment_compound.abs(),
    ]
    .into_iter()
    .filter(|v| !v.is_nan())
    .fold(0.0_f64, f64::max);

    let boost = if signals.sarcasm_detected {
        SARCASM_BOOST
    } else {
        1.0
    };

    (strongest * boost * 100.0).clamp(0.0, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Emotion, EmotionScore};

    fn signals(
        toxic_score: f32,
        emotion: Emotion,
        emotion_score: f32,
        sarcasm_detected: bool,
        sentiment_compound: f64,
    ) -> ClassifierSignals {
        ClassifierSignals {
            toxic_score,
            top_emotion: EmotionScore::new(emotion, emotion_score),
            sarcasm_detected,
            sentiment_compound,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn scenario_a_toxic() {
        let result = classify(&signals(0.8, Emotion::Joy, 0.3, false, 0.1));
        assert_eq!(result.classification, ToneLabel::ToxicAbusive);
        assert_close(result.confidence, 80.0);
    }

    #[test]
    fn scenario_b_angry() {
        let result = classify(&signals(0.1, Emotion::Anger, 0.7, false, -0.2));
        assert_eq!(result.classification, ToneLabel::DisgustAngry);
        assert_close(result.confidence, 70.0);
    }

    #[test]
    fn scenario_c_sarcastic() {
        let result = classify(&signals(0.2, Emotion::Joy, 0.4, true, 0.0));
        assert_eq!(result.classification, ToneLabel::Sarcastic);
        assert_close(result.confidence, 48.0);
    }

    #[test]
    fn scenario_d_positive() {
        let result = classify(&signals(0.05, Emotion::Joy, 0.9, false, 0.5));
        assert_eq!(result.classification, ToneLabel::PositiveNormal);
        assert_close(result.confidence, 90.0);
    }

    #[test]
    fn neutral_when_nothing_fires() {
        let result = classify(&signals(0.1, Emotion::Neutral, 0.5, false, 0.29));
        assert_eq!(result.classification, ToneLabel::NeutralNormal);
        assert_close(result.confidence, 50.0);
    }

    #[test]
    fn strong_negative_sentiment_is_toxic() {
        let result = classify(&signals(0.0, Emotion::Sadness, 0.2, true, -0.51));
        assert_eq!(result.classification, ToneLabel::ToxicAbusive);
    }

    #[test]
    fn toxicity_dominates_every_other_signal() {
        for sarcasm in [false, true] {
            for emotion in [Emotion::Anger, Emotion::Joy, Emotion::Disgust] {
                for compound in [-1.0, -0.2, 0.0, 0.9] {
                    let s = signals(0.61, emotion.clone(), 0.9, sarcasm, compound);
                    assert_eq!(classify(&s).classification, ToneLabel::ToxicAbusive);
                }
            }
        }
    }

    #[test]
    fn sarcasm_dominates_emotion_and_positive_sentiment() {
        for emotion in [Emotion::Anger, Emotion::Disgust, Emotion::Joy] {
            for compound in [-0.5, 0.0, 0.3, 1.0] {
                let s = signals(0.6, emotion.clone(), 0.5, true, compound);
                assert_eq!(classify(&s).classification, ToneLabel::Sarcastic);
            }
        }
    }

    #[test]
    fn hostile_emotion_dominates_positive_sentiment() {
        let result = classify(&signals(0.0, Emotion::Disgust, 0.6, false, 0.8));
        assert_eq!(result.classification, ToneLabel::DisgustAngry);
    }

    #[test]
    fn boundary_toxicity_falls_through() {
        let result = classify(&signals(0.6, Emotion::Neutral, 0.5, false, 0.0));
        assert_eq!(result.classification, ToneLabel::NeutralNormal);
    }

    #[test]
    fn boundary_negative_sentiment_falls_through() {
        let result = classify(&signals(0.0, Emotion::Neutral, 0.5, false, -0.5));
        assert_eq!(result.classification, ToneLabel::NeutralNormal);
    }

    #[test]
    fn boundary_positive_sentiment_is_inclusive() {
        let result = classify(&signals(0.0, Emotion::Neutral, 0.1, false, 0.3));
        assert_eq!(result.classification, ToneLabel::PositiveNormal);
    }

    #[test]
    fn sarcasm_boost_is_capped() {
        let result = classify(&signals(0.5, Emotion::Joy, 0.95, true, 0.0));
        assert_close(result.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn compound_magnitude_drives_confidence() {
        let result = classify(&signals(0.1, Emotion::Sadness, 0.2, false, -0.45));
        assert_close(result.confidence, 45.0);
    }

    #[test]
    fn confidence_stays_in_range() {
        let scores = [0.0_f32, 0.25, 0.5, 0.75, 1.0];
        let compounds = [-1.0, -0.5, 0.0, 0.5, 1.0];
        for &t in &scores {
            for &e in &scores {
                for &c in &compounds {
                    for sarcasm in [false, true] {
                        let conf = confidence(&signals(t, Emotion::Joy, e, sarcasm, c));
                        assert!((0.0..=MAX_CONFIDENCE).contains(&conf), "{conf}");
                    }
                }
            }
        }
    }

    #[test]
    fn nan_signal_counts_as_zero() {
        let conf = confidence(&signals(f32::NAN, Emotion::Joy, 0.4, false, f64::NAN));
        assert_close(conf, 40.0);
    }

    #[test]
    fn classify_is_idempotent() {
        let s = signals(0.3, Emotion::Fear, 0.55, true, -0.1);
        assert_eq!(classify(&s), classify(&s));
    }
}
