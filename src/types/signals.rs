//! Classifier output types and the per-request signal bundle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One `{label, score}` entry of a classifier distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Pick the highest-scoring entry of a distribution.
///
/// Ties go to the entry encountered first. Returns `None` for an empty
/// distribution.
pub fn top_label(distribution: &[LabelScore]) -> Option<&LabelScore> {
    distribution.iter().fold(None, |best, entry| match best {
        Some(current) if current.score >= entry.score => Some(current),
        _ => Some(entry),
    })
}

/// Emotion categories produced by the emotion classifier.
///
/// The closed set covers the vocabularies of the common English emotion
/// models; labels outside it are kept, lowercased, in [`Emotion::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Love,
    Neutral,
    Sadness,
    Surprise,
    Other(String),
}

impl Emotion {
    /// Parse a classifier label, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "anger" => Emotion::Anger,
            "disgust" => Emotion::Disgust,
            "fear" => Emotion::Fear,
            "joy" => Emotion::Joy,
            "love" => Emotion::Love,
            "neutral" => Emotion::Neutral,
            "sadness" => Emotion::Sadness,
            "surprise" => Emotion::Surprise,
            other => Emotion::Other(other.to_string()),
        }
    }

    /// Lowercase classifier label.
    pub fn as_str(&self) -> &str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Love => "love",
            Emotion::Neutral => "neutral",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Other(label) => label,
        }
    }

    /// Whether this emotion pushes the verdict towards "Disgust / Angry".
    pub fn is_hostile(&self) -> bool {
        matches!(self, Emotion::Anger | Emotion::Disgust)
    }

    /// Label with the first letter upper-cased, for display.
    pub fn capitalized(&self) -> String {
        let label = self.as_str();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for Emotion {
    fn from(label: String) -> Self {
        Emotion::from_label(&label)
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        emotion.as_str().to_string()
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The arg-max entry of an emotion distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub label: Emotion,
    pub score: f32,
}

impl EmotionScore {
    pub fn new(label: Emotion, score: f32) -> Self {
        Self { label, score }
    }

    /// Reduce a raw distribution to its top entry.
    ///
    /// Returns `None` for an empty distribution.
    pub fn from_distribution(distribution: &[LabelScore]) -> Option<Self> {
        top_label(distribution).map(|top| Self {
            label: Emotion::from_label(&top.label),
            score: top.score,
        })
    }
}

/// Everything the fusion rule looks at for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSignals {
    /// Probability that the input is toxic, in `[0, 1]`.
    pub toxic_score: f32,
    /// Highest-scoring emotion.
    pub top_emotion: EmotionScore,
    /// Whether the sarcasm classifier flagged the input.
    pub sarcasm_detected: bool,
    /// Lexicon compound polarity, in `[-1, 1]`.
    pub sentiment_compound: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_label_picks_highest_score() {
        let dist = vec![
            LabelScore::new("joy", 0.2),
            LabelScore::new("anger", 0.7),
            LabelScore::new("fear", 0.1),
        ];
        assert_eq!(top_label(&dist).unwrap().label, "anger");
    }

    #[test]
    fn top_label_tie_keeps_first_encountered() {
        let dist = vec![
            LabelScore::new("sadness", 0.4),
            LabelScore::new("anger", 0.4),
            LabelScore::new("joy", 0.2),
        ];
        assert_eq!(top_label(&dist).unwrap().label, "sadness");
    }

    #[test]
    fn top_label_empty_is_none() {
        assert!(top_label(&[]).is_none());
    }

    #[test]
    fn emotion_parses_case_insensitively() {
        assert_eq!(Emotion::from_label("Anger"), Emotion::Anger);
        assert_eq!(Emotion::from_label("DISGUST"), Emotion::Disgust);
        assert_eq!(
            Emotion::from_label("optimism"),
            Emotion::Other("optimism".to_string())
        );
    }

    #[test]
    fn only_anger_and_disgust_are_hostile() {
        assert!(Emotion::Anger.is_hostile());
        assert!(Emotion::Disgust.is_hostile());
        assert!(!Emotion::Fear.is_hostile());
        assert!(!Emotion::Other("rage".into()).is_hostile());
    }

    #[test]
    fn emotion_capitalized() {
        assert_eq!(Emotion::Joy.capitalized(), "Joy");
        assert_eq!(Emotion::Other("optimism".into()).capitalized(), "Optimism");
    }

    #[test]
    fn emotion_serializes_as_plain_label() {
        let json = serde_json::to_string(&EmotionScore::new(Emotion::Sadness, 0.5)).unwrap();
        assert_eq!(json, r#"{"label":"sadness","score":0.5}"#);
    }
}
