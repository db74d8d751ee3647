//! Public types for the TrollGuard API.

mod input;
mod sentiment;
mod signals;
mod tone;

pub use input::AnalysisInput;
pub use sentiment::SentimentScores;
pub use signals::{ClassifierSignals, Emotion, EmotionScore, LabelScore, top_label};
pub use tone::{AnalysisResult, ToneLabel, ToneReport};
