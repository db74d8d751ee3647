//! TrollGuard - hybrid NLP tone analyzer
//!
//! Runs three pretrained classifiers (toxicity, emotion, sarcasm) and a
//! lexicon sentiment scorer over a piece of text, then fuses their signals
//! into one of five tone labels with a heuristic confidence percentage.
//!
//! # Example (requires `huggingface` feature)
//!
//! ```rust,no_run
//! use trollguard::ToneAnalyzer;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> trollguard::Result<()> {
//!     let analyzer = ToneAnalyzer::builder()
//!         .huggingface("hf_your_key")
//!         .build()?;
//!
//!     let report = analyzer.analyze("Oh great, another Monday.").await?;
//!
//!     println!(
//!         "{} ({:.1}%)",
//!         report.result.classification, report.result.confidence
//!     );
//!     Ok(())
//! }
//! ```
//!
//! The decision rule itself is available without any collaborator:
//!
//! ```rust
//! use trollguard::{ClassifierSignals, Emotion, EmotionScore, ToneLabel, fusion};
//!
//! let signals = ClassifierSignals {
//!     toxic_score: 0.1,
//!     top_emotion: EmotionScore::new(Emotion::Anger, 0.7),
//!     sarcasm_detected: false,
//!     sentiment_compound: -0.2,
//! };
//! let result = fusion::classify(&signals);
//! assert_eq!(result.classification, ToneLabel::DisgustAngry);
//! ```

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod console;
pub mod error;
pub mod fusion;
pub mod providers;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use analyzer::{ModelConfig, ProviderNames, ToneAnalyzer, ToneAnalyzerBuilder};
pub use cache::CacheConfig;
pub use config::{Config, Secrets};
pub use error::{Result, TrollGuardError};
pub use providers::RetryConfig;
pub use version::{BuildInfo, PKG_VERSION, version_string};

// Re-export all types
pub use types::{
    AnalysisInput, AnalysisResult, ClassifierSignals, Emotion, EmotionScore, LabelScore,
    SentimentScores, ToneLabel, ToneReport,
};
