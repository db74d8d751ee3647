//! Collaborator implementations behind the provider traits.
//!
//! The three pretrained classifiers are reached through the HuggingFace
//! Inference API; lexicon sentiment runs locally.

#[cfg(feature = "huggingface")]
pub mod huggingface;
pub mod retry;
pub mod traits;
pub mod vader;

#[cfg(feature = "huggingface")]
pub use huggingface::{HuggingFaceClient, HuggingFaceEmotion, HuggingFaceSarcasm, HuggingFaceToxicity};
pub use retry::{RetryConfig, RetryingEmotionProvider, RetryingSarcasmProvider, RetryingToxicityProvider};
pub use traits::{EmotionProvider, SarcasmProvider, SentimentProvider, ToxicityProvider, is_sarcasm_label};
pub use vader::VaderSentiment;
