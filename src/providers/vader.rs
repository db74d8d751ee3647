//! Local lexicon sentiment via VADER.
//!
//! VADER scores text against a fixed word-valence lexicon with negation,
//! intensifier and punctuation heuristics. It runs in-process and needs
//! no model download.

use async_trait::async_trait;
use vader_sentiment::SentimentIntensityAnalyzer;

use super::traits::SentimentProvider;
use crate::types::SentimentScores;
use crate::{Result, TrollGuardError};

/// [`SentimentProvider`] backed by the VADER lexicon.
pub struct VaderSentiment {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderSentiment {
    /// Load the bundled lexicon.
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score `text` synchronously.
    ///
    /// Text with no lexicon hits scores a compound of exactly 0.0, whatever
    /// its punctuation; emphasis only amplifies an existing valence.
    pub fn scores(&self, text: &str) -> Result<SentimentScores> {
        let raw = self.analyzer.polarity_scores(text);
        let get = |key: &str| {
            raw.get(key)
                .copied()
                .ok_or_else(|| TrollGuardError::MissingLabel(key.to_string()))
        };

        let pos = get("pos")?;
        let neg = get("neg")?;
        // The lexicon crate adds `!`/`?` emphasis even to a zero sum.
        let compound = if pos == 0.0 && neg == 0.0 {
            0.0
        } else {
            get("compound")?
        };

        Ok(SentimentScores {
            compound,
            pos,
            neu: get("neu")?,
            neg,
        })
    }
}

impl Default for VaderSentiment {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SentimentProvider for VaderSentiment {
    fn name(&self) -> &str {
        "vader"
    }

    async fn polarity(&self, text: &str) -> Result<SentimentScores> {
        self.scores(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        let scores = VaderSentiment::new()
            .scores("I love this, it is wonderful!")
            .unwrap();
        assert!(scores.compound >= 0.3, "compound = {}", scores.compound);
    }

    #[test]
    fn hostile_text_scores_strongly_negative() {
        let scores = VaderSentiment::new()
            .scores("You are a horrible, stupid, worthless idiot. I hate you.")
            .unwrap();
        assert!(scores.compound < -0.5, "compound = {}", scores.compound);
    }

    #[test]
    fn compound_stays_in_range() {
        let vader = VaderSentiment::new();
        for text in ["ok", "GREAT!!!", "not bad at all", "the worst, the WORST"] {
            let scores = vader.scores(text).unwrap();
            assert!((-1.0..=1.0).contains(&scores.compound));
        }
    }

    #[test]
    fn proportions_sum_to_about_one() {
        let scores = VaderSentiment::new()
            .scores("The weather is nice but the train was late.")
            .unwrap();
        let total = scores.pos + scores.neu + scores.neg;
        assert!((total - 1.0).abs() < 0.01, "total = {total}");
    }

    #[test]
    fn punctuation_alone_carries_no_sentiment() {
        let vader = VaderSentiment::new();
        for text in ["Meeting at 3!!!!", "See you tomorrow!!!!", "What?!?!?!"] {
            let scores = vader.scores(text).unwrap();
            assert_eq!(scores.compound, 0.0, "compound for {text:?}");
        }
    }

    #[test]
    fn punctuation_still_amplifies_real_sentiment() {
        let vader = VaderSentiment::new();
        let plain = vader.scores("This is good").unwrap();
        let emphatic = vader.scores("This is good!!!").unwrap();
        assert!(emphatic.compound > plain.compound);
    }
}
