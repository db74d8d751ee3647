//! Opt-in in-memory cache of classifier signals.
//!
//! The classifiers are deterministic for a given model, so re-submitting a
//! text in the same session can skip all collaborator calls. Entries live in
//! memory only and disappear with the process.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;
use crate::types::ClassifierSignals;

/// Configuration for the signal cache.
///
/// Pass to [`ToneAnalyzerBuilder::signal_cache()`](crate::ToneAnalyzerBuilder::signal_cache)
/// to activate. Without this, no cache is allocated.
///
/// ```rust
/// # use trollguard::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 1,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// LRU + TTL cache of [`ClassifierSignals`], keyed on a hash of the input text.
pub struct SignalCache {
    cache: Cache<u64, ClassifierSignals>,
}

impl SignalCache {
    /// Create a new signal cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    /// Look up cached signals. Emits cache hit/miss metrics.
    pub async fn get(&self, text: &str) -> Option<ClassifierSignals> {
        match self.cache.get(&cache_key(text)).await {
            Some(signals) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                Some(signals)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }

    /// Store signals for `text`.
    pub async fn insert(&self, text: &str, signals: ClassifierSignals) {
        self.cache.insert(cache_key(text), signals).await;
    }
}

fn cache_key(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Emotion, EmotionScore};

    fn sample() -> ClassifierSignals {
        ClassifierSignals {
            toxic_score: 0.1,
            top_emotion: EmotionScore::new(Emotion::Joy, 0.8),
            sarcasm_detected: false,
            sentiment_compound: 0.4,
        }
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = SignalCache::new(&CacheConfig::default());
        assert!(cache.get("hello").await.is_none());

        cache.insert("hello", sample()).await;
        assert_eq!(cache.get("hello").await, Some(sample()));
        assert!(cache.get("hello!").await.is_none());
    }

    #[test]
    fn key_is_stable_for_identical_text() {
        assert_eq!(cache_key("same"), cache_key("same"));
        assert_ne!(cache_key("same"), cache_key("other"));
    }
}
