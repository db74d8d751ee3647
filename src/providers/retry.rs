//! Retry configuration, delay calculation, and provider decorators.
//!
//! Provides [`RetryConfig`] for controlling retry behaviour and
//! `Retrying*Provider` decorators that wrap the classifier traits with
//! automatic retry on transient errors. The inference API answers 503 while
//! a cold model loads, so the first request of a session commonly needs one.
//!
//! All decorators delegate to the shared `with_retry()` helper,
//! keeping retry logic in a single place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::traits::{EmotionProvider, SarcasmProvider, ToxicityProvider};
use crate::telemetry;
use crate::types::EmotionScore;
use crate::{Result, TrollGuardError};

/// Configuration for retry behaviour on transient errors.
///
/// Uses exponential backoff:
///
/// ```rust
/// # use trollguard::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// Uses exponential backoff: `initial_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Calculate the effective delay, respecting provider `retry_after` hints.
    ///
    /// If a `retry_after` duration is provided (from a `RateLimited` error),
    /// it takes precedence over the calculated backoff.
    pub fn effective_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or_else(|| self.delay_for_attempt(attempt))
    }
}

// ============================================================================
// Shared retry helper
// ============================================================================

/// Execute an async operation with retry logic.
///
/// Retries on transient errors (as classified by [`TrollGuardError::is_transient()`])
/// up to `config.max_attempts`, using exponential backoff and respecting
/// `retry_after` hints from `RateLimited` errors.
///
/// Permanent errors are returned immediately without retry.
pub(crate) async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    provider_name: &str,
    operation: &'static str,
    f: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 0..config.max_attempts.max(1) {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                if attempt + 1 < config.max_attempts {
                    metrics::counter!(telemetry::RETRIES_TOTAL,
                        "provider" => provider_name.to_owned(),
                        "operation" => operation,
                    )
                    .increment(1);
                    let delay = config.effective_delay(attempt, e.retry_after());
                    warn!(
                        provider = provider_name,
                        operation,
                        attempt = attempt + 1,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after transient error"
                    );
                    tokio::time::sleep(delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e), // permanent error, no retry
        }
    }
    Err(last_err.unwrap_or(TrollGuardError::EmptyResponse))
}

// ============================================================================
// RetryingToxicityProvider
// ============================================================================

/// Decorator that wraps a [`ToxicityProvider`] with retry logic.
///
/// On transient errors, retries with exponential backoff up to
/// `config.max_attempts`. Permanent errors are returned immediately.
pub struct RetryingToxicityProvider {
    inner: Arc<dyn ToxicityProvider>,
    config: RetryConfig,
}

impl RetryingToxicityProvider {
    /// Wrap a toxicity provider with retry logic.
    pub fn new(inner: Arc<dyn ToxicityProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl ToxicityProvider for RetryingToxicityProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn toxicity(&self, text: &str) -> Result<f32> {
        with_retry(&self.config, self.inner.name(), "toxicity", || {
            self.inner.toxicity(text)
        })
        .await
    }
}

// ============================================================================
// RetryingEmotionProvider
// ============================================================================

/// Decorator that wraps an [`EmotionProvider`] with retry logic.
///
/// Same semantics as [`RetryingToxicityProvider`].
pub struct RetryingEmotionProvider {
    inner: Arc<dyn EmotionProvider>,
    config: RetryConfig,
}

impl RetryingEmotionProvider {
    /// Wrap an emotion provider with retry logic.
    pub fn new(inner: Arc<dyn EmotionProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl EmotionProvider for RetryingEmotionProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn emotion(&self, text: &str) -> Result<EmotionScore> {
        with_retry(&self.config, self.inner.name(), "emotion", || {
            self.inner.emotion(text)
        })
        .await
    }
}

// ============================================================================
// RetryingSarcasmProvider
// ============================================================================

/// Decorator that wraps a [`SarcasmProvider`] with retry logic.
///
/// Same semantics as [`RetryingToxicityProvider`].
pub struct RetryingSarcasmProvider {
    inner: Arc<dyn SarcasmProvider>,
    config: RetryConfig,
}

impl RetryingSarcasmProvider {
    /// Wrap a sarcasm provider with retry logic.
    pub fn new(inner: Arc<dyn SarcasmProvider>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl SarcasmProvider for RetryingSarcasmProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn sarcasm(&self, text: &str) -> Result<bool> {
        with_retry(&self.config, self.inner.name(), "sarcasm", || {
            self.inner.sarcasm(text)
        })
        .await
    }
}
