//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use trollguard::providers::traits::{EmotionProvider, SarcasmProvider, ToxicityProvider};
use trollguard::telemetry;
use trollguard::{
    CacheConfig, Emotion, EmotionScore, Result, RetryConfig, ToneAnalyzer, TrollGuardError,
};

// ============================================================================
// Mock providers
// ============================================================================

struct CalmClassifier;

#[async_trait]
impl ToxicityProvider for CalmClassifier {
    fn name(&self) -> &str {
        "calm"
    }

    async fn toxicity(&self, _text: &str) -> Result<f32> {
        Ok(0.02)
    }
}

#[async_trait]
impl EmotionProvider for CalmClassifier {
    fn name(&self) -> &str {
        "calm"
    }

    async fn emotion(&self, _text: &str) -> Result<EmotionScore> {
        Ok(EmotionScore::new(Emotion::Neutral, 0.6))
    }
}

#[async_trait]
impl SarcasmProvider for CalmClassifier {
    fn name(&self) -> &str {
        "calm"
    }

    async fn sarcasm(&self, _text: &str) -> Result<bool> {
        Ok(false)
    }
}

struct LoadingToxicity;

#[async_trait]
impl ToxicityProvider for LoadingToxicity {
    fn name(&self) -> &str {
        "loading"
    }

    async fn toxicity(&self, _text: &str) -> Result<f32> {
        Err(TrollGuardError::Api {
            status: 503,
            message: "model loading".into(),
        })
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for a metric name carrying a specific label value.
fn counter_with_label(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

fn calm_analyzer() -> ToneAnalyzer {
    let calm = Arc::new(CalmClassifier);
    ToneAnalyzer::builder()
        .toxicity_provider(calm.clone())
        .emotion_provider(calm.clone())
        .sarcasm_provider(calm)
        .signal_cache(CacheConfig::new())
        .build()
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_analysis_records_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                calm_analyzer().analyze("the bus leaves at noon").await
            })
        })
    });
    assert!(result.is_ok());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::ANALYSES_TOTAL), 1);
    assert_eq!(
        counter_with_label(&snapshot, telemetry::ANALYSES_TOTAL, "label", "neutral_normal"),
        1
    );
    assert!(
        has_histogram(&snapshot, telemetry::ANALYSIS_DURATION_SECONDS),
        "expected an analysis duration histogram entry"
    );
    assert!(
        has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS),
        "expected a request duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_analysis_records_error_and_retries() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let calm = Arc::new(CalmClassifier);
                let analyzer = ToneAnalyzer::builder()
                    .toxicity_provider(Arc::new(LoadingToxicity))
                    .emotion_provider(calm.clone())
                    .sarcasm_provider(calm)
                    .retry(
                        RetryConfig::new()
                            .max_attempts(3)
                            .initial_delay(Duration::from_millis(1)),
                    )
                    .build()
                    .unwrap();
                analyzer.analyze("hello").await
            })
        })
    });
    assert!(result.is_err());

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(
        counter_with_label(&snapshot, telemetry::ANALYSES_TOTAL, "status", "error"),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::RETRIES_TOTAL), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn blank_input_records_no_analysis() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let result = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current()
                .block_on(async { calm_analyzer().analyze("   ").await })
        })
    });
    assert!(matches!(result, Err(TrollGuardError::InvalidInput(_))));

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::ANALYSES_TOTAL), 0);
    assert!(!has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn repeated_text_records_cache_hit() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let analyzer = calm_analyzer();
                analyzer.analyze("same words").await.unwrap();
                analyzer.analyze("same words").await.unwrap();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::ANALYSES_TOTAL), 2);
}
