//! Telemetry metric name constants.
//!
//! Without a `metrics` recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `trollguard_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: provider name (e.g. "huggingface", "vader")
//! - `operation`: collaborator invoked ("toxicity", "emotion", "sarcasm", "sentiment")
//! - `label`: final tone label of an analysis
//! - `status`: outcome: "ok" or "error"

/// Total analyses attempted.
///
/// Labels: `status` ("ok" | "error"), `label` (only when `status` is "ok").
pub const ANALYSES_TOTAL: &str = "trollguard_analyses_total";

/// End-to-end analysis duration in seconds, signals and fusion included.
pub const ANALYSIS_DURATION_SECONDS: &str = "trollguard_analysis_duration_seconds";

/// Collaborator request duration in seconds.
///
/// Labels: `provider`, `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "trollguard_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `provider`, `operation`.
pub const RETRIES_TOTAL: &str = "trollguard_retries_total";

/// Total signal cache hits.
pub const CACHE_HITS_TOTAL: &str = "trollguard_cache_hits_total";

/// Total signal cache misses.
pub const CACHE_MISSES_TOTAL: &str = "trollguard_cache_misses_total";
