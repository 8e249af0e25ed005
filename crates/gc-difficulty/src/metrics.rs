//! # Difficulty Metrics
//!
//! Prometheus metrics for monitoring difficulty verification.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! gc-difficulty = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `difficulty_blocks_verified_total` - Counter of candidates whose target verified
//! - `difficulty_blocks_rejected_total` - Counter of rejected candidates (by reason)
//! - `difficulty_verification_latency_seconds` - Histogram of verification times
//! - `difficulty_ceiling_clamps_total` - Counter of computed targets clamped to the maximum

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Histogram,
    IntCounter,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Candidates whose difficulty verified
    pub static ref BLOCKS_VERIFIED: IntCounter = register_int_counter!(
        "difficulty_blocks_verified_total",
        "Total number of candidate blocks whose difficulty verified"
    )
    .expect("Failed to create BLOCKS_VERIFIED metric");

    /// Candidates rejected, labeled by reason
    pub static ref BLOCKS_REJECTED: CounterVec = register_counter_vec!(
        "difficulty_blocks_rejected_total",
        "Total number of candidate blocks rejected by difficulty checks",
        &["reason"]
    )
    .expect("Failed to create BLOCKS_REJECTED metric");

    /// Verification latency, including the ancestor walk
    pub static ref VERIFICATION_LATENCY: Histogram = register_histogram!(
        "difficulty_verification_latency_seconds",
        "Time taken to verify a candidate's difficulty in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to create VERIFICATION_LATENCY metric");

    /// Computed targets clamped to the network maximum
    pub static ref CEILING_CLAMPS: IntCounter = register_int_counter!(
        "difficulty_ceiling_clamps_total",
        "Total number of computed targets clamped to the proof-of-work limit"
    )
    .expect("Failed to create CEILING_CLAMPS metric");
}

/// Record a verified candidate
#[cfg(feature = "metrics")]
pub fn record_block_verified() {
    BLOCKS_VERIFIED.inc();
}

/// Record a rejected candidate with reason
#[cfg(feature = "metrics")]
pub fn record_block_rejected(reason: &str) {
    BLOCKS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record verification latency
#[cfg(feature = "metrics")]
pub fn record_verification_latency(seconds: f64) {
    VERIFICATION_LATENCY.observe(seconds);
}

/// Record a ceiling clamp
#[cfg(feature = "metrics")]
pub fn record_ceiling_clamp() {
    CEILING_CLAMPS.inc();
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_block_verified() {}

#[cfg(not(feature = "metrics"))]
pub fn record_block_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_verification_latency(_seconds: f64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_ceiling_clamp() {}
