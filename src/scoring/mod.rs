//! Effectiveness update rule applied per reported test outcome.
//!
//! Scores are relative ranking weights, not probabilities: a success adds
//! 0.1, a failure subtracts 0.05, and values are deliberately unclamped —
//! negative and unbounded scores are valid and must not be normalized,
//! since that would change observable ranking order.

/// Score delta for a successful test outcome.
pub const SUCCESS_DELTA: f64 = 0.1;

/// Score delta for a failed test outcome (applied as a subtraction).
pub const FAILURE_DELTA: f64 = 0.05;

/// Baseline effectiveness assigned to a payload on first ingestion.
pub const BASELINE_EFFECTIVENESS: f64 = 1.0;

/// The signed delta to apply to a payload's effectiveness for one outcome.
pub fn outcome_delta(success: bool) -> f64 {
    if success {
        SUCCESS_DELTA
    } else {
        -FAILURE_DELTA
    }
}

/// Apply one outcome to an effectiveness score. Pure; no clamping.
pub fn apply_outcome(effectiveness: f64, success: bool) -> f64 {
    effectiveness + outcome_delta(success)
}
