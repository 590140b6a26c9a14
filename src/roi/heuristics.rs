//! Linear scoring heuristics for suitability and confidence.
//!
//! Both scores are placeholders with hand-picked weights, not statistically
//! derived models. They fall as the automation development and maintenance
//! burden grows, and are clamped to a fixed band.

/// Suitability points lost per hour of automation development per test.
pub const SUITABILITY_DEV_WEIGHT: f64 = 10.0;
/// Suitability points lost per hour of maintenance per cycle.
pub const SUITABILITY_MAINTENANCE_WEIGHT: f64 = 15.0;

/// Confidence points lost per hour of maintenance per cycle.
pub const CONFIDENCE_MAINTENANCE_WEIGHT: f64 = 10.0;
/// Confidence points lost per hour of automation development per test.
pub const CONFIDENCE_DEV_WEIGHT: f64 = 5.0;

pub const CONFIDENCE_FLOOR: f64 = 50.0;
pub const CONFIDENCE_CEILING: f64 = 95.0;

/// Automation suitability in `0..=100`.
///
/// `100 - (dev_hrs * 10 + maintenance_hrs * 15)`, clamped and rounded half
/// away from zero.
pub fn compute_suitability(dev_hrs: f64, maintenance_hrs: f64) -> u8 {
    let score =
        100.0 - (dev_hrs * SUITABILITY_DEV_WEIGHT + maintenance_hrs * SUITABILITY_MAINTENANCE_WEIGHT);
    if score.is_nan() {
        return 0;
    }
    score.clamp(0.0, 100.0).round() as u8
}

/// Estimation confidence in `50.0..=95.0`.
///
/// `100 - maintenance_hrs * 10 - dev_hrs * 5`, clamped.
pub fn compute_confidence(maintenance_hrs: f64, dev_hrs: f64) -> f64 {
    let confidence =
        100.0 - maintenance_hrs * CONFIDENCE_MAINTENANCE_WEIGHT - dev_hrs * CONFIDENCE_DEV_WEIGHT;
    if confidence.is_nan() {
        return CONFIDENCE_FLOOR;
    }
    confidence.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}
