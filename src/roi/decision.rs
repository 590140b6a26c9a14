use serde::{Deserialize, Serialize};

/// ROI must be strictly above this percentage for automation to be recommended.
pub const MIN_ROI_PERCENTAGE: f64 = 0.0;

/// Suitability must reach this score for automation to be recommended.
pub const MIN_SUITABILITY_SCORE: u8 = 60;

/// Thresholds for the automate / don't-automate recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionPolicy {
    #[serde(default = "default_min_roi_percentage")]
    pub min_roi_percentage: f64,

    #[serde(default = "default_min_suitability_score")]
    pub min_suitability_score: u8,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            min_roi_percentage: default_min_roi_percentage(),
            min_suitability_score: default_min_suitability_score(),
        }
    }
}

impl DecisionPolicy {
    pub fn recommends(&self, roi_percentage: f64, suitability_score: u8) -> bool {
        roi_percentage > self.min_roi_percentage
            && suitability_score >= self.min_suitability_score
    }
}

fn default_min_roi_percentage() -> f64 {
    MIN_ROI_PERCENTAGE
}

fn default_min_suitability_score() -> u8 {
    MIN_SUITABILITY_SCORE
}

/// Recommendation under the default thresholds.
pub fn compute_decision(roi_percentage: f64, suitability_score: u8) -> bool {
    DecisionPolicy::default().recommends(roi_percentage, suitability_score)
}
