//! Portfolio-level figures across all analysed stories.

use serde::{Deserialize, Serialize};

use crate::roi::{round_to, EnrichedRecord, COST_PRECISION};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub story_count: usize,
    pub total_manual_cost: f64,
    pub total_automation_cost: f64,
    /// Manual minus automation; negative when automation costs more.
    pub net_savings: f64,
    /// Mean of the per-story ROI percentages, 0 for an empty batch.
    pub average_roi: f64,
    pub recommended_count: usize,
}

impl PortfolioSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EnrichedRecord>,
    {
        let mut summary = Self::default();
        let mut roi_sum = 0.0;
        let mut savings = 0.0;

        for record in records {
            summary.story_count += 1;
            summary.total_manual_cost += record.roi.manual_testing_cost;
            summary.total_automation_cost += record.roi.automation_testing_cost;
            roi_sum += record.roi.roi_percentage;
            savings += record.roi.net_savings();
            if record.automation_recommended {
                summary.recommended_count += 1;
            }
        }

        summary.total_manual_cost = round_to(summary.total_manual_cost, COST_PRECISION);
        summary.total_automation_cost = round_to(summary.total_automation_cost, COST_PRECISION);
        summary.net_savings = round_to(savings, COST_PRECISION);
        if summary.story_count > 0 {
            summary.average_roi = round_to(roi_sum / summary.story_count as f64, COST_PRECISION);
        }
        summary
    }
}

/// One line of the automation decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRow {
    pub user_story: String,
    pub roi_percentage: f64,
    pub automation_suitability_score: u8,
    pub automation_recommended: bool,
}

pub fn decision_matrix<'a, I>(records: I) -> Vec<DecisionRow>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    records
        .into_iter()
        .map(|r| DecisionRow {
            user_story: r.user_story.clone(),
            roi_percentage: r.roi.roi_percentage,
            automation_suitability_score: r.automation_suitability_score,
            automation_recommended: r.automation_recommended,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::{EstimationRecord, RoiCalculator};
    use pretty_assertions::assert_eq;

    fn record(story: &str, manual_rate: f64, dev_hrs: f64) -> EnrichedRecord {
        let estimation = EstimationRecord {
            total_test_cases: 100,
            manual_execution_time_per_test_hrs: 0.5,
            manual_cost_per_hour: manual_rate,
            automation_dev_time_per_test_hrs: dev_hrs,
            automation_cost_per_hour: 40.0,
            automation_maintenance_time_per_cycle_hrs: 2.0,
            execution_cycles_per_year: 12,
            tooling_cost_per_year: 500.0,
            automation_execution_cost_per_cycle: 0.0,
        };
        RoiCalculator::default()
            .enrich(story, None, estimation, 1.0)
            .unwrap()
    }

    #[test]
    fn totals_across_two_stories() {
        // second story: manual 6000, automation 8000 + 960 + 500 = 9460
        let records = vec![record("Login", 30.0, 1.0), record("Export", 10.0, 2.0)];

        let summary = PortfolioSummary::from_records(&records);

        assert_eq!(summary.story_count, 2);
        assert_eq!(summary.total_manual_cost, 24000.0);
        assert_eq!(summary.total_automation_cost, 14920.0);
        assert_eq!(summary.net_savings, 9080.0);
        assert_eq!(
            summary.average_roi,
            round_to((229.67 + records[1].roi.roi_percentage) / 2.0, 2)
        );
        assert_eq!(summary.recommended_count, 1);
    }

    #[test]
    fn empty_batch_has_zero_average() {
        let summary = PortfolioSummary::from_records(&Vec::<EnrichedRecord>::new());
        assert_eq!(summary, PortfolioSummary::default());
    }

    #[test]
    fn decision_matrix_mirrors_records() {
        let records = vec![record("Login", 30.0, 1.0), record("Export", 10.0, 2.0)];

        let rows = decision_matrix(&records);

        assert_eq!(rows[0].user_story, "Login");
        assert!(rows[0].automation_recommended);
        assert_eq!(rows[1].automation_suitability_score, 50);
        assert!(!rows[1].automation_recommended);
    }
}
