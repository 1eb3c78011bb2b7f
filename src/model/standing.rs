use serde::{Deserialize, Serialize};

use crate::model::baseline::BaselineScope;
use crate::model::metrics::{MemberMetricRecord, Metric};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Applicable,
    Undefined,
    NotEligible,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStanding {
    pub metric: Metric,
    pub value: Option<f64>,
    pub percentile: Option<f64>,
    pub rank: Option<usize>,
    pub population_size: usize,
    pub population_mean: Option<f64>,
    pub applicability: Applicability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStanding {
    pub member_id: String,
    pub scope: BaselineScope,
    pub record: MemberMetricRecord,
    pub not_eligible_to_ask_questions: bool,
    pub in_population: bool,
    pub metrics: Vec<MetricStanding>,
}

impl MemberStanding {
    pub fn metric(&self, metric: Metric) -> Option<&MetricStanding> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub member_id: String,
    pub value: f64,
    pub percentile: f64,
}
