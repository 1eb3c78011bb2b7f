use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::metrics::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum BaselineScope {
    Overall,
    Year(i32),
    Parliament(u32),
}

impl BaselineScope {
    pub fn partition(self) -> BaselinePartition {
        match self {
            BaselineScope::Overall => BaselinePartition::Overall,
            BaselineScope::Year(_) => BaselinePartition::ByYear,
            BaselineScope::Parliament(_) => BaselinePartition::ByParliament,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselinePartition {
    Overall,
    ByYear,
    ByParliament,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: Option<f64>,
    /// Defined values of the eligible population, ascending.
    pub distribution: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountAverages {
    pub count_sittings_attended: f64,
    pub count_sittings_spoken: f64,
    pub count_topics: f64,
    pub count_speeches: f64,
    pub count_words: f64,
    pub count_primary_questions: f64,
    pub count_sentences: f64,
    pub count_syllables: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationBaseline {
    pub scope: BaselineScope,
    pub member_count: usize,
    pub excluded_count: usize,
    pub metrics: BTreeMap<Metric, MetricSummary>,
    pub count_averages: Option<CountAverages>,
    pub overall_readability: Option<f64>,
}

impl PopulationBaseline {
    pub fn empty(scope: BaselineScope, excluded_count: usize) -> Self {
        Self {
            scope,
            member_count: 0,
            excluded_count,
            metrics: BTreeMap::new(),
            count_averages: None,
            overall_readability: None,
        }
    }

    pub fn summary(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.get(&metric)
    }

    pub fn mean(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).and_then(|s| s.mean)
    }

    pub fn distribution(&self, metric: Metric) -> &[f64] {
        self.metrics
            .get(&metric)
            .map(|s| s.distribution.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.member_count == 0
    }
}
