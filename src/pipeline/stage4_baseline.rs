use std::collections::BTreeMap;

use crate::model::baseline::{
    BaselinePartition, BaselineScope, CountAverages, MetricSummary, PopulationBaseline,
};
use crate::model::metrics::{MemberMetricRecord, Metric, metric_order};
use crate::model::readability::flesch_reading_ease;
use crate::pipeline::stage2_aggregate::{
    Column, group_mean_excluding_zero, mean_defined, mean_excluding_zero,
};

#[derive(Debug, Clone)]
pub struct Stage4Inputs<'a> {
    pub records: &'a [MemberMetricRecord],
    pub partition: BaselinePartition,
}

#[derive(Debug)]
pub struct Stage4Output {
    pub baselines: Vec<PopulationBaseline>,
    /// Records that carry no value for the partition field.
    pub unpartitioned: usize,
}

pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Stage4Output {
    let mut scoped: BTreeMap<BaselineScope, Vec<&MemberMetricRecord>> = BTreeMap::new();
    let mut unpartitioned = 0usize;
    for record in inputs.records {
        match scope_of(record, inputs.partition) {
            Some(scope) => scoped.entry(scope).or_default().push(record),
            None => unpartitioned += 1,
        }
    }
    if unpartitioned > 0 {
        tracing::warn!(
            records = unpartitioned,
            partition = ?inputs.partition,
            "records lack the partition field and were left out of baselines"
        );
    }
    if inputs.partition == BaselinePartition::Overall && scoped.is_empty() {
        scoped.insert(BaselineScope::Overall, Vec::new());
    }

    let count_means = group_mean_excluding_zero(
        inputs.records,
        |r| scope_of(r, inputs.partition),
        &COUNT_COLUMNS,
    );
    let baselines: Vec<PopulationBaseline> = scoped
        .into_iter()
        .map(|(scope, records)| {
            let means = count_means.get(&Some(scope)).map(Vec::as_slice);
            build_baseline(scope, &records, means.unwrap_or(&[]))
        })
        .collect();
    tracing::debug!(baselines = baselines.len(), "built population baselines");
    Stage4Output {
        baselines,
        unpartitioned,
    }
}

pub fn scope_of(record: &MemberMetricRecord, partition: BaselinePartition) -> Option<BaselineScope> {
    match partition {
        BaselinePartition::Overall => Some(BaselineScope::Overall),
        BaselinePartition::ByYear => record.key.year.map(BaselineScope::Year),
        BaselinePartition::ByParliament => record.key.parliament.map(BaselineScope::Parliament),
    }
}

/// True when `record` belongs to the population of `scope`.
pub fn in_scope(record: &MemberMetricRecord, scope: BaselineScope) -> bool {
    scope_of(record, scope.partition()) == Some(scope)
}

/// Raw count columns averaged per scope, in `CountAverages` field order.
const COUNT_COLUMNS: [Column<MemberMetricRecord>; 8] = [
    |r| Some(r.totals.count_sittings_attended as f64),
    |r| Some(r.totals.count_sittings_spoken as f64),
    |r| Some(r.totals.count_topics as f64),
    |r| Some(r.totals.count_speeches as f64),
    |r| Some(r.totals.count_words as f64),
    |r| Some(r.totals.count_primary_questions as f64),
    |r| Some(r.totals.count_sentences as f64),
    |r| Some(r.totals.count_syllables as f64),
];

/// Baseline over one scope's records. Members who never attended are counted
/// in `excluded_count` and contribute no metric values; `count_means` holds
/// the scope's averages of `COUNT_COLUMNS`.
fn build_baseline(
    scope: BaselineScope,
    records: &[&MemberMetricRecord],
    count_means: &[f64],
) -> PopulationBaseline {
    let eligible: Vec<&MemberMetricRecord> = records
        .iter()
        .copied()
        .filter(|r| r.is_population_eligible())
        .collect();
    let excluded_count = records.len() - eligible.len();

    if eligible.is_empty() {
        tracing::warn!(
            scope = ?scope,
            excluded = excluded_count,
            "empty comparison population; baseline left undefined"
        );
        return PopulationBaseline::empty(scope, excluded_count);
    }

    let mut metrics = BTreeMap::new();
    for &metric in metric_order() {
        metrics.insert(metric, summarize(&eligible, metric));
    }

    PopulationBaseline {
        scope,
        member_count: eligible.len(),
        excluded_count,
        metrics,
        count_averages: Some(count_averages(count_means)),
        overall_readability: overall_readability(records),
    }
}

fn summarize(records: &[&MemberMetricRecord], metric: Metric) -> MetricSummary {
    let mut distribution: Vec<f64> = records
        .iter()
        .filter_map(|r| r.value(metric))
        .filter(|v| v.is_finite())
        .collect();
    distribution.sort_by(f64::total_cmp);

    let mean = if metric.excludes_zero_in_mean() {
        Some(mean_excluding_zero(distribution.iter().copied()))
    } else {
        mean_defined(distribution.iter().copied())
    };
    MetricSummary { mean, distribution }
}

fn count_averages(means: &[f64]) -> CountAverages {
    let at = |i: usize| means.get(i).copied().unwrap_or(0.0);
    CountAverages {
        count_sittings_attended: at(0),
        count_sittings_spoken: at(1),
        count_topics: at(2),
        count_speeches: at(3),
        count_words: at(4),
        count_primary_questions: at(5),
        count_sentences: at(6),
        count_syllables: at(7),
    }
}

/// Readability of everything said in the scope, from the summed counts.
fn overall_readability(records: &[&MemberMetricRecord]) -> Option<f64> {
    let mut words = 0u64;
    let mut sentences = 0u64;
    let mut syllables = 0u64;
    for r in records {
        words += r.totals.count_words;
        sentences += r.totals.count_sentences;
        syllables += r.totals.count_syllables;
    }
    flesch_reading_ease(words, sentences, syllables)
}

/// Baseline for `scope`, or an empty one when the scope has no records.
pub fn baseline_for(baselines: &[PopulationBaseline], scope: BaselineScope) -> PopulationBaseline {
    baselines
        .iter()
        .find(|b| b.scope == scope)
        .cloned()
        .unwrap_or_else(|| PopulationBaseline::empty(scope, 0))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_baseline.rs"]
mod tests;
