use crate::model::baseline::PopulationBaseline;
use crate::model::config::{MetricsConfig, PercentileKind};
use crate::model::facts::MemberPosition;
use crate::model::metrics::{CountTotals, GroupKey, MemberMetricRecord, Metric, metric_order};
use crate::model::positions::is_not_eligible_to_ask_questions;
use crate::model::standing::{Applicability, LeaderboardEntry, MemberStanding, MetricStanding};
use crate::pipeline::PipelineError;
use crate::pipeline::stage3_metrics::build_record;
use crate::pipeline::stage4_baseline::in_scope;

/// Percentile of `value` within `distribution`, 0–100.
pub fn percentile_of_score(distribution: &[f64], value: f64, kind: PercentileKind) -> Option<f64> {
    if distribution.is_empty() || !value.is_finite() {
        return None;
    }
    let mut below = 0usize;
    let mut at_or_below = 0usize;
    for &v in distribution {
        if v < value {
            below += 1;
        }
        if v <= value {
            at_or_below += 1;
        }
    }
    let n = distribution.len() as f64;
    let count = match kind {
        PercentileKind::Strict => below as f64,
        PercentileKind::Weak => at_or_below as f64,
        PercentileKind::Mean => (below + at_or_below) as f64 / 2.0,
    };
    Some(count / n * 100.0)
}

/// Descending rank with ties sharing the lowest position: one more than the
/// number of strictly greater values.
pub fn rank_descending(distribution: &[f64], value: f64) -> Option<usize> {
    if distribution.is_empty() || !value.is_finite() {
        return None;
    }
    Some(1 + distribution.iter().filter(|&&v| v > value).count())
}

pub fn rank_all_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    let mut ranks = vec![0usize; values.len()];
    for (pos, &idx) in order.iter().enumerate() {
        ranks[idx] = if pos > 0 && values[order[pos - 1]] == values[idx] {
            ranks[order[pos - 1]]
        } else {
            pos + 1
        };
    }
    ranks
}

#[derive(Debug, Clone)]
pub struct Stage5Inputs<'a> {
    pub member_id: &'a str,
    pub records: &'a [MemberMetricRecord],
    pub baseline: &'a PopulationBaseline,
    pub positions: &'a [MemberPosition],
    pub config: &'a MetricsConfig,
}

pub fn run_stage5(inputs: &Stage5Inputs<'_>) -> Result<MemberStanding, PipelineError> {
    let scope = inputs.baseline.scope;
    let scoped = inputs.records.iter().filter(|r| in_scope(r, scope));
    let record = member_record(inputs.member_id, scoped)
        .ok_or_else(|| PipelineError::UnknownMember(inputs.member_id.to_string()))?;
    let not_eligible = is_not_eligible_to_ask_questions(
        inputs.member_id,
        inputs.positions,
        &inputs.config.appointee_exemption_keywords,
    );

    let mut metrics = Vec::with_capacity(metric_order().len());
    for &metric in metric_order() {
        metrics.push(metric_standing(
            metric,
            record.value(metric),
            inputs.baseline,
            inputs.config.percentile_kind,
            metric == Metric::QuestionsPerSitting && not_eligible,
        ));
    }

    if not_eligible {
        tracing::debug!(
            member = inputs.member_id,
            "political appointee; questions per sitting not compared"
        );
    }

    Ok(MemberStanding {
        member_id: inputs.member_id.to_string(),
        scope,
        in_population: record.is_population_eligible(),
        not_eligible_to_ask_questions: not_eligible,
        record,
        metrics,
    })
}

/// The member's record; several per-period records are summed back into one.
pub fn member_record<'a, I>(member_id: &str, records: I) -> Option<MemberMetricRecord>
where
    I: IntoIterator<Item = &'a MemberMetricRecord>,
{
    let mut matching = records
        .into_iter()
        .filter(|r| r.member_id() == Some(member_id))
        .peekable();
    let first = matching.next()?;
    if matching.peek().is_none() {
        return Some(first.clone());
    }
    let mut totals: CountTotals = first.totals;
    for r in matching {
        totals.merge(&r.totals);
    }
    let key = GroupKey {
        member_id: Some(member_id.to_string()),
        ..GroupKey::default()
    };
    Some(build_record(key, totals))
}

fn metric_standing(
    metric: Metric,
    value: Option<f64>,
    baseline: &PopulationBaseline,
    kind: PercentileKind,
    not_eligible: bool,
) -> MetricStanding {
    let distribution = baseline.distribution(metric);
    let mut standing = MetricStanding {
        metric,
        value,
        percentile: None,
        rank: None,
        population_size: distribution.len(),
        population_mean: baseline.mean(metric),
        applicability: Applicability::Applicable,
    };
    if not_eligible {
        standing.population_mean = None;
        standing.applicability = Applicability::NotEligible;
        return standing;
    }
    match value {
        Some(v) => {
            standing.percentile = percentile_of_score(distribution, v, kind);
            standing.rank = rank_descending(distribution, v);
        }
        None => standing.applicability = Applicability::Undefined,
    }
    standing
}

/// Eligible members with a defined value, best first; ties share a rank and
/// are listed by member id.
pub fn leaderboard(
    records: &[MemberMetricRecord],
    metric: Metric,
    kind: PercentileKind,
) -> Vec<LeaderboardEntry> {
    let rows: Vec<(&str, f64)> = records
        .iter()
        .filter(|r| r.is_population_eligible())
        .filter_map(|r| Some((r.member_id()?, r.value(metric)?)))
        .filter(|(_, v)| v.is_finite())
        .collect();
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    let ranks = rank_all_descending(&values);

    let mut out: Vec<LeaderboardEntry> = rows
        .iter()
        .zip(ranks)
        .map(|(&(member, value), rank)| LeaderboardEntry {
            rank,
            member_id: member.to_string(),
            value,
            percentile: percentile_of_score(&values, value, kind).unwrap_or(0.0),
        })
        .collect();
    out.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.member_id.cmp(&b.member_id)));
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_standing.rs"]
mod tests;
