use crate::model::facts::JoinedFact;
use crate::model::metrics::{CountTotals, GroupField, GroupKey, MemberMetricRecord};
use crate::model::readability::flesch_reading_ease;
use crate::pipeline::PipelineError;
use crate::pipeline::stage2_aggregate::{safe_ratio, safe_ratio_opt, sum_aggregate};

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub facts: &'a [JoinedFact],
    pub fields: &'a [GroupField],
}

#[derive(Debug)]
pub struct Stage3Output {
    pub records: Vec<MemberMetricRecord>,
    /// Records whose members never attended; kept, but not part of the
    /// comparison population.
    pub zero_attendance: usize,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> Result<Stage3Output, PipelineError> {
    if !inputs.fields.contains(&GroupField::Member) {
        return Err(PipelineError::InvalidGrouping(
            "member metrics must be grouped by member".to_string(),
        ));
    }

    let groups = sum_aggregate(inputs.facts, inputs.fields);
    let mut records = Vec::with_capacity(groups.len());
    let mut zero_attendance = 0usize;
    for (key, totals) in groups {
        let record = build_record(key, totals);
        if !record.is_population_eligible() {
            zero_attendance += 1;
        }
        records.push(record);
    }

    tracing::debug!(
        records = records.len(),
        zero_attendance,
        "aggregated member metrics"
    );
    Ok(Stage3Output {
        records,
        zero_attendance,
    })
}

pub fn build_record(key: GroupKey, totals: CountTotals) -> MemberMetricRecord {
    let spoken = totals.count_sittings_spoken;
    MemberMetricRecord {
        participation_rate: safe_ratio(spoken, totals.count_sittings_attended, 100.0),
        topics_per_sitting: safe_ratio(totals.count_topics, spoken, 1.0),
        questions_per_sitting: safe_ratio(totals.count_primary_questions, spoken, 1.0),
        words_per_sitting: safe_ratio(totals.count_words, spoken, 1.0),
        readability: flesch_reading_ease(
            totals.count_words,
            totals.count_sentences,
            totals.count_syllables,
        ),
        attendance_rate: safe_ratio_opt(
            totals.count_sittings_attended,
            totals.count_sittings_total,
            100.0,
        ),
        key,
        totals,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_metrics.rs"]
mod tests;
