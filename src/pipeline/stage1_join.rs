use std::collections::{BTreeMap, BTreeSet};

use crate::model::config::{MetricsConfig, ScopeSelection};
use crate::model::facts::{AttendanceFact, JoinedFact, SpeechFact};

#[derive(Debug, Clone)]
pub struct Stage1Inputs<'a> {
    pub speeches: &'a [SpeechFact],
    pub attendance: &'a [AttendanceFact],
    pub config: &'a MetricsConfig,
    pub scope: &'a ScopeSelection,
}

#[derive(Debug, Default)]
pub struct Stage1Output {
    pub facts: Vec<JoinedFact>,
    pub dropped_presiding: usize,
    pub dropped_out_of_scope: usize,
    pub unmatched_attendance: usize,
    /// Matches skipped because the attendance row was already counted
    /// against an earlier speech row.
    pub shared_attendance: usize,
}

/// Left join of speech rows onto attendance rows by member and period.
/// Each attendance row is counted at most once, against the first speech row
/// (in input order) it joins with.
pub fn run_stage1(inputs: &Stage1Inputs<'_>) -> Stage1Output {
    let attendance_by_member = index_attendance(inputs.attendance);
    let patterns: Vec<String> = inputs
        .config
        .presiding_officer_patterns
        .iter()
        .map(|p| p.trim().to_lowercase())
        .collect();

    let mut out = Stage1Output::default();
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    for speech in inputs.speeches {
        if is_presiding_officer(&speech.member_id, &patterns) {
            out.dropped_presiding += 1;
            continue;
        }
        if !inputs.scope.contains(&speech.period) {
            out.dropped_out_of_scope += 1;
            continue;
        }

        let mut attended: Option<u64> = None;
        let mut total: Option<u64> = None;
        let mut matches = 0usize;
        if let Some(rows) = attendance_by_member.get(speech.member_id.as_str()) {
            for &(idx, row) in rows
                .iter()
                .filter(|(_, a)| speech.period.joins_with(&a.period))
            {
                if !claimed.insert(idx) {
                    out.shared_attendance += 1;
                    tracing::warn!(
                        member = %speech.member_id,
                        year = speech.period.year,
                        parliament = ?speech.period.parliament,
                        attendance_parliament = ?row.period.parliament,
                        "attendance row spans several speech periods; counted against the first only"
                    );
                    continue;
                }
                matches += 1;
                attended = Some(attended.unwrap_or(0) + row.count_sittings_attended);
                if let Some(t) = row.count_sittings_total {
                    total = Some(total.map_or(t, |prev: u64| prev.max(t)));
                }
            }
        }
        if matches > 1 {
            tracing::warn!(
                member = %speech.member_id,
                year = speech.period.year,
                matches,
                "duplicate attendance rows for one speech period; summing attended counts"
            );
        }
        if matches == 0 {
            out.unmatched_attendance += 1;
        }

        out.facts.push(JoinedFact {
            speech: speech.clone(),
            count_sittings_attended: attended,
            count_sittings_total: total,
        });
    }

    if out.dropped_presiding > 0 {
        tracing::debug!(
            rows = out.dropped_presiding,
            "dropped presiding-officer speech rows"
        );
    }
    tracing::debug!(
        joined = out.facts.len(),
        out_of_scope = out.dropped_out_of_scope,
        unmatched_attendance = out.unmatched_attendance,
        shared_attendance = out.shared_attendance,
        "joined speech and attendance facts"
    );
    out
}

fn index_attendance(attendance: &[AttendanceFact]) -> BTreeMap<&str, Vec<(usize, &AttendanceFact)>> {
    let mut map: BTreeMap<&str, Vec<(usize, &AttendanceFact)>> = BTreeMap::new();
    for (idx, row) in attendance.iter().enumerate() {
        map.entry(row.member_id.as_str()).or_default().push((idx, row));
    }
    map
}

fn is_presiding_officer(member_id: &str, patterns: &[String]) -> bool {
    let lower = member_id.to_lowercase();
    patterns.iter().any(|p| lower.contains(p.as_str()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_join.rs"]
mod tests;
