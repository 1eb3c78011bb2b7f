use std::collections::BTreeMap;

use crate::model::facts::JoinedFact;
use crate::model::metrics::{CountTotals, GroupField, GroupKey};

/// Requested fields with duplicates removed, first occurrence wins.
pub fn normalize_fields(fields: &[GroupField]) -> Vec<GroupField> {
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        if !out.contains(field) {
            out.push(*field);
        }
    }
    out
}

pub fn group_key(fact: &JoinedFact, fields: &[GroupField]) -> GroupKey {
    let speech = &fact.speech;
    let mut key = GroupKey::default();
    for field in fields {
        match field {
            GroupField::Member => key.member_id = Some(speech.member_id.clone()),
            GroupField::Party => key.party = speech.member_party.clone(),
            GroupField::Constituency => key.constituency = speech.member_constituency.clone(),
            GroupField::Year => key.year = Some(speech.period.year),
            GroupField::Parliament => key.parliament = speech.period.parliament,
        }
    }
    key
}

/// Sum every count within each group. Missing attendance adds zero; the
/// sittings total stays defined only while every row of the group has one.
pub fn sum_aggregate(rows: &[JoinedFact], fields: &[GroupField]) -> BTreeMap<GroupKey, CountTotals> {
    let fields = normalize_fields(fields);
    let mut groups: BTreeMap<GroupKey, CountTotals> = BTreeMap::new();
    for row in rows {
        let totals = groups.entry(group_key(row, &fields)).or_default();
        let s = &row.speech;
        totals.count_sittings_total = if totals.rows == 0 {
            row.count_sittings_total
        } else {
            add_totals(totals.count_sittings_total, row.count_sittings_total)
        };
        totals.rows += 1;
        totals.count_sittings_attended += row.count_sittings_attended.unwrap_or(0);
        totals.count_sittings_spoken += s.count_sittings_spoken;
        totals.count_topics += s.count_topics;
        totals.count_speeches += s.count_speeches;
        totals.count_words += s.count_words;
        totals.count_sentences += s.count_sentences;
        totals.count_syllables += s.count_syllables;
        totals.count_primary_questions += s.count_primary_questions;
    }
    groups
}

/// Sum of two sittings totals; unknown as soon as either side is.
fn add_totals(a: Option<u64>, b: Option<u64>) -> Option<u64> {
    Some(a? + b?)
}

/// `numerator / denominator * scale`, or `None` when there is nothing to
/// divide by.
pub fn safe_ratio(numerator: u64, denominator: u64, scale: f64) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64 * scale)
}

pub fn safe_ratio_opt(numerator: u64, denominator: Option<u64>, scale: f64) -> Option<f64> {
    safe_ratio(numerator, denominator?, scale)
}

/// Mean of the strictly nonzero finite values; zero when there are none.
pub fn mean_excluding_zero<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0f64;
    let mut n = 0usize;
    for v in values {
        if v.is_finite() && v != 0.0 {
            sum += v;
            n += 1;
        }
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Plain mean of finite values; `None` for an empty input.
pub fn mean_defined<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut sum = 0f64;
    let mut n = 0usize;
    for v in values {
        if v.is_finite() {
            sum += v;
            n += 1;
        }
    }
    (n > 0).then(|| sum / n as f64)
}

pub type Column<T> = fn(&T) -> Option<f64>;

/// Mean-excluding-zero of each column within each group. Absent values are
/// skipped like zeros. Output columns follow the order of `columns`.
pub fn group_mean_excluding_zero<T, K, F>(
    items: &[T],
    key: F,
    columns: &[Column<T>],
) -> BTreeMap<K, Vec<f64>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut grouped: BTreeMap<K, Vec<Vec<f64>>> = BTreeMap::new();
    for item in items {
        let cols = grouped
            .entry(key(item))
            .or_insert_with(|| vec![Vec::new(); columns.len()]);
        for (c, column) in columns.iter().enumerate() {
            if let Some(v) = column(item) {
                cols[c].push(v);
            }
        }
    }
    grouped
        .into_iter()
        .map(|(k, cols)| {
            let means = cols.into_iter().map(mean_excluding_zero).collect();
            (k, means)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
