use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::facts::QuestionTopicFact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinistryShare {
    pub ministry: String,
    pub count_primary_questions: u64,
    /// Fraction of all questions, 0–1.
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinistryComparison {
    pub ministry: String,
    pub member_count: u64,
    /// Population share of this ministry scaled to the member's total.
    pub expected_count: Option<f64>,
}

fn totals_by_ministry<'a, I>(facts: I) -> BTreeMap<&'a str, u64>
where
    I: IntoIterator<Item = &'a QuestionTopicFact>,
{
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for fact in facts {
        *totals.entry(fact.ministry_addressed.as_str()).or_default() +=
            fact.count_primary_questions;
    }
    totals
}

/// Questions per ministry, ordered by ministry name.
pub fn ministry_breakdown(facts: &[QuestionTopicFact]) -> Vec<MinistryShare> {
    let totals = totals_by_ministry(facts);
    let all: u64 = totals.values().sum();
    totals
        .into_iter()
        .map(|(ministry, count)| MinistryShare {
            ministry: ministry.to_string(),
            count_primary_questions: count,
            share: (all > 0).then(|| count as f64 / all as f64),
        })
        .collect()
}

/// Each ministry the population asked about, with the member's own count next
/// to what the member would have asked had they followed the population mix.
pub fn member_vs_population(member_id: &str, facts: &[QuestionTopicFact]) -> Vec<MinistryComparison> {
    let own = totals_by_ministry(facts.iter().filter(|f| f.member_id == member_id));
    let member_total: u64 = own.values().sum();
    let comparisons: Vec<MinistryComparison> = ministry_breakdown(facts)
        .into_iter()
        .map(|share| MinistryComparison {
            member_count: own.get(share.ministry.as_str()).copied().unwrap_or(0),
            expected_count: share.share.map(|s| s * member_total as f64),
            ministry: share.ministry,
        })
        .collect();
    tracing::debug!(
        member = member_id,
        ministries = comparisons.len(),
        member_total,
        "compared member questions against population"
    );
    comparisons
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_questions.rs"]
mod tests;
