use serde_json::{Value, json};

use crate::model::baseline::PopulationBaseline;
use crate::model::metrics::MemberMetricRecord;
use crate::model::standing::{LeaderboardEntry, MemberStanding};
use crate::pipeline::stage6_questions::MinistryComparison;

/// Undefined values serialize as `null`.
pub fn render_standing_json(standing: &MemberStanding) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(standing)
}

pub fn render_baselines_json(baselines: &[PopulationBaseline]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(baselines)
}

/// Records plus baselines, as one document.
pub fn render_summary_json(
    records: &[MemberMetricRecord],
    baselines: &[PopulationBaseline],
) -> Result<String, serde_json::Error> {
    let doc = json!({
        "tool": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "n_records": records.len(),
        "records": records,
        "baselines": baselines,
    });
    serde_json::to_string_pretty(&doc)
}

pub fn render_leaderboard_json(entries: &[LeaderboardEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

pub fn render_ministry_json(
    member_id: &str,
    comparisons: &[MinistryComparison],
) -> Result<String, serde_json::Error> {
    let rows: Vec<Value> = comparisons
        .iter()
        .map(|c| {
            json!({
                "ministry": c.ministry,
                "member": c.member_count,
                "population_proportion": c.expected_count,
            })
        })
        .collect();
    serde_json::to_string_pretty(&json!({ "member_id": member_id, "ministries": rows }))
}
