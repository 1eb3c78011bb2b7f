use crate::model::baseline::BaselineScope;
use crate::model::standing::{Applicability, MemberStanding};
use crate::report::{NOT_AVAILABLE, format_count, format_metric, format_rank, format_value};

#[derive(Debug, Clone)]
pub struct CardContext<'a> {
    pub standing: &'a MemberStanding,
    /// Earliest sitting is on or before the first sitting in the data.
    pub predates_dataset: bool,
}

pub fn render_standing_text(ctx: &CardContext<'_>) -> String {
    let s = ctx.standing;
    let totals = &s.record.totals;
    let mut out = String::new();

    out.push_str(&format!("{}\n", s.member_id));
    out.push_str(&format!("{}\n", "=".repeat(s.member_id.chars().count())));
    out.push_str(&format!("Compared against: {}\n\n", scope_label(s.scope)));

    if s.not_eligible_to_ask_questions {
        out.push_str(
            "Political appointee: answers rather than asks questions, so questions per sitting is not compared.\n",
        );
    }
    if !s.in_population {
        out.push_str("No sittings attended in scope; not part of the comparison population.\n");
    }
    if ctx.predates_dataset {
        out.push_str("Tenure predates the dataset; figures cover part of it only.\n");
    }
    if s.not_eligible_to_ask_questions || !s.in_population || ctx.predates_dataset {
        out.push('\n');
    }

    out.push_str(&format!(
        "Sittings Attended: {}\n",
        format_count(totals.count_sittings_attended)
    ));
    out.push_str(&format!(
        "Sittings Spoken: {}\n",
        format_count(totals.count_sittings_spoken)
    ));
    out.push_str(&format!("Topics: {}\n", format_count(totals.count_topics)));
    out.push_str(&format!(
        "Speeches Made: {}\n",
        format_count(totals.count_speeches)
    ));
    out.push_str(&format!(
        "Qns Asked: {}\n",
        format_count(totals.count_primary_questions)
    ));
    out.push_str(&format!(
        "Words Spoken: {}\n\n",
        format_count(totals.count_words)
    ));

    for m in &s.metrics {
        let avg = match m.applicability {
            Applicability::NotEligible => NOT_AVAILABLE.to_string(),
            _ => format_metric(m.metric, m.population_mean),
        };
        out.push_str(&format!(
            "{}: {} (avg {}, percentile {}, rank {})\n",
            m.metric.label(),
            format_metric(m.metric, m.value),
            avg,
            format_value(m.percentile, 1),
            format_rank(m.rank, m.population_size)
        ));
    }

    out
}

pub fn scope_label(scope: BaselineScope) -> String {
    match scope {
        BaselineScope::Overall => "all members".to_string(),
        BaselineScope::Year(y) => format!("members in {y}"),
        BaselineScope::Parliament(p) => format!("members of parliament {p}"),
    }
}
