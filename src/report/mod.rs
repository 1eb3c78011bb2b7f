pub mod json;
pub mod text;

use crate::model::metrics::Metric;

pub const NOT_AVAILABLE: &str = "N/A";

/// Decimal places used when a metric is shown to a reader.
pub fn metric_decimals(metric: Metric) -> usize {
    match metric {
        Metric::ParticipationRate | Metric::AttendanceRate | Metric::WordsPerSitting => 1,
        Metric::TopicsPerSitting | Metric::QuestionsPerSitting | Metric::Readability => 2,
    }
}

pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_metric(metric: Metric, value: Option<f64>) -> String {
    let text = format_value(value, metric_decimals(metric));
    match metric {
        Metric::ParticipationRate | Metric::AttendanceRate if text != NOT_AVAILABLE => {
            format!("{text}%")
        }
        _ => text,
    }
}

/// Integer with comma thousands separators.
pub fn format_count(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_rank(rank: Option<usize>, population: usize) -> String {
    match rank {
        Some(r) => format!("{r} of {population}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
