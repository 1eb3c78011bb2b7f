use crate::model::facts::{MemberPosition, PositionType};

/// A political appointee answers rather than asks questions. Holders of a
/// position whose title matches an exemption keyword (mayors, by default)
/// keep asking them, whatever else they hold.
pub fn is_not_eligible_to_ask_questions(
    member_id: &str,
    positions: &[MemberPosition],
    exemption_keywords: &[String],
) -> bool {
    let mut is_appointee = false;
    let mut is_exempt = false;
    for position in positions.iter().filter(|p| p.member_id == member_id) {
        if position.position_type == PositionType::Appointment {
            is_appointee = true;
        }
        if title_matches(&position.position_title, exemption_keywords) {
            is_exempt = true;
        }
    }
    is_appointee && !is_exempt
}

fn title_matches(title: &str, keywords: &[String]) -> bool {
    let lower = title.to_lowercase();
    keywords
        .iter()
        .any(|k| lower.contains(k.trim().to_lowercase().as_str()))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPartition {
    /// Members holding a current appointment, with their current titles.
    pub appointment_holders: Vec<(String, Vec<String>)>,
    pub others: Vec<String>,
}

/// Split members on whether they hold a current (latest) appointment.
/// Input order is preserved on both sides.
pub fn partition_by_appointment(
    members: &[String],
    positions: &[MemberPosition],
) -> AppointmentPartition {
    let mut out = AppointmentPartition::default();
    for member in members {
        let titles: Vec<String> = positions
            .iter()
            .filter(|p| {
                p.member_id == *member
                    && p.position_type == PositionType::Appointment
                    && p.is_latest
            })
            .map(|p| p.position_title.clone())
            .collect();
        if titles.is_empty() {
            out.others.push(member.clone());
        } else {
            out.appointment_holders.push((member.clone(), titles));
        }
    }
    out
}

/// Earliest and latest effective dates of a member's positions matching
/// `title`, e.g. a constituency a former member used to represent.
pub fn tenure_for_title(
    member_id: &str,
    title: &str,
    positions: &[MemberPosition],
) -> Option<(Option<String>, Option<String>)> {
    let mut found = false;
    let mut earliest: Option<String> = None;
    let mut latest: Option<String> = None;
    for p in positions
        .iter()
        .filter(|p| p.member_id == member_id && p.position_title == title)
    {
        found = true;
        if let Some(from) = &p.effective_from {
            if earliest.as_ref().is_none_or(|e| from < e) {
                earliest = Some(from.clone());
            }
        }
        if let Some(to) = &p.effective_to {
            if latest.as_ref().is_none_or(|l| to > l) {
                latest = Some(to.clone());
            }
        }
    }
    found.then_some((earliest, latest))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/positions.rs"]
mod tests;
