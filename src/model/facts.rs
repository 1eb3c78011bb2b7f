use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    #[serde(default)]
    pub parliament: Option<u32>,
}

impl Period {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            parliament: None,
        }
    }

    pub fn with_parliament(year: i32, parliament: u32) -> Self {
        Self {
            year,
            parliament: Some(parliament),
        }
    }

    /// Same year, and the same term whenever both sides carry one.
    pub fn joins_with(&self, other: &Period) -> bool {
        if self.year != other.year {
            return false;
        }
        match (self.parliament, other.parliament) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechFact {
    pub member_id: String,
    pub period: Period,
    #[serde(default)]
    pub member_party: Option<String>,
    #[serde(default)]
    pub member_constituency: Option<String>,
    pub count_sittings_spoken: u64,
    pub count_topics: u64,
    pub count_speeches: u64,
    pub count_words: u64,
    pub count_sentences: u64,
    pub count_syllables: u64,
    pub count_primary_questions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceFact {
    pub member_id: String,
    pub period: Period,
    pub count_sittings_attended: u64,
    #[serde(default)]
    pub count_sittings_total: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionType {
    Appointment,
    Constituency,
}

impl PositionType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "appointment" => Some(PositionType::Appointment),
            "constituency" => Some(PositionType::Constituency),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPosition {
    pub member_id: String,
    pub position_type: PositionType,
    pub position_title: String,
    #[serde(default)]
    pub effective_from: Option<String>,
    #[serde(default)]
    pub effective_to: Option<String>,
    #[serde(default)]
    pub is_latest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTopicFact {
    pub member_id: String,
    pub ministry_addressed: String,
    pub count_primary_questions: u64,
}

/// A speech row after the attendance left join. Attendance fields are `None`
/// when no attendance row matched.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedFact {
    pub speech: SpeechFact,
    pub count_sittings_attended: Option<u64>,
    pub count_sittings_total: Option<u64>,
}
