use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Member,
    Party,
    Constituency,
    Year,
    Parliament,
}

/// Grouping tuple. Only the requested fields are populated, so two rows share
/// a key exactly when they agree on every requested field.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub member_id: Option<String>,
    pub party: Option<String>,
    pub constituency: Option<String>,
    pub year: Option<i32>,
    pub parliament: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTotals {
    pub rows: u64,
    pub count_sittings_attended: u64,
    pub count_sittings_total: Option<u64>,
    pub count_sittings_spoken: u64,
    pub count_topics: u64,
    pub count_speeches: u64,
    pub count_words: u64,
    pub count_sentences: u64,
    pub count_syllables: u64,
    pub count_primary_questions: u64,
}

impl CountTotals {
    /// Add `other` into `self`. The sittings total is kept only when both
    /// sides know theirs, so attendance never exceeds the sittings held.
    pub fn merge(&mut self, other: &CountTotals) {
        if self.rows == 0 {
            *self = *other;
            return;
        }
        self.count_sittings_total = match (self.count_sittings_total, other.count_sittings_total) {
            (Some(a), Some(b)) => Some(a + b),
            _ => None,
        };
        self.rows += other.rows;
        self.count_sittings_attended += other.count_sittings_attended;
        self.count_sittings_spoken += other.count_sittings_spoken;
        self.count_topics += other.count_topics;
        self.count_speeches += other.count_speeches;
        self.count_words += other.count_words;
        self.count_sentences += other.count_sentences;
        self.count_syllables += other.count_syllables;
        self.count_primary_questions += other.count_primary_questions;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ParticipationRate,
    TopicsPerSitting,
    QuestionsPerSitting,
    WordsPerSitting,
    Readability,
    AttendanceRate,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::ParticipationRate => "participation_rate",
            Metric::TopicsPerSitting => "topics_per_sitting",
            Metric::QuestionsPerSitting => "questions_per_sitting",
            Metric::WordsPerSitting => "words_per_sitting",
            Metric::Readability => "readability",
            Metric::AttendanceRate => "attendance_rate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::ParticipationRate => "Participation (%)",
            Metric::TopicsPerSitting => "Topics/Sitting",
            Metric::QuestionsPerSitting => "Qns/Sitting",
            Metric::WordsPerSitting => "Words/Sitting",
            Metric::Readability => "Readability",
            Metric::AttendanceRate => "Attendance (%)",
        }
    }

    /// Ratio metrics average over nonzero values only; readability is a score,
    /// where zero and negative values are legitimate.
    pub fn excludes_zero_in_mean(self) -> bool {
        !matches!(self, Metric::Readability)
    }
}

pub fn metric_order() -> &'static [Metric] {
    &[
        Metric::ParticipationRate,
        Metric::TopicsPerSitting,
        Metric::QuestionsPerSitting,
        Metric::WordsPerSitting,
        Metric::Readability,
        Metric::AttendanceRate,
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberMetricRecord {
    pub key: GroupKey,
    pub totals: CountTotals,
    pub participation_rate: Option<f64>,
    pub topics_per_sitting: Option<f64>,
    pub questions_per_sitting: Option<f64>,
    pub words_per_sitting: Option<f64>,
    pub readability: Option<f64>,
    pub attendance_rate: Option<f64>,
}

impl MemberMetricRecord {
    pub fn member_id(&self) -> Option<&str> {
        self.key.member_id.as_deref()
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::ParticipationRate => self.participation_rate,
            Metric::TopicsPerSitting => self.topics_per_sitting,
            Metric::QuestionsPerSitting => self.questions_per_sitting,
            Metric::WordsPerSitting => self.words_per_sitting,
            Metric::Readability => self.readability,
            Metric::AttendanceRate => self.attendance_rate,
        }
    }

    /// Members who never attended a sitting carry no defined participation and
    /// stay out of population aggregates.
    pub fn is_population_eligible(&self) -> bool {
        self.totals.count_sittings_attended > 0
    }
}
