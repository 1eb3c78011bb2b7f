use crate::model::facts::{
    AttendanceFact, JoinedFact, MemberPosition, Period, PositionType, QuestionTopicFact,
    SpeechFact,
};

pub fn speech(member: &str, year: i32, spoken: u64) -> SpeechFact {
    SpeechFact {
        member_id: member.to_string(),
        period: Period::year(year),
        member_party: None,
        member_constituency: None,
        count_sittings_spoken: spoken,
        count_topics: spoken * 2,
        count_speeches: spoken * 3,
        count_words: spoken * 1000,
        count_sentences: spoken * 50,
        count_syllables: spoken * 1400,
        count_primary_questions: spoken,
    }
}

pub fn speech_in(member: &str, year: i32, parliament: u32, spoken: u64) -> SpeechFact {
    let mut s = speech(member, year, spoken);
    s.period = Period::with_parliament(year, parliament);
    s
}

pub fn attendance(member: &str, year: i32, attended: u64) -> AttendanceFact {
    AttendanceFact {
        member_id: member.to_string(),
        period: Period::year(year),
        count_sittings_attended: attended,
        count_sittings_total: None,
    }
}

pub fn joined(speech: SpeechFact, attended: Option<u64>) -> JoinedFact {
    JoinedFact {
        speech,
        count_sittings_attended: attended,
        count_sittings_total: None,
    }
}

pub fn appointment(member: &str, title: &str) -> MemberPosition {
    MemberPosition {
        member_id: member.to_string(),
        position_type: PositionType::Appointment,
        position_title: title.to_string(),
        effective_from: None,
        effective_to: None,
        is_latest: true,
    }
}

pub fn question_topic(member: &str, ministry: &str, count: u64) -> QuestionTopicFact {
    QuestionTopicFact {
        member_id: member.to_string(),
        ministry_addressed: ministry.to_string(),
        count_primary_questions: count,
    }
}
