use std::io::BufRead;

use crate::input::InputError;
use crate::input::table::{Row, read_table};
use crate::model::facts::{
    AttendanceFact, MemberPosition, Period, PositionType, QuestionTopicFact, SpeechFact,
};

const MEMBER: &[&str] = &["member_name", "member_id", "member"];
const YEAR: &[&str] = &["year"];
const PARLIAMENT: &[&str] = &["parliament"];

pub fn parse_speech_facts<R: BufRead>(reader: R) -> Result<Vec<SpeechFact>, InputError> {
    let table = read_table("speeches", reader)?;
    let member = table.require(MEMBER)?;
    let year = table.require(YEAR)?;
    let spoken = table.require(&["count_sittings_spoken"])?;
    let topics = table.require(&["count_topics"])?;
    let speeches = table.require(&["count_speeches"])?;
    let words = table.require(&["count_words"])?;
    let sentences = table.require(&["count_sentences"])?;
    let syllables = table.require(&["count_syllables"])?;
    let questions = table.require(&["count_pri_questions", "count_primary_questions"])?;
    let parliament = table.optional(PARLIAMENT);
    let party = table.optional(&["member_party", "party"]);
    let constituency = table.optional(&["member_constituency", "constituency"]);

    let mut out = Vec::with_capacity(table.rows.len());
    for row in table.iter_rows() {
        let Some(member_id) = member_id(&row, member) else {
            continue;
        };
        out.push(SpeechFact {
            member_id,
            period: period(&row, year, parliament)?,
            member_party: row.opt_text(party),
            member_constituency: row.opt_text(constituency),
            count_sittings_spoken: row.count(spoken)?,
            count_topics: row.count(topics)?,
            count_speeches: row.count(speeches)?,
            count_words: row.count(words)?,
            count_sentences: row.count(sentences)?,
            count_syllables: row.count(syllables)?,
            count_primary_questions: row.count(questions)?,
        });
    }
    tracing::debug!(rows = out.len(), "loaded speech facts");
    Ok(out)
}

pub fn parse_attendance_facts<R: BufRead>(reader: R) -> Result<Vec<AttendanceFact>, InputError> {
    let table = read_table("attendance", reader)?;
    let member = table.require(MEMBER)?;
    let year = table.require(YEAR)?;
    let attended = table.require(&["count_sittings_attended"])?;
    let parliament = table.optional(PARLIAMENT);
    let total = table.optional(&["count_sittings_total"]);

    let mut out = Vec::with_capacity(table.rows.len());
    for row in table.iter_rows() {
        let Some(member_id) = member_id(&row, member) else {
            continue;
        };
        out.push(AttendanceFact {
            member_id,
            period: period(&row, year, parliament)?,
            count_sittings_attended: row.count(attended)?,
            count_sittings_total: row.opt_count(total)?,
        });
    }
    tracing::debug!(rows = out.len(), "loaded attendance facts");
    Ok(out)
}

pub fn parse_member_positions<R: BufRead>(reader: R) -> Result<Vec<MemberPosition>, InputError> {
    let table = read_table("positions", reader)?;
    let member = table.require(MEMBER)?;
    let kind = table.require(&["type", "position_type"])?;
    let title = table.require(&["member_position", "position_title"])?;
    let from = table.optional(&["effective_from_date", "effective_from"]);
    let to = table.optional(&["effective_to_date", "effective_to"]);
    let latest = table.optional(&["is_latest_position", "is_latest"]);

    let mut out = Vec::with_capacity(table.rows.len());
    for row in table.iter_rows() {
        let Some(member_id) = member_id(&row, member) else {
            continue;
        };
        let Some(position_type) = PositionType::parse(row.text(kind)) else {
            return Err(InputError::Parse {
                table: row.table,
                line: row.line,
                message: format!(
                    "unknown position type {:?} (use appointment|constituency)",
                    row.text(kind)
                ),
            });
        };
        out.push(MemberPosition {
            member_id,
            position_type,
            position_title: row.text(title).to_string(),
            effective_from: row.opt_text(from),
            effective_to: row.opt_text(to),
            is_latest: row.flag(latest)?,
        });
    }
    tracing::debug!(rows = out.len(), "loaded member positions");
    Ok(out)
}

pub fn parse_question_topics<R: BufRead>(reader: R) -> Result<Vec<QuestionTopicFact>, InputError> {
    let table = read_table("question_topics", reader)?;
    let member = table.require(MEMBER)?;
    let ministry = table.require(&["ministry_addressed", "ministry"])?;
    let questions = table.require(&["count_pri_questions", "count_primary_questions"])?;

    let mut out = Vec::with_capacity(table.rows.len());
    for row in table.iter_rows() {
        let Some(member_id) = member_id(&row, member) else {
            continue;
        };
        out.push(QuestionTopicFact {
            member_id,
            ministry_addressed: row.text(ministry).to_string(),
            count_primary_questions: row.count(questions)?,
        });
    }
    Ok(out)
}

fn member_id(row: &Row<'_>, idx: usize) -> Option<String> {
    let value = row.opt_text(Some(idx));
    if value.is_none() {
        tracing::warn!(
            table = row.table,
            line = row.line,
            "row has empty member identifier; skipping"
        );
    }
    value
}

fn period(row: &Row<'_>, year: usize, parliament: Option<usize>) -> Result<Period, InputError> {
    let parliament = match row.opt_int(parliament)? {
        Some(p) if p < 0 => {
            return Err(InputError::Parse {
                table: row.table,
                line: row.line,
                message: format!("negative parliament number {p}"),
            });
        }
        other => other.map(|p| p as u32),
    };
    Ok(Period {
        year: row.int(year)?,
        parliament,
    })
}
