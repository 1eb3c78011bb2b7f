use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub mod facts;
pub mod table;

use facts::{
    parse_attendance_facts, parse_member_positions, parse_question_topics, parse_speech_facts,
};
use table::open_maybe_gz;

use crate::model::facts::{AttendanceFact, MemberPosition, QuestionTopicFact, SpeechFact};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("{table}: missing required column {column:?}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("{table}: parse error at line {line}: {message}")]
    Parse {
        table: &'static str,
        line: usize,
        message: String,
    },

    #[error("invalid json records: {0}")]
    Json(#[from] serde_json::Error),
}

/// All fact tables for one computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactSet {
    pub speeches: Vec<SpeechFact>,
    pub attendance: Vec<AttendanceFact>,
    pub positions: Vec<MemberPosition>,
    pub question_topics: Vec<QuestionTopicFact>,
}

impl FactSet {
    /// Discover `speeches`, `attendance`, and the optional `positions` and
    /// `question_topics` exports (`.tsv` or `.tsv.gz`) in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, InputError> {
        let speeches_path = find_table_path(dir, "speeches")?
            .ok_or_else(|| InputError::MissingInput(format!("speeches.tsv in {}", dir.display())))?;
        let attendance_path = find_table_path(dir, "attendance")?.ok_or_else(|| {
            InputError::MissingInput(format!("attendance.tsv in {}", dir.display()))
        })?;
        let positions_path = find_table_path(dir, "positions")?;
        let topics_path = find_table_path(dir, "question_topics")?;

        tracing::info!(
            speeches = %speeches_path.display(),
            attendance = %attendance_path.display(),
            "discovered fact tables"
        );

        let speeches = parse_speech_facts(open_maybe_gz(&speeches_path)?)?;
        let attendance = parse_attendance_facts(open_maybe_gz(&attendance_path)?)?;
        let positions = match positions_path {
            Some(path) => parse_member_positions(open_maybe_gz(&path)?)?,
            None => {
                tracing::warn!(
                    "no positions table found; every member is treated as eligible to ask questions"
                );
                Vec::new()
            }
        };
        let question_topics = match topics_path {
            Some(path) => parse_question_topics(open_maybe_gz(&path)?)?,
            None => Vec::new(),
        };

        Ok(FactSet {
            speeches,
            attendance,
            positions,
            question_topics,
        })
    }
}

fn find_table_path(dir: &Path, stem: &str) -> Result<Option<PathBuf>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "fact directory {} does not exist",
            dir.display()
        )));
    }
    for ext in ["tsv", "tsv.gz"] {
        let candidate = dir.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// A JSON array of records, e.g. `[{"member_id": ..., "period": {...}, ...}]`.
/// A record missing a required field fails with serde's message naming it.
pub fn parse_json_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, InputError> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
