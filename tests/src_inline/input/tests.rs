use super::*;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::model::facts::{Period, PositionType};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("member_metrics_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const SPEECHES: &str = "member_name\tyear\tparliament\tmember_party\tcount_sittings_spoken\tcount_topics\tcount_speeches\tcount_words\tcount_sentences\tcount_syllables\tcount_pri_questions\n\
Tan\t2021\t14\tPAP\t10\t12\t30\t5000\t250\t7000\t4\n\
Lim\t2021\t14\t\t0\t0\t0\t\t0\t0\t0\n";

const ATTENDANCE: &str = "member_name\tyear\tcount_sittings_attended\tcount_sittings_total\n\
Tan\t2021\t20\t22\n\
Lim\t2021\t0\t22\n";

#[test]
fn test_parse_speech_facts() {
    let facts = parse_speech_facts(Cursor::new(SPEECHES)).unwrap();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].member_id, "Tan");
    assert_eq!(facts[0].period, Period::with_parliament(2021, 14));
    assert_eq!(facts[0].member_party.as_deref(), Some("PAP"));
    assert_eq!(facts[0].count_words, 5000);
    assert_eq!(facts[0].count_primary_questions, 4);
    assert_eq!(facts[1].member_party, None);
    // null cell loads as zero
    assert_eq!(facts[1].count_words, 0);
}

#[test]
fn test_missing_column_names_field() {
    let text = "member_name\tyear\tcount_sittings_spoken\tcount_topics\tcount_speeches\tcount_sentences\tcount_syllables\tcount_pri_questions\n";
    let err = parse_speech_facts(Cursor::new(text)).unwrap_err();
    match err {
        InputError::MissingColumn { table, column } => {
            assert_eq!(table, "speeches");
            assert_eq!(column, "count_words");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_header_is_case_insensitive_and_accepts_aliases() {
    let text = "Member_ID\tYEAR\tCount_Sittings_Attended\n Ng \t2019.0\t7\n";
    let facts = parse_attendance_facts(Cursor::new(text)).unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].member_id, "Ng");
    assert_eq!(facts[0].period, Period::year(2019));
    assert_eq!(facts[0].count_sittings_total, None);
}

#[test]
fn test_bad_count_reports_line() {
    let text = "member_name\tyear\tcount_sittings_attended\nTan\t2021\t20\nLim\t2021\tmany\n";
    let err = parse_attendance_facts(Cursor::new(text)).unwrap_err();
    match err {
        InputError::Parse { table, line, message } => {
            assert_eq!(table, "attendance");
            assert_eq!(line, 3);
            assert!(message.contains("count_sittings_attended"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_negative_count_rejected() {
    let text = "member_name\tyear\tcount_sittings_attended\nTan\t2021\t-3\n";
    assert!(parse_attendance_facts(Cursor::new(text)).is_err());
}

#[test]
fn test_empty_member_row_skipped() {
    let text = "member_name\tyear\tcount_sittings_attended\n\t2021\t3\nTan\t2021\t4\n\n";
    let facts = parse_attendance_facts(Cursor::new(text)).unwrap();
    assert_eq!(facts.len(), 1);
}

#[test]
fn test_empty_file_is_parse_error() {
    assert!(matches!(
        parse_attendance_facts(Cursor::new("")),
        Err(InputError::Parse { line: 1, .. })
    ));
}

#[test]
fn test_parse_positions() {
    let text = "member_name\ttype\tmember_position\teffective_from_date\teffective_to_date\tis_latest_position\n\
Tan\tappointment\tMinister for Health\t2020-07-27\t\ttrue\n\
Tan\tconstituency\tBishan-Toa Payoh\t2015-09-11\t2020-07-10\tfalse\n";
    let positions = parse_member_positions(Cursor::new(text)).unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].position_type, PositionType::Appointment);
    assert!(positions[0].is_latest);
    assert_eq!(positions[0].effective_to, None);
    assert_eq!(positions[1].effective_to.as_deref(), Some("2020-07-10"));
}

#[test]
fn test_unknown_position_type_rejected() {
    let text = "member_name\ttype\tmember_position\nTan\tcommittee\tChair\n";
    assert!(matches!(
        parse_member_positions(Cursor::new(text)),
        Err(InputError::Parse { .. })
    ));
}

#[test]
fn test_json_records_missing_field() {
    let json = r#"[{"member_id":"Tan","period":{"year":2021}}]"#;
    let err = parse_json_records::<AttendanceFact, _>(json.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("count_sittings_attended"));
}

#[test]
fn test_json_records_roundtrip_defaults() {
    let json = r#"[{"member_id":"Tan","period":{"year":2021},"count_sittings_attended":5}]"#;
    let facts = parse_json_records::<AttendanceFact, _>(json.as_bytes()).unwrap();
    assert_eq!(facts[0].period.parliament, None);
    assert_eq!(facts[0].count_sittings_total, None);
}

#[test]
fn test_load_dir_with_gz_and_optional_tables() {
    let dir = make_temp_dir();
    write_gz(&dir.join("speeches.tsv.gz"), SPEECHES);
    write_file(&dir.join("attendance.tsv"), ATTENDANCE);

    let facts = FactSet::load_dir(&dir).unwrap();
    assert_eq!(facts.speeches.len(), 2);
    assert_eq!(facts.attendance.len(), 2);
    assert_eq!(facts.attendance[0].count_sittings_total, Some(22));
    assert!(facts.positions.is_empty());
    assert!(facts.question_topics.is_empty());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_dir_requires_attendance() {
    let dir = make_temp_dir();
    write_file(&dir.join("speeches.tsv"), SPEECHES);
    assert!(matches!(
        FactSet::load_dir(&dir),
        Err(InputError::MissingInput(_))
    ));
    fs::remove_dir_all(&dir).ok();
}
