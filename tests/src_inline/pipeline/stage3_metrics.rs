use super::*;
use crate::pipeline::fixtures::{joined, speech};

fn member_records(facts: &[JoinedFact]) -> Stage3Output {
    run_stage3(&Stage3Inputs {
        facts,
        fields: &[GroupField::Member],
    })
    .unwrap()
}

#[test]
fn test_ratio_formulae() {
    let facts = vec![joined(speech("Tan", 2021, 4), Some(16))];
    let out = member_records(&facts);
    let r = &out.records[0];
    assert_eq!(r.member_id(), Some("Tan"));
    assert!((r.participation_rate.unwrap() - 25.0).abs() < 1e-12);
    assert!((r.topics_per_sitting.unwrap() - 2.0).abs() < 1e-12);
    assert!((r.questions_per_sitting.unwrap() - 1.0).abs() < 1e-12);
    assert!((r.words_per_sitting.unwrap() - 1000.0).abs() < 1e-12);
    let expected = 206.835 - 1.015 * (4000.0 / 200.0) - 84.6 * (5600.0 / 4000.0);
    assert!((r.readability.unwrap() - expected).abs() < 1e-9);
    assert_eq!(r.attendance_rate, None);
    assert_eq!(out.zero_attendance, 0);
}

#[test]
fn test_zero_denominators_are_undefined() {
    let facts = vec![joined(speech("Lim", 2021, 0), Some(0))];
    let out = member_records(&facts);
    let r = &out.records[0];
    assert_eq!(r.participation_rate, None);
    assert_eq!(r.topics_per_sitting, None);
    assert_eq!(r.questions_per_sitting, None);
    assert_eq!(r.words_per_sitting, None);
    assert_eq!(r.readability, None);
    assert!(!r.is_population_eligible());
    assert_eq!(out.zero_attendance, 1);
}

#[test]
fn test_missing_attendance_counts_as_zero() {
    let facts = vec![joined(speech("Ng", 2021, 3), None)];
    let out = member_records(&facts);
    let r = &out.records[0];
    assert_eq!(r.totals.count_sittings_attended, 0);
    assert_eq!(r.participation_rate, None);
    // speech ratios stay defined
    assert!(r.topics_per_sitting.is_some());
}

#[test]
fn test_attendance_rate_uses_total() {
    let mut fact = joined(speech("Tan", 2021, 4), Some(18));
    fact.count_sittings_total = Some(20);
    let out = member_records(&[fact]);
    assert!((out.records[0].attendance_rate.unwrap() - 90.0).abs() < 1e-12);
}

#[test]
fn test_ratios_computed_after_summing() {
    let facts = vec![
        joined(speech("Tan", 2020, 1), Some(10)),
        joined(speech("Tan", 2021, 3), Some(10)),
    ];
    let out = member_records(&facts);
    assert_eq!(out.records.len(), 1);
    assert!((out.records[0].participation_rate.unwrap() - 20.0).abs() < 1e-12);
}

#[test]
fn test_grouping_requires_member() {
    let facts = vec![joined(speech("Tan", 2021, 4), Some(16))];
    let err = run_stage3(&Stage3Inputs {
        facts: &facts,
        fields: &[GroupField::Year],
    })
    .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidGrouping(_)));
}

#[test]
fn test_records_ordered_by_key() {
    let facts = vec![
        joined(speech("Zed", 2021, 1), Some(2)),
        joined(speech("Ang", 2021, 1), Some(2)),
    ];
    let out = member_records(&facts);
    let ids: Vec<_> = out.records.iter().map(|r| r.member_id().unwrap()).collect();
    assert_eq!(ids, vec!["Ang", "Zed"]);
}

#[test]
fn test_attendance_rate_undefined_with_partial_totals() {
    let mut known = joined(speech("Tan", 2020, 4), Some(18));
    known.count_sittings_total = Some(20);
    let unknown = joined(speech("Tan", 2021, 4), Some(18));
    let out = member_records(&[known, unknown]);
    assert_eq!(out.records[0].totals.count_sittings_attended, 36);
    assert_eq!(out.records[0].attendance_rate, None);
}
