use super::*;
use crate::pipeline::fixtures::question_topic;

fn facts() -> Vec<QuestionTopicFact> {
    vec![
        question_topic("Tan", "Ministry of Health", 6),
        question_topic("Tan", "Ministry of Education", 2),
        question_topic("Lim", "Ministry of Health", 4),
        question_topic("Lim", "Ministry of Transport", 8),
        question_topic("Tan", "Ministry of Health", 0),
    ]
}

#[test]
fn test_breakdown_shares() {
    let out = ministry_breakdown(&facts());
    let names: Vec<&str> = out.iter().map(|s| s.ministry.as_str()).collect();
    assert_eq!(
        names,
        vec!["Ministry of Education", "Ministry of Health", "Ministry of Transport"]
    );
    assert_eq!(out[1].count_primary_questions, 10);
    assert!((out[1].share.unwrap() - 0.5).abs() < 1e-12);
    let total: f64 = out.iter().filter_map(|s| s.share).sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn test_breakdown_without_questions() {
    let out = ministry_breakdown(&[question_topic("Tan", "Ministry of Health", 0)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].share, None);
    assert!(ministry_breakdown(&[]).is_empty());
}

#[test]
fn test_member_vs_population() {
    let out = member_vs_population("Tan", &facts());
    assert_eq!(out.len(), 3);
    let transport = &out[2];
    assert_eq!(transport.ministry, "Ministry of Transport");
    assert_eq!(transport.member_count, 0);
    // population share 8/20 of Tan's 8 questions
    assert!((transport.expected_count.unwrap() - 3.2).abs() < 1e-12);
    let health = &out[1];
    assert_eq!(health.member_count, 6);
    assert!((health.expected_count.unwrap() - 4.0).abs() < 1e-12);
}

#[test]
fn test_member_without_questions_expects_zero() {
    let out = member_vs_population("Ng", &facts());
    assert!(out.iter().all(|c| c.member_count == 0));
    assert!(out.iter().all(|c| c.expected_count == Some(0.0)));
}
