use super::*;

#[test]
fn test_format_metric_rounding() {
    assert_eq!(format_metric(Metric::ParticipationRate, Some(83.333)), "83.3%");
    assert_eq!(format_metric(Metric::TopicsPerSitting, Some(2.0)), "2.00");
    assert_eq!(format_metric(Metric::WordsPerSitting, Some(1234.56)), "1234.6");
    assert_eq!(format_metric(Metric::Readability, Some(-3.456)), "-3.46");
}

#[test]
fn test_undefined_is_not_available() {
    assert_eq!(format_metric(Metric::AttendanceRate, None), "N/A");
    assert_eq!(format_value(Some(f64::NAN), 2), "N/A");
    assert_eq!(format_rank(None, 10), "N/A");
    assert_eq!(format_rank(Some(3), 10), "3 of 10");
}

#[test]
fn test_format_count() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1000), "1,000");
    assert_eq!(format_count(1234567), "1,234,567");
}
