use super::*;

#[test]
fn test_flesch_reference_values() {
    let score = flesch_reading_ease(100, 10, 150).unwrap();
    let expected = 206.835 - 1.015 * 10.0 - 84.6 * 1.5;
    assert!((score - expected).abs() < 1e-9);
    assert!((score - 69.785).abs() < 1e-9);
}

#[test]
fn test_flesch_undefined_without_words_or_sentences() {
    assert_eq!(flesch_reading_ease(0, 10, 0), None);
    assert_eq!(flesch_reading_ease(100, 0, 150), None);
    assert_eq!(flesch_reading_ease(0, 0, 0), None);
}

#[test]
fn test_flesch_allows_zero_syllables() {
    let score = flesch_reading_ease(20, 2, 0).unwrap();
    assert!((score - (206.835 - 1.015 * 10.0)).abs() < 1e-9);
}

#[test]
fn test_flesch_can_go_negative() {
    // one very long sentence of polysyllabic words
    let score = flesch_reading_ease(200, 1, 800).unwrap();
    assert!(score < 0.0);
}

#[test]
fn test_flesch_determinism_bits() {
    let a = flesch_reading_ease(12345, 678, 19876).unwrap();
    let b = flesch_reading_ease(12345, 678, 19876).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}
