pub const FLESCH_BASE: f64 = 206.835;
pub const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
pub const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Flesch Reading Ease over summed counts. `None` when there are no words or
/// no sentences to divide by.
pub fn flesch_reading_ease(words: u64, sentences: u64, syllables: u64) -> Option<f64> {
    if words == 0 || sentences == 0 {
        return None;
    }
    let words = words as f64;
    let words_per_sentence = words / sentences as f64;
    let syllables_per_word = syllables as f64 / words;
    Some(
        FLESCH_BASE
            - FLESCH_SENTENCE_WEIGHT * words_per_sentence
            - FLESCH_SYLLABLE_WEIGHT * syllables_per_word,
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/readability.rs"]
mod tests;
