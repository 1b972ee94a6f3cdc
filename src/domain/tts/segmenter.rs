use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence-terminal punctuation, CJK and ASCII
static SENTENCE_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[。！？.!?]").expect("sentence delimiter pattern is valid"));

/// Split text into segments of at most `max_length` characters, breaking at
/// sentence-ending punctuation.
///
/// Sentences are accumulated greedily. A sentence longer than `max_length`
/// becomes its own oversized segment; it is never cut further.
///
/// Each sentence gets back the character that followed its *first*
/// occurrence in `text`. When the same sentence appears more than once, the
/// punctuation of the first occurrence is reused for every copy.
pub fn split_into_segments(text: &str, max_length: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current_segment = String::new();
    let mut current_len = 0;

    for sentence in SENTENCE_DELIMITER.split(text) {
        if sentence.trim().is_empty() {
            continue;
        }

        let sentence_with_punctuation = reattach_punctuation(text, sentence);
        let sentence_len = sentence_with_punctuation.chars().count();

        if current_len + sentence_len <= max_length {
            current_segment.push_str(&sentence_with_punctuation);
            current_len += sentence_len;
        } else {
            push_trimmed(&mut segments, &current_segment);
            current_segment = sentence_with_punctuation;
            current_len = sentence_len;
        }
    }

    push_trimmed(&mut segments, &current_segment);

    segments
}

/// Append the character that follows the first occurrence of `sentence`
fn reattach_punctuation(text: &str, sentence: &str) -> String {
    let mut with_punctuation = sentence.to_string();
    if let Some(start) = text.find(sentence) {
        if let Some(next) = text[start + sentence.len()..].chars().next() {
            with_punctuation.push(next);
        }
    }
    with_punctuation
}

fn push_trimmed(segments: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}
