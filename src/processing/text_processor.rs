//! Text normalization and n-gram keyword extraction

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Punctuation that survives normalization because it is part of skill names
/// (`c++`, `c#`, `node.js`, `ci/cd`, `scikit-learn`).
const KEPT_PUNCTUATION: [char; 5] = ['-', '.', '/', '#', '+'];

/// Minimum length (exclusive) for a single word to count as a keyword.
const MIN_UNIGRAM_LEN: usize = 2;

/// Set of unigrams, bigrams and trigrams extracted from one text.
pub type KeywordSet = HashSet<String>;

/// Lowercase, replace anything that is not a word character, whitespace or
/// one of `- . / # +` with a space, then collapse whitespace.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() || KEPT_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word characters in the regex sense: letters, digits and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Extract unigrams (longer than two characters) plus every contiguous
/// bigram and trigram from the normalized text.
///
/// Short words are only excluded from the unigram pass; they still take
/// part in phrases, so "a rest api" yields the bigram "a rest".
pub fn extract_keywords(text: &str) -> KeywordSet {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
    let mut keywords = KeywordSet::new();

    for word in &words {
        if word.chars().count() > MIN_UNIGRAM_LEN {
            keywords.insert((*word).to_string());
        }
    }

    for pair in words.windows(2) {
        keywords.insert(pair.join(" "));
    }

    for triple in words.windows(3) {
        keywords.insert(triple.join(" "));
    }

    keywords
}

/// Percentage of job keywords that also appear in the resume keyword set.
/// Returns 0 when the job has no keywords.
pub fn keyword_match_percentage(resume: &KeywordSet, job: &KeywordSet) -> f64 {
    if job.is_empty() {
        return 0.0;
    }

    let matched = job.iter().filter(|k| resume.contains(*k)).count();
    matched as f64 / job.len() as f64 * 100.0
}

/// Cut `text` down to at most `max_chars` grapheme clusters.
/// Returns the (possibly shortened) text and whether anything was cut.
pub fn truncate_graphemes(text: &str, max_chars: usize) -> (String, bool) {
    match text.grapheme_indices(true).nth(max_chars) {
        Some((byte_idx, _)) => (text[..byte_idx].to_string(), true),
        None => (text.to_string(), false),
    }
}
