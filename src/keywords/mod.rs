//! Keyword normalization and matching.

pub mod text;

use std::collections::BTreeSet;

use crate::models::KeywordVariation;
use text::{normalize_text, remove_stop_words, stem_words, tokenize};

pub use text::{calculate_density, first_n_words};

pub fn process_keyword(raw: &str) -> KeywordVariation {
    let original = raw.trim().to_string();
    let normalized = normalize_text(&original);

    let words = tokenize(&normalized);
    let words_no_stop = remove_stop_words(&words);
    let stop_words_removed = words_no_stop.join(" ");
    let stemmed = stem_words(&words_no_stop).join(" ");

    let variants: BTreeSet<String> = [&normalized, &stop_words_removed, &stemmed]
        .into_iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect();

    KeywordVariation {
        original,
        normalized,
        stop_words_removed,
        stemmed,
        variants,
    }
}

pub fn process_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<KeywordVariation> {
    keywords.iter().map(|k| process_keyword(k.as_ref())).collect()
}

/// True if the keyword appears literally, without stop words, or in stemmed
/// form in `text`.
pub fn match_keyword_in_text(variation: &KeywordVariation, text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    let text_normalized = normalize_text(text);

    if text_normalized.contains(&variation.original.to_lowercase()) {
        return true;
    }

    if !variation.stop_words_removed.is_empty()
        && text_normalized.contains(&variation.stop_words_removed)
    {
        return true;
    }

    if variation.stemmed.is_empty() {
        return false;
    }
    let text_stemmed = stem_words(&tokenize(&text_normalized)).join(" ");
    text_stemmed.contains(&variation.stemmed)
}
