use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word pattern"));

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

// NLTK English stop-word corpus.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Splits text into lowercase word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

pub fn remove_stop_words(words: &[String]) -> Vec<String> {
    words.iter().filter(|w| !is_stop_word(w)).cloned().collect()
}

pub fn stem_word(word: &str) -> String {
    STEMMER.stem(&word.to_lowercase()).into_owned()
}

pub fn stem_words(words: &[String]) -> Vec<String> {
    words.iter().map(|w| stem_word(w)).collect()
}

/// Percentage of body words that are occurrences of `keyword`.
///
/// Single-word keywords are counted as case-insensitive substrings; phrases
/// match their tokens separated by any run of whitespace.
pub fn calculate_density(keyword: &str, text: &str) -> f64 {
    let total_words = tokenize(text).len();
    if total_words == 0 {
        return 0.0;
    }

    let text_lower = text.to_lowercase();
    let keyword_lower = keyword.to_lowercase();
    let keyword_words = tokenize(&keyword_lower);

    let occurrences = match keyword_words.len() {
        0 => 0,
        1 => text_lower.matches(keyword_lower.as_str()).count(),
        _ => {
            let pattern = format!(
                r"\b{}\b",
                keyword_words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            );
            match Regex::new(&pattern) {
                Ok(re) => re.find_iter(&text_lower).count(),
                Err(_) => 0,
            }
        }
    };

    occurrences as f64 / total_words as f64 * 100.0
}

pub fn first_n_words(text: &str, n: usize) -> String {
    tokenize(text).into_iter().take(n).collect::<Vec<_>>().join(" ")
}
