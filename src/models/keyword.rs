use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Matchable forms of one target keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordVariation {
    pub original: String,
    pub normalized: String,
    pub stop_words_removed: String,
    pub stemmed: String,
    pub variants: BTreeSet<String>,
}
