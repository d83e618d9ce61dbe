use serde_json::{json, Value};

use crate::analysis::Analyzer;
use crate::config::{
    OPTIMAL_META_DESC_LENGTH_MAX, OPTIMAL_META_DESC_LENGTH_MIN, OPTIMAL_TITLE_LENGTH_MAX,
    OPTIMAL_TITLE_LENGTH_MIN,
};
use crate::models::{KeywordVariation, ModuleResult, PageContent};

const FETCH_SUCCESS_CREDIT: u32 = 10;

/// Title, meta description, canonical and Open Graph checks.
pub struct TechnicalSeoAnalyzer;

struct SubScore {
    score: u32,
    details: Value,
    recommendations: Vec<String>,
}

impl Analyzer for TechnicalSeoAnalyzer {
    fn name(&self) -> &'static str {
        "Technical SEO"
    }

    fn analyze(&self, page: &PageContent, _keywords: &[KeywordVariation]) -> ModuleResult {
        let title = self.analyze_title(page);
        let meta = self.analyze_meta_description(page);

        let canonical_score = if page.canonical.is_some() { 10 } else { 0 };

        let og_present = page.og_title.is_some() || page.og_description.is_some();
        let og_complete = page.og_title.is_some() && page.og_description.is_some();
        let og_score = match (og_complete, og_present) {
            (true, _) => 15,
            (false, true) => 7,
            _ => 0,
        };

        let score = title.score + meta.score + canonical_score + og_score + FETCH_SUCCESS_CREDIT;

        let details = json!({
            "title": title.details,
            "meta_description": meta.details,
            "canonical": {
                "present": page.canonical.is_some(),
                "url": page.canonical,
            },
            "open_graph": {
                "present": og_present,
                "complete": og_complete,
            },
            "http_status": 200,
        });

        let mut recommendations = title.recommendations;
        recommendations.extend(meta.recommendations);

        tracing::debug!("Technical SEO score: {}", score);
        ModuleResult::scored(self.name(), score.min(100) as u8, details, recommendations)
    }
}

impl TechnicalSeoAnalyzer {
    fn analyze_title(&self, page: &PageContent) -> SubScore {
        let Some(title) = page.title.as_deref().filter(|t| !t.is_empty()) else {
            return SubScore {
                score: 0,
                details: json!({ "present": false }),
                recommendations: vec!["Add a title tag".to_string()],
            };
        };

        let (score, optimal, recommendations) = length_check(
            "Title is",
            title.chars().count(),
            OPTIMAL_TITLE_LENGTH_MIN,
            OPTIMAL_TITLE_LENGTH_MAX,
            (15, 15),
        );

        SubScore {
            score,
            details: json!({
                "present": true,
                "length": title.chars().count(),
                "optimal_length": optimal,
                "content": title,
            }),
            recommendations,
        }
    }

    fn analyze_meta_description(&self, page: &PageContent) -> SubScore {
        let Some(meta) = page.meta_description.as_deref().filter(|m| !m.is_empty()) else {
            return SubScore {
                score: 0,
                details: json!({ "present": false }),
                recommendations: vec!["Add a meta description".to_string()],
            };
        };

        let (score, optimal, recommendations) = length_check(
            "Meta description",
            meta.chars().count(),
            OPTIMAL_META_DESC_LENGTH_MIN,
            OPTIMAL_META_DESC_LENGTH_MAX,
            (12, 13),
        );

        SubScore {
            score,
            details: json!({
                "present": true,
                "length": meta.chars().count(),
                "optimal_length": optimal,
                "content": meta,
            }),
            recommendations,
        }
    }
}

/// Presence credit plus an optimal-length bonus; a length outside the band
/// yields a single recommendation.
fn length_check(
    label: &str,
    len: usize,
    min: usize,
    max: usize,
    (presence, bonus): (u32, u32),
) -> (u32, bool, Vec<String>) {
    if (min..=max).contains(&len) {
        return (presence + bonus, true, Vec::new());
    }
    let verdict = if len < min { "too short" } else { "too long" };
    let rec = format!("{} {} ({} chars), aim for {}-{}", label, verdict, len, min, max);
    (presence, false, vec![rec])
}
