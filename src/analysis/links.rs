use serde_json::json;

use crate::analysis::Analyzer;
use crate::config::{RECOMMENDED_INTERNAL_LINKS_MAX, RECOMMENDED_INTERNAL_LINKS_MIN};
use crate::models::{KeywordVariation, ModuleResult, PageContent};

const INTERNAL_LINK_CREDIT: f64 = 35.0;
const EXTERNAL_LINK_CREDIT: u32 = 25;
// Credits for checks that are not evaluated yet.
const NOFOLLOW_BASELINE: u32 = 25;
const ANCHOR_TEXT_BASELINE: u32 = 15;

/// Internal/external link balance.
pub struct LinkAnalyzer;

impl Analyzer for LinkAnalyzer {
    fn name(&self) -> &'static str {
        "Links"
    }

    fn analyze(&self, page: &PageContent, _keywords: &[KeywordVariation]) -> ModuleResult {
        let mut recommendations = Vec::new();

        let internal_count = page.internal_links().count();
        let external_count = page.external_links().count();

        let internal_score = internal_link_score(internal_count);
        if internal_count < RECOMMENDED_INTERNAL_LINKS_MIN {
            let needed = RECOMMENDED_INTERNAL_LINKS_MIN - internal_count;
            recommendations.push(format!("Add {} more internal link(s)", needed));
        }

        let external_score = if external_count > 0 {
            EXTERNAL_LINK_CREDIT
        } else {
            recommendations.push("Add some external links to authoritative sources".to_string());
            0
        };

        let score = internal_score + external_score + NOFOLLOW_BASELINE + ANCHOR_TEXT_BASELINE;

        let details = json!({
            "internal_links": {
                "count": internal_count,
                "recommended_min": RECOMMENDED_INTERNAL_LINKS_MIN,
                "recommended_max": RECOMMENDED_INTERNAL_LINKS_MAX,
                "score": internal_score,
            },
            "external_links": {
                "count": external_count,
                "score": external_score,
            },
            "nofollow_distribution": {
                "points": NOFOLLOW_BASELINE,
                "evaluated": false,
            },
            "anchor_text_quality": {
                "points": ANCHOR_TEXT_BASELINE,
                "evaluated": false,
            },
        });

        tracing::debug!("Link score: {}", score);
        ModuleResult::scored(self.name(), score.min(100) as u8, details, recommendations)
    }
}

/// Full credit from the recommended minimum upward; counts above the
/// recommended maximum are not penalized.
pub fn internal_link_score(count: usize) -> u32 {
    if count >= RECOMMENDED_INTERNAL_LINKS_MIN {
        INTERNAL_LINK_CREDIT as u32
    } else {
        (count as f64 / RECOMMENDED_INTERNAL_LINKS_MIN as f64 * INTERNAL_LINK_CREDIT) as u32
    }
}
