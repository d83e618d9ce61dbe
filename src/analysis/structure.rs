use serde_json::json;

use crate::analysis::Analyzer;
use crate::models::{KeywordVariation, ModuleResult, PageContent, HEADING_TAGS};

const HIERARCHY_CREDIT: u32 = 25;
const IMAGE_ALT_CREDIT: u32 = 15;
const MISSING_ALT_PENALTY: u32 = 3;
/// Flat credit for structural checks that are not evaluated yet.
const UNEVALUATED_BASELINE: u32 = 35;

/// H1 usage, heading outline and image alt-text coverage.
pub struct StructureAnalyzer;

impl Analyzer for StructureAnalyzer {
    fn name(&self) -> &'static str {
        "Structure"
    }

    fn analyze(&self, page: &PageContent, _keywords: &[KeywordVariation]) -> ModuleResult {
        let mut recommendations = Vec::new();

        let h1_count = page.headings_for("h1").len();
        let h1_score = match h1_count {
            0 => {
                recommendations.push("Add an H1 heading to the page".to_string());
                0
            }
            1 => 30,
            n => {
                recommendations.push(format!("Use only one H1 heading (found {})", n));
                15
            }
        };

        // Outline is recorded but ordering is not validated.
        let outline: Vec<&str> = HEADING_TAGS
            .iter()
            .flat_map(|tag| std::iter::repeat(*tag).take(page.headings_for(tag).len()))
            .collect();

        let total_images = page.images.len();
        let with_alt = page.images.iter().filter(|img| img.has_alt).count();
        let without_alt = total_images - with_alt;
        let image_score = image_alt_score(without_alt);
        if without_alt > 0 {
            recommendations.push(format!("Add alt text to {} image(s)", without_alt));
        }

        let score = h1_score + HIERARCHY_CREDIT + image_score + UNEVALUATED_BASELINE;

        let details = json!({
            "h1": {
                "count": h1_count,
                "proper": h1_count == 1,
            },
            "heading_hierarchy": {
                "proper": true,
                "structure": outline,
            },
            "images": {
                "total": total_images,
                "with_alt": with_alt,
                "without_alt": without_alt,
                "score": image_score,
            },
            "baseline": {
                "points": UNEVALUATED_BASELINE,
                "evaluated": false,
            },
        });

        tracing::debug!("Structure score: {}", score);
        ModuleResult::scored(self.name(), score.min(100) as u8, details, recommendations)
    }
}

pub fn image_alt_score(missing_alt: usize) -> u32 {
    let penalty = (missing_alt as u32).saturating_mul(MISSING_ALT_PENALTY);
    IMAGE_ALT_CREDIT.saturating_sub(penalty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageInfo;

    fn page_with(h1s: &[&str], images: Vec<ImageInfo>) -> PageContent {
        let mut page = PageContent {
            url: "https://example.com".to_string(),
            images,
            ..Default::default()
        };
        page.headings
            .insert("h1".to_string(), h1s.iter().map(|s| s.to_string()).collect());
        page
    }

    #[test]
    fn test_no_images_full_alt_credit() {
        let result = StructureAnalyzer.analyze(&page_with(&["Title"], vec![]), &[]);
        assert_eq!(result.details["images"]["score"], 15);
        // 30 + 25 + 15 + 35
        assert_eq!(result.score, 100);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_missing_alt_penalty() {
        let images = vec![
            ImageInfo::new("a.png", "A"),
            ImageInfo::new("b.png", ""),
            ImageInfo::new("c.png", " "),
        ];
        let result = StructureAnalyzer.analyze(&page_with(&["Title"], images), &[]);
        assert_eq!(result.details["images"]["score"], 9);
        assert_eq!(result.details["images"]["without_alt"], 2);
        assert_eq!(result.recommendations, vec!["Add alt text to 2 image(s)"]);
        assert_eq!(result.score, 99);
    }

    #[test]
    fn test_alt_penalty_floors_at_zero() {
        assert_eq!(image_alt_score(5), 0);
        assert_eq!(image_alt_score(12), 0);
    }

    #[test]
    fn test_missing_h1() {
        let result = StructureAnalyzer.analyze(&page_with(&[], vec![]), &[]);
        assert_eq!(result.score, 75);
        assert_eq!(result.recommendations[0], "Add an H1 heading to the page");
    }

    #[test]
    fn test_multiple_h1() {
        let result = StructureAnalyzer.analyze(&page_with(&["One", "Two"], vec![]), &[]);
        assert_eq!(result.score, 90);
        assert_eq!(result.recommendations, vec!["Use only one H1 heading (found 2)"]);
        assert_eq!(result.details["h1"]["proper"], false);
    }

    #[test]
    fn test_outline_recorded() {
        let mut page = page_with(&["Top"], vec![]);
        page.headings
            .insert("h2".to_string(), vec!["A".to_string(), "B".to_string()]);
        let result = StructureAnalyzer.analyze(&page, &[]);
        assert_eq!(
            result.details["heading_hierarchy"]["structure"],
            json!(["h1", "h2", "h2"])
        );
    }
}
