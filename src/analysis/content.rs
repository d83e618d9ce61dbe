use serde_json::json;

use crate::analysis::scoring::{clamp_score, KeywordSignals, ScoringEngine};
use crate::analysis::Analyzer;
use crate::config::{MIN_WORD_COUNT, OPTIMAL_KEYWORD_DENSITY_MAX, OPTIMAL_KEYWORD_DENSITY_MIN};
use crate::keywords::{calculate_density, first_n_words, match_keyword_in_text};
use crate::models::{
    ClusterScore, ContentAnalysis, KeywordScore, KeywordVariation, ModuleResult, PageContent,
};

/// Placeholder until positional distribution is analyzed.
const DISTRIBUTION_SCORE: u8 = 70;
const FIRST_WORDS: usize = 100;

/// Keyword relevance and content depth.
pub struct ContentAnalyzer {
    scoring: ScoringEngine,
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self {
            scoring: ScoringEngine::new(),
        }
    }

    pub fn analyze_content(
        &self,
        page: &PageContent,
        keywords: &[KeywordVariation],
    ) -> ContentAnalysis {
        let individual_scores: Vec<KeywordScore> = keywords
            .iter()
            .map(|kw| self.analyze_keyword(page, kw))
            .collect();

        let cluster_score = mean(individual_scores.iter().map(|ks| ks.score as f64));
        let avg_density = mean(individual_scores.iter().map(|ks| ks.density));

        let cluster = ClusterScore {
            keywords: keywords.iter().map(|kw| kw.original.clone()).collect(),
            cluster_score: clamp_score(cluster_score),
            individual_scores,
        };

        let mut recommendations = Vec::new();

        let adequate_length = page.word_count >= MIN_WORD_COUNT;
        let word_count_score = if adequate_length {
            50.0
        } else {
            recommendations.push(format!(
                "Increase content length to at least {} words (currently {})",
                MIN_WORD_COUNT, page.word_count
            ));
            page.word_count as f64 / MIN_WORD_COUNT as f64 * 50.0
        };

        let density_health_score = if avg_density < OPTIMAL_KEYWORD_DENSITY_MIN {
            recommendations.push(format!(
                "Improve keyword density (currently {:.1}%)",
                avg_density
            ));
            density_score(avg_density, 50.0)
        } else if avg_density > OPTIMAL_KEYWORD_DENSITY_MAX {
            recommendations.push(format!(
                "Reduce keyword density to avoid keyword stuffing (currently {:.1}%)",
                avg_density
            ));
            density_score(avg_density, 50.0)
        } else {
            50.0
        };

        let score = clamp_score(word_count_score + density_health_score);
        tracing::debug!(
            "Content score: {} (cluster {}, avg density {:.2}%)",
            score,
            cluster.cluster_score,
            avg_density
        );

        let details = json!({
            "word_count": page.word_count,
            "adequate_length": adequate_length,
            "avg_keyword_density": avg_density,
            "cluster_score": cluster.cluster_score,
        });

        ContentAnalysis {
            module: ModuleResult::scored(self.name(), score, details, recommendations),
            cluster,
        }
    }

    fn analyze_keyword(&self, page: &PageContent, kw: &KeywordVariation) -> KeywordScore {
        let matches = |text: Option<&str>| match_keyword_in_text(kw, text.unwrap_or(""));

        let in_title = matches(page.title.as_deref());
        let in_meta = matches(page.meta_description.as_deref());
        let in_h1 = matches(page.h1.as_deref());

        let in_headings: Vec<String> = page
            .headings
            .iter()
            .filter(|(_, texts)| texts.iter().any(|h| match_keyword_in_text(kw, h)))
            .map(|(tag, _)| tag.clone())
            .collect();

        let first_100 = first_n_words(&page.body_text, FIRST_WORDS);
        let in_first_100_words = match_keyword_in_text(kw, &first_100);

        let density = calculate_density(&kw.original, &page.body_text);

        let score = self.scoring.calculate_keyword_score(&KeywordSignals {
            in_title,
            in_meta,
            in_h1,
            heading_matches: in_headings.len(),
            in_first_100_words,
            density_score: density_score(density, 100.0),
            distribution_score: DISTRIBUTION_SCORE as f64,
        });

        let mut recommendations = Vec::new();
        if !in_title {
            recommendations.push(format!("Add '{}' to title tag", kw.original));
        }
        if !in_meta {
            recommendations.push(format!("Add '{}' to meta description", kw.original));
        }
        if !in_h1 {
            recommendations.push(format!("Include '{}' in H1 heading", kw.original));
        }
        if density < OPTIMAL_KEYWORD_DENSITY_MIN {
            recommendations.push(format!(
                "Increase keyword density (currently {:.1}%)",
                density
            ));
        }

        KeywordScore {
            keyword: kw.original.clone(),
            score,
            in_title,
            in_meta,
            in_h1,
            findings: json!({
                "in_title": in_title,
                "in_meta": in_meta,
                "in_h1": in_h1,
                "in_headings": in_headings,
                "in_first_100_words": in_first_100_words,
                "density": density,
            }),
            in_headings,
            in_first_100_words,
            density,
            distribution_score: DISTRIBUTION_SCORE,
            recommendations,
        }
    }
}

impl Analyzer for ContentAnalyzer {
    fn name(&self) -> &'static str {
        "Content Analysis"
    }

    fn analyze(&self, page: &PageContent, keywords: &[KeywordVariation]) -> ModuleResult {
        self.analyze_content(page, keywords).module
    }
}

impl Default for ContentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a density percentage onto `[0, full]`: full credit inside the optimal
/// band, proportional credit below it, and a penalty of `full / 5` points per
/// percentage point above it.
pub fn density_score(density: f64, full: f64) -> f64 {
    if density < OPTIMAL_KEYWORD_DENSITY_MIN {
        density / OPTIMAL_KEYWORD_DENSITY_MIN * full
    } else if density > OPTIMAL_KEYWORD_DENSITY_MAX {
        (full - (density - OPTIMAL_KEYWORD_DENSITY_MAX) * full / 5.0).max(0.0)
    } else {
        full
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::process_keyword;

    fn page(body: &str) -> PageContent {
        PageContent {
            url: "https://example.com".to_string(),
            body_text: body.to_string(),
            word_count: body.split_whitespace().count(),
            ..Default::default()
        }
    }

    #[test]
    fn test_density_score_curve() {
        assert_eq!(density_score(2.0, 100.0), 100.0);
        assert_eq!(density_score(1.0, 100.0), 100.0);
        assert_eq!(density_score(3.0, 100.0), 100.0);
        assert!((density_score(0.5, 100.0) - 50.0).abs() < 1e-9);
        assert!((density_score(4.0, 100.0) - 80.0).abs() < 1e-9);
        assert_eq!(density_score(60.0, 100.0), 0.0);
        assert!((density_score(4.0, 50.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_everywhere() {
        let mut page = page(&format!("rust guide {}", "filler ".repeat(48)));
        page.title = Some("The Rust handbook".to_string());
        page.meta_description = Some("Everything about rust".to_string());
        page.h1 = Some("Rust".to_string());
        page.headings.insert("h1".to_string(), vec!["Rust".to_string()]);
        page.headings.insert("h2".to_string(), vec!["Why Rust".to_string()]);

        let analysis = ContentAnalyzer::new().analyze_content(&page, &[process_keyword("rust")]);
        let ks = &analysis.cluster.individual_scores[0];

        assert!(ks.in_title && ks.in_meta && ks.in_h1 && ks.in_first_100_words);
        assert_eq!(ks.in_headings, vec!["h1", "h2"]);
        // 1 of 50 words
        assert!((ks.density - 2.0).abs() < 1e-9);
        // 20 + 15 + 15 + 10 + 10 + 15 + 10.5
        assert_eq!(ks.score, 95);
        assert!(ks.recommendations.is_empty());
        assert_eq!(ks.distribution_score, 70);
        assert_eq!(ks.findings["density"], 2.0);
    }

    #[test]
    fn test_missing_keyword_recommendations() {
        let analysis = ContentAnalyzer::new()
            .analyze_content(&page("nothing to see here"), &[process_keyword("test")]);
        let ks = &analysis.cluster.individual_scores[0];
        assert_eq!(ks.score, 10);
        assert_eq!(
            ks.recommendations,
            vec![
                "Add 'test' to title tag",
                "Add 'test' to meta description",
                "Include 'test' in H1 heading",
                "Increase keyword density (currently 0.0%)",
            ]
        );
    }

    #[test]
    fn test_cluster_is_mean_of_keyword_scores() {
        let mut page = page("alpha beta");
        page.title = Some("alpha".to_string());
        let analysis = ContentAnalyzer::new()
            .analyze_content(&page, &[process_keyword("alpha"), process_keyword("gamma")]);
        let scores: Vec<u8> = analysis
            .cluster
            .individual_scores
            .iter()
            .map(|ks| ks.score)
            .collect();
        let expected = (scores[0] as f64 + scores[1] as f64) / 2.0;
        assert_eq!(analysis.cluster.cluster_score, expected as u8);
        assert_eq!(analysis.cluster.keywords, vec!["alpha", "gamma"]);
    }

    #[test]
    fn test_short_page_module_score() {
        let body = "word ".repeat(100);
        let analysis =
            ContentAnalyzer::new().analyze_content(&page(&body), &[process_keyword("test")]);
        // 100 / 300 * 50 + 0
        assert_eq!(analysis.module.score, 16);
        assert_eq!(
            analysis.module.recommendations,
            vec![
                "Increase content length to at least 300 words (currently 100)",
                "Improve keyword density (currently 0.0%)",
            ]
        );
        assert_eq!(analysis.module.details["adequate_length"], false);
    }

    #[test]
    fn test_keyword_stuffing_penalized() {
        let body = format!("{}{}", "seo ".repeat(10), "text ".repeat(290));
        let analysis =
            ContentAnalyzer::new().analyze_content(&page(&body), &[process_keyword("seo")]);
        assert!((analysis.cluster.individual_scores[0].density - 10.0 / 3.0).abs() < 1e-9);
        assert!(analysis.module.recommendations[0].starts_with("Reduce keyword density"));
        // 50 + (50 - 0.333 * 10)
        assert_eq!(analysis.module.score, 96);
    }

    #[test]
    fn test_no_keywords() {
        let analysis = ContentAnalyzer::new().analyze_content(&page("some text"), &[]);
        assert_eq!(analysis.cluster.cluster_score, 0);
        assert!(analysis.cluster.individual_scores.is_empty());
    }
}
