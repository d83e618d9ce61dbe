use crate::models::Status;

pub struct ScoringEngine {
    weights: ScoreWeights,
    keyword_weights: KeywordWeights,
}

/// Weights of the five module scores in the overall score.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub keyword_weight: f64,
    pub technical_weight: f64,
    pub content_weight: f64,
    pub structure_weight: f64,
    pub link_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword_weight: 0.40,
            technical_weight: 0.20,
            content_weight: 0.20,
            structure_weight: 0.10,
            link_weight: 0.10,
        }
    }
}

/// Weights of the per-keyword placement signals.
#[derive(Debug, Clone)]
pub struct KeywordWeights {
    pub title_weight: f64,
    pub meta_weight: f64,
    pub h1_weight: f64,
    pub headings_weight: f64,
    pub first_100_words_weight: f64,
    pub density_weight: f64,
    pub distribution_weight: f64,
}

impl Default for KeywordWeights {
    fn default() -> Self {
        Self {
            title_weight: 0.20,
            meta_weight: 0.15,
            h1_weight: 0.15,
            headings_weight: 0.10,
            first_100_words_weight: 0.10,
            density_weight: 0.15,
            distribution_weight: 0.15,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeywordSignals {
    pub in_title: bool,
    pub in_meta: bool,
    pub in_h1: bool,
    /// Number of heading levels containing the keyword.
    pub heading_matches: usize,
    pub in_first_100_words: bool,
    pub density_score: f64,
    pub distribution_score: f64,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::with_weights(ScoreWeights::default(), KeywordWeights::default())
    }

    pub fn with_weights(weights: ScoreWeights, keyword_weights: KeywordWeights) -> Self {
        Self {
            weights,
            keyword_weights,
        }
    }

    pub fn calculate_keyword_score(&self, signals: &KeywordSignals) -> u8 {
        let w = &self.keyword_weights;
        let flag = |present: bool| if present { 100.0 } else { 0.0 };
        // Two heading levels saturate the headings signal.
        let headings = (signals.heading_matches as f64 * 50.0).min(100.0);

        let score = flag(signals.in_title) * w.title_weight
            + flag(signals.in_meta) * w.meta_weight
            + flag(signals.in_h1) * w.h1_weight
            + headings * w.headings_weight
            + flag(signals.in_first_100_words) * w.first_100_words_weight
            + signals.density_score * w.density_weight
            + signals.distribution_score * w.distribution_weight;

        clamp_score(score)
    }

    pub fn calculate_overall_score(
        &self,
        keyword: i32,
        technical: i32,
        content: i32,
        structure: i32,
        link: i32,
    ) -> u8 {
        let w = &self.weights;
        let overall = keyword as f64 * w.keyword_weight
            + technical as f64 * w.technical_weight
            + content as f64 * w.content_weight
            + structure as f64 * w.structure_weight
            + link as f64 * w.link_weight;

        clamp_score(overall)
    }

    pub fn get_status(&self, score: u8) -> Status {
        Status::from_score(score)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncates to an integer score in [0, 100].
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_score_weighting() {
        let engine = ScoringEngine::new();
        // 40 + 16 + 12 + 7 + 5
        assert_eq!(engine.calculate_overall_score(100, 80, 60, 70, 50), 80);
        assert_eq!(engine.calculate_overall_score(0, 0, 0, 0, 0), 0);
    }

    #[test]
    fn test_overall_score_clamps_out_of_range_inputs() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.calculate_overall_score(500, 400, 300, 900, 1000), 100);
        assert_eq!(engine.calculate_overall_score(-500, -1, -20, 0, 0), 0);
    }

    #[test]
    fn test_overall_score_clamps_with_custom_weights() {
        let engine = ScoringEngine::with_weights(
            ScoreWeights {
                keyword_weight: 2.0,
                technical_weight: 2.0,
                content_weight: 2.0,
                structure_weight: 2.0,
                link_weight: 2.0,
            },
            KeywordWeights::default(),
        );
        assert_eq!(engine.calculate_overall_score(100, 100, 100, 100, 100), 100);
    }

    #[test]
    fn test_keyword_score_all_signals() {
        let engine = ScoringEngine::new();
        let signals = KeywordSignals {
            in_title: true,
            in_meta: true,
            in_h1: true,
            heading_matches: 2,
            in_first_100_words: true,
            density_score: 100.0,
            distribution_score: 100.0,
        };
        assert_eq!(engine.calculate_keyword_score(&signals), 100);
    }

    #[test]
    fn test_keyword_score_truncates() {
        let engine = ScoringEngine::new();
        let signals = KeywordSignals {
            distribution_score: 70.0,
            ..Default::default()
        };
        // 70 * 0.15 = 10.5
        assert_eq!(engine.calculate_keyword_score(&signals), 10);
    }

    #[test]
    fn test_single_heading_match_is_half_credit() {
        let engine = ScoringEngine::new();
        let signals = KeywordSignals {
            heading_matches: 1,
            ..Default::default()
        };
        assert_eq!(engine.calculate_keyword_score(&signals), 5);
    }

    #[test]
    fn test_get_status() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.get_status(80), Status::Passed);
        assert_eq!(engine.get_status(79), Status::Warning);
        assert_eq!(engine.get_status(59), Status::Failed);
    }
}
