use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Warning,
    Failed,
}

impl Status {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => Status::Passed,
            s if s >= 60 => Status::Warning,
            _ => Status::Failed,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Passed => write!(f, "passed"),
            Status::Warning => write!(f, "warning"),
            Status::Failed => write!(f, "failed"),
        }
    }
}

/// Score/status/details/recommendations envelope returned by every analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleResult {
    pub module_name: String,
    pub score: u8,
    pub status: Status,
    /// Module-specific payload; consumers should tolerate unknown keys.
    pub details: Value,
    pub recommendations: Vec<String>,
}

impl ModuleResult {
    /// Builds a result whose status follows the score.
    pub fn scored(
        module_name: impl Into<String>,
        score: u8,
        details: Value,
        recommendations: Vec<String>,
    ) -> Self {
        let score = score.min(100);
        Self {
            module_name: module_name.into(),
            score,
            status: Status::from_score(score),
            details,
            recommendations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordScore {
    pub keyword: String,
    pub score: u8,
    pub in_title: bool,
    pub in_meta: bool,
    pub in_h1: bool,
    pub in_headings: Vec<String>,
    pub in_first_100_words: bool,
    pub density: f64,
    pub distribution_score: u8,
    pub findings: Value,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterScore {
    pub keywords: Vec<String>,
    pub cluster_score: u8,
    pub individual_scores: Vec<KeywordScore>,
}

/// Output of the content analyzer: the module envelope plus the keyword
/// cluster it scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub module: ModuleResult,
    pub cluster: ClusterScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub overall_score: u8,
    pub keyword_cluster: ClusterScore,
    pub technical_seo: ModuleResult,
    pub content_analysis: ModuleResult,
    pub structure_analysis: ModuleResult,
    pub link_analysis: ModuleResult,
    pub top_recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<ModuleResult>,
}
