pub mod scoring;
pub mod technical;
pub mod content;
pub mod structure;
pub mod links;
pub mod ai;
pub mod pipeline;

use crate::models::{KeywordVariation, ModuleResult, PageContent};

pub use ai::AiAnalyzer;
pub use content::ContentAnalyzer;
pub use links::LinkAnalyzer;
pub use pipeline::{rank_recommendations, AnalysisPipeline, AnalyzerSet};
pub use scoring::{KeywordSignals, ScoringEngine};
pub use structure::StructureAnalyzer;
pub use technical::TechnicalSeoAnalyzer;

/// A deterministic scoring module over one fetched page.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;
    fn analyze(&self, page: &PageContent, keywords: &[KeywordVariation]) -> ModuleResult;
}
