use std::sync::Arc;

use chrono::Utc;

use crate::analysis::ai::AiAnalyzer;
use crate::analysis::content::ContentAnalyzer;
use crate::analysis::links::LinkAnalyzer;
use crate::analysis::scoring::ScoringEngine;
use crate::analysis::structure::StructureAnalyzer;
use crate::analysis::technical::TechnicalSeoAnalyzer;
use crate::analysis::Analyzer;
use crate::config::{PipelineConfig, TOP_RECOMMENDATIONS};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::keywords::process_keywords;
use crate::llm::{CurrentScores, LLMProvider};
use crate::models::{AnalysisReport, ClusterScore, KeywordVariation, ModuleResult, PageContent};

/// The analyzers run for every page. Any slot may be replaced.
pub struct AnalyzerSet {
    pub technical: Box<dyn Analyzer>,
    pub content: ContentAnalyzer,
    pub structure: Box<dyn Analyzer>,
    pub links: Box<dyn Analyzer>,
}

impl Default for AnalyzerSet {
    fn default() -> Self {
        Self {
            technical: Box::new(TechnicalSeoAnalyzer),
            content: ContentAnalyzer::new(),
            structure: Box::new(StructureAnalyzer),
            links: Box::new(LinkAnalyzer),
        }
    }
}

pub struct AnalysisPipeline {
    fetcher: PageFetcher,
    llm: Option<Arc<dyn LLMProvider>>,
    analyzers: AnalyzerSet,
    scoring: ScoringEngine,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::new(&config)?,
            llm: None,
            analyzers: AnalyzerSet::default(),
            scoring: ScoringEngine::new(),
            config,
        })
    }

    pub fn with_llm(mut self, llm: impl LLMProvider + 'static) -> Self {
        self.llm = Some(Arc::new(llm));
        self
    }

    pub fn with_analyzers(mut self, analyzers: AnalyzerSet) -> Self {
        self.analyzers = analyzers;
        self
    }

    /// Fetches `url` and analyzes it. A fetch failure aborts the run with no
    /// partial report.
    pub async fn analyze_url(&self, url: &str, keywords: &[String]) -> Result<AnalysisReport> {
        // Step 1: Fetch and parse the page
        let page = self.fetcher.fetch(url).await?;
        tracing::info!("Parsed {} words, {} links", page.word_count, page.links.len());

        // Step 2: Deterministic analysis
        let keyword_variations = process_keywords(keywords);
        let mut report = self.analyze_variations(&page, &keyword_variations);

        // Step 3: Optional AI enrichment
        if self.config.enable_ai {
            let ai = match &self.llm {
                Some(llm) => AiAnalyzer::new(llm.clone()),
                None => AiAnalyzer::unconfigured(),
            };
            let scores = CurrentScores {
                technical: report.technical_seo.score,
                content: report.content_analysis.score,
                structure: report.structure_analysis.score,
                links: report.link_analysis.score,
            };
            report.ai_analysis = Some(ai.analyze(&page, &keyword_variations, scores).await);
        }

        Ok(report)
    }

    /// Scores an already-fetched page.
    pub fn analyze_page(&self, page: &PageContent, keywords: &[String]) -> AnalysisReport {
        self.analyze_variations(page, &process_keywords(keywords))
    }

    fn analyze_variations(&self, page: &PageContent, kws: &[KeywordVariation]) -> AnalysisReport {
        tracing::info!("Analyzing {} against {} keyword(s)", page.url, kws.len());

        let analyzers = &self.analyzers;

        // Analyzers share the page read-only. A panic in any of them is
        // re-raised by rayon once both sides of the join finish.
        let ((technical, content), (structure, links)) = rayon::join(
            || {
                rayon::join(
                    || analyzers.technical.analyze(page, kws),
                    || analyzers.content.analyze_content(page, kws),
                )
            },
            || {
                rayon::join(
                    || analyzers.structure.analyze(page, kws),
                    || analyzers.links.analyze(page, kws),
                )
            },
        );

        let cluster = content.cluster;
        let content = content.module;

        let overall_score = self.scoring.calculate_overall_score(
            cluster.cluster_score as i32,
            technical.score as i32,
            content.score as i32,
            structure.score as i32,
            links.score as i32,
        );
        tracing::info!("Overall SEO score: {}/100", overall_score);

        let top_recommendations =
            rank_recommendations(&cluster, &[&technical, &content, &structure, &links]);

        AnalysisReport {
            url: page.url.clone(),
            analyzed_at: Utc::now(),
            overall_score,
            keyword_cluster: cluster,
            technical_seo: technical,
            content_analysis: content,
            structure_analysis: structure,
            link_analysis: links,
            top_recommendations,
            ai_analysis: None,
        }
    }
}

/// Orders recommendations so the worst-scoring sources surface first.
///
/// The keyword cluster contributes the first recommendation of its two
/// lowest-scoring keywords; each module contributes up to two. Ties keep
/// insertion order.
pub fn rank_recommendations(cluster: &ClusterScore, modules: &[&ModuleResult]) -> Vec<String> {
    let mut keyword_recs: Vec<(u8, &str)> = cluster
        .individual_scores
        .iter()
        .filter_map(|ks| ks.recommendations.first().map(|r| (ks.score, r.as_str())))
        .collect();
    keyword_recs.sort_by_key(|(score, _)| *score);
    keyword_recs.truncate(2);

    let mut ranked = keyword_recs;
    for module in modules {
        ranked.extend(
            module
                .recommendations
                .iter()
                .take(2)
                .map(|r| (module.score, r.as_str())),
        );
    }

    ranked.sort_by_key(|(score, _)| *score);
    ranked
        .into_iter()
        .take(TOP_RECOMMENDATIONS)
        .map(|(_, rec)| rec.to_string())
        .collect()
}
