use std::sync::Arc;

use serde_json::json;

use crate::error::Result;
use crate::llm::parser::{
    clean_single_line, parse_content_quality, parse_recommendations, ContentQuality,
};
use crate::llm::{CompletionRequest, CurrentScores, LLMProvider, PromptContext};
use crate::models::{KeywordVariation, ModuleResult, PageContent, Status};

pub const AI_MODULE_NAME: &str = "AI SEO Assistant";

const TITLE_CHARS: std::ops::RangeInclusive<usize> = 40..=70;
const META_CHARS: std::ops::RangeInclusive<usize> = 120..=180;

/// Optional model-backed enrichment. Its result is reported alongside the
/// deterministic modules but never weighted into the overall score.
pub struct AiAnalyzer {
    provider: Option<Arc<dyn LLMProvider>>,
}

impl AiAnalyzer {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Analyzer for a run where enrichment was requested without credentials.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub async fn analyze(
        &self,
        page: &PageContent,
        keywords: &[KeywordVariation],
        scores: CurrentScores,
    ) -> ModuleResult {
        let Some(provider) = &self.provider else {
            return failed(
                json!({ "error": "ANTHROPIC_API_KEY not configured" }),
                "Add ANTHROPIC_API_KEY to enable AI-powered SEO suggestions".to_string(),
            );
        };

        let ctx = PromptContext::new(page, keywords, scores);
        tracing::info!("Requesting AI recommendations from {}", provider.name());

        let (recommendations, title, meta, quality) = futures::join!(
            self.recommendations(provider.as_ref(), &ctx),
            self.optimized_line(provider.as_ref(), ctx.title_prompt(), 100, TITLE_CHARS),
            self.optimized_line(provider.as_ref(), ctx.meta_description_prompt(), 150, META_CHARS),
            self.content_quality(provider.as_ref(), &ctx),
        );

        let recommendations = match recommendations {
            Ok(recs) => recs,
            Err(e) => {
                tracing::warn!("AI analysis failed: {}", e);
                return failed(
                    json!({ "error": e.to_string() }),
                    format!("AI analysis failed: {}", e),
                );
            }
        };

        let details = json!({
            "ai_recommendations": recommendations,
            "optimized_title": title,
            "optimized_meta_description": meta,
            "content_quality_analysis": quality,
            "model_used": provider.model(),
        });

        ModuleResult {
            module_name: AI_MODULE_NAME.to_string(),
            score: 100,
            status: Status::Passed,
            details,
            recommendations: recommendations.into_iter().take(3).collect(),
        }
    }

    async fn recommendations(
        &self,
        provider: &dyn LLMProvider,
        ctx: &PromptContext,
    ) -> Result<Vec<String>> {
        let text = provider
            .complete(CompletionRequest::new(ctx.recommendations_prompt(), 1024))
            .await?;
        Ok(parse_recommendations(&text, 5))
    }

    /// A generated title or description, kept only if its length is plausible.
    async fn optimized_line(
        &self,
        provider: &dyn LLMProvider,
        prompt: String,
        max_tokens: u32,
        accepted: std::ops::RangeInclusive<usize>,
    ) -> Option<String> {
        match provider.complete(CompletionRequest::new(prompt, max_tokens)).await {
            Ok(text) => {
                let line = clean_single_line(&text);
                accepted.contains(&line.chars().count()).then_some(line)
            }
            Err(e) => {
                tracing::warn!("AI suggestion failed: {}", e);
                None
            }
        }
    }

    async fn content_quality(
        &self,
        provider: &dyn LLMProvider,
        ctx: &PromptContext,
    ) -> ContentQuality {
        let text = match provider
            .complete(CompletionRequest::new(ctx.content_quality_prompt(), 300))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("AI content quality analysis failed: {}", e);
                return ContentQuality {
                    summary: "Analysis failed".to_string(),
                    ..Default::default()
                };
            }
        };

        parse_content_quality(&text).unwrap_or_else(|_| ContentQuality {
            summary: "Unable to parse quality metrics".to_string(),
            ..Default::default()
        })
    }
}

fn failed(details: serde_json::Value, recommendation: String) -> ModuleResult {
    ModuleResult {
        module_name: AI_MODULE_NAME.to_string(),
        score: 0,
        status: Status::Failed,
        details,
        recommendations: vec![recommendation],
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;

    /// Answers each prompt kind with a canned reply.
    pub(crate) struct ScriptedProvider {
        pub fail: bool,
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<String> {
            if self.fail {
                return Err(Error::LLMApi("service unavailable".to_string()));
            }
            let prompt = request.prompt;
            let reply = if prompt.starts_with("Analyze this webpage") {
                r#"["Add a title", "Write more", "Link out", "Use alt text", "Add schema"]"#.to_string()
            } else if prompt.starts_with("Generate an SEO-optimized title") {
                "\"Rust SEO: A Practical Guide to Ranking Your Crate Docs\"".to_string()
            } else if prompt.starts_with("Generate an SEO-optimized meta") {
                "Too short".to_string()
            } else {
                r#"{"readability": 8, "summary": "Clear"}"#.to_string()
            };
            Ok(reply)
        }

        fn model(&self) -> &str {
            "scripted"
        }

        fn name(&self) -> &str {
            "Scripted"
        }
    }

    fn page() -> PageContent {
        PageContent {
            url: "https://example.com".to_string(),
            body_text: "Rust crates and docs".to_string(),
            word_count: 4,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_successful_enrichment() {
        let analyzer = AiAnalyzer::new(Arc::new(ScriptedProvider { fail: false }));
        let result = analyzer.analyze(&page(), &[], CurrentScores::default()).await;

        assert_eq!(result.score, 100);
        assert_eq!(result.status, Status::Passed);
        assert_eq!(result.recommendations, vec!["Add a title", "Write more", "Link out"]);
        assert_eq!(
            result.details["optimized_title"],
            "Rust SEO: A Practical Guide to Ranking Your Crate Docs"
        );
        assert!(result.details["optimized_meta_description"].is_null());
        assert_eq!(result.details["content_quality_analysis"]["summary"], "Clear");
        assert_eq!(result.details["model_used"], "scripted");
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported() {
        let analyzer = AiAnalyzer::new(Arc::new(ScriptedProvider { fail: true }));
        let result = analyzer.analyze(&page(), &[], CurrentScores::default()).await;

        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Failed);
        assert!(result.recommendations[0].starts_with("AI analysis failed"));
        assert!(result.details["error"].as_str().unwrap().contains("service unavailable"));
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let result = AiAnalyzer::unconfigured()
            .analyze(&page(), &[], CurrentScores::default())
            .await;
        assert_eq!(result.status, Status::Failed);
        assert_eq!(
            result.recommendations,
            vec!["Add ANTHROPIC_API_KEY to enable AI-powered SEO suggestions"]
        );
    }
}
