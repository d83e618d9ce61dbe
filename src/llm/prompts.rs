use serde::{Deserialize, Serialize};

use crate::models::{KeywordVariation, PageContent};

/// Deterministic module scores shown to the model for context.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CurrentScores {
    pub technical: u8,
    pub content: u8,
    pub structure: u8,
    pub links: u8,
}

#[derive(Debug, Clone)]
pub struct PromptContext {
    pub url: String,
    pub keywords: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    pub word_count: usize,
    pub body_text: String,
    pub scores: CurrentScores,
}

impl PromptContext {
    pub fn new(page: &PageContent, keywords: &[KeywordVariation], scores: CurrentScores) -> Self {
        Self {
            url: page.url.clone(),
            keywords: keywords
                .iter()
                .map(|kw| kw.original.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            title: page.title.clone(),
            meta_description: page.meta_description.clone(),
            h1: page.h1.clone(),
            word_count: page.word_count,
            body_text: page.body_text.clone(),
            scores,
        }
    }

    fn body_preview(&self, max_chars: usize) -> String {
        self.body_text.chars().take(max_chars).collect()
    }

    pub fn recommendations_prompt(&self) -> String {
        format!(
            "Analyze this webpage SEO and provide 5 specific, actionable recommendations.\n\n\
             URL: {}\n\
             Target Keywords: {}\n\
             Title: {}\n\
             Meta Description: {}\n\
             H1: {}\n\
             Word Count: {}\n\
             Current SEO Scores:\n\
             - Technical SEO: {}/100\n\
             - Content: {}/100\n\
             - Structure: {}/100\n\
             - Links: {}/100\n\n\
             Body Text Preview: {}...\n\n\
             Provide exactly 5 specific, actionable SEO recommendations. Format as a JSON array of strings.\n\
             Focus on the biggest impact improvements based on the scores.",
            self.url,
            self.keywords,
            self.title.as_deref().unwrap_or("Missing"),
            self.meta_description.as_deref().unwrap_or("Missing"),
            self.h1.as_deref().unwrap_or("Missing"),
            self.word_count,
            self.scores.technical,
            self.scores.content,
            self.scores.structure,
            self.scores.links,
            self.body_preview(500),
        )
    }

    pub fn title_prompt(&self) -> String {
        format!(
            "Generate an SEO-optimized title tag for this webpage.\n\n\
             Target Keywords: {}\n\
             Current Title: {}\n\
             Page Content: {}...\n\n\
             Requirements:\n\
             - 50-60 characters long\n\
             - Include primary keyword naturally\n\
             - Compelling and click-worthy\n\
             - Accurate to page content\n\n\
             Provide ONLY the optimized title, nothing else.",
            self.keywords,
            self.title.as_deref().unwrap_or(""),
            self.body_preview(300),
        )
    }

    pub fn meta_description_prompt(&self) -> String {
        format!(
            "Generate an SEO-optimized meta description for this webpage.\n\n\
             Target Keywords: {}\n\
             Current Meta: {}\n\
             Page Content: {}...\n\n\
             Requirements:\n\
             - 150-160 characters long\n\
             - Include primary keyword naturally\n\
             - Compelling call-to-action\n\
             - Accurate summary of page content\n\n\
             Provide ONLY the optimized meta description, nothing else.",
            self.keywords,
            self.meta_description.as_deref().unwrap_or(""),
            self.body_preview(400),
        )
    }

    pub fn content_quality_prompt(&self) -> String {
        format!(
            "Analyze the SEO content quality of this text.\n\n\
             Content: {}...\n\n\
             Evaluate:\n\
             1. Readability level (1-10)\n\
             2. Engagement potential (1-10)\n\
             3. Keyword stuffing risk (1-10, higher = more risk)\n\
             4. Content value (1-10)\n\n\
             Respond in JSON format:\n\
             {{\"readability\": number, \"engagement\": number, \"keyword_stuffing_risk\": number, \"content_value\": number, \"summary\": \"brief summary\"}}",
            self.body_preview(800),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::process_keyword;

    #[test]
    fn test_prompt_marks_missing_fields() {
        let page = PageContent {
            url: "https://example.com".to_string(),
            body_text: "é".repeat(600),
            ..Default::default()
        };
        let ctx = PromptContext::new(
            &page,
            &[process_keyword("rust"), process_keyword("seo")],
            CurrentScores::default(),
        );
        let prompt = ctx.recommendations_prompt();
        assert!(prompt.contains("Target Keywords: rust, seo"));
        assert!(prompt.contains("Title: Missing"));
        assert!(prompt.contains(&format!("Body Text Preview: {}...", "é".repeat(500))));
    }
}
