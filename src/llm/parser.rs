use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentQuality {
    #[serde(default)]
    pub readability: Option<f32>,
    #[serde(default)]
    pub engagement: Option<f32>,
    #[serde(default)]
    pub keyword_stuffing_risk: Option<f32>,
    #[serde(default)]
    pub content_value: Option<f32>,
    #[serde(default)]
    pub summary: String,
}

/// Recommendations from a JSON array, or from a plain list when the model
/// ignores the format.
pub fn parse_recommendations(response: &str, limit: usize) -> Vec<String> {
    if let Ok(json_str) = extract_json(response, '[', ']') {
        if let Ok(recs) = serde_json::from_str::<Vec<String>>(&json_str) {
            return recs.into_iter().take(limit).collect();
        }
    }

    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('[') && !line.starts_with(']'))
        .filter(|line| !line.starts_with("```"))
        .map(|line| {
            line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | ' '))
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(limit)
        .collect()
}

pub fn parse_content_quality(response: &str) -> Result<ContentQuality> {
    let json_str = extract_json(response, '{', '}')?;

    serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Failed to parse content quality: {}", e)))
}

/// Strips quotes the model tends to wrap single-line answers in.
pub fn clean_single_line(response: &str) -> String {
    response
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn extract_json(text: &str, open: char, close: char) -> Result<String> {
    // Try to find JSON block in markdown code blocks
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with(open) {
                return Ok(content.to_string());
            }
        }
    }

    // Find the first balanced value
    if let Some(start) = text.find(open) {
        let mut depth = 0;
        let mut end = start;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                c if c == open && !in_string => depth += 1,
                c if c == close && !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        end = start + i + c.len_utf8();
                        break;
                    }
                }
                _ => {}
            }
        }

        if depth == 0 && end > start {
            return Ok(text[start..end].to_string());
        }
    }

    Err(Error::ParseError("No valid JSON found in response".to_string()))
}
