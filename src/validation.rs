use url::Url;

use crate::error::{Error, Result};

pub const MAX_KEYWORDS: usize = 50;

/// Checks that `raw` is an absolute http(s) URL and returns it trimmed but
/// otherwise as typed. Self-link detection compares against this form, so
/// it must not gain the trailing slash or host lowercasing of `Url`.
pub fn validate_url(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| Error::Validation(format!("Invalid URL format: {}", e)))?;

    if !url.has_host() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Validation(format!("Invalid URL format: {}", raw)));
    }

    Ok(trimmed)
}

/// Splits a comma-separated keyword list.
pub fn parse_keywords(raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(Error::Validation("Keywords cannot be empty".to_string()));
    }

    let keywords: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect();

    if keywords.is_empty() {
        return Err(Error::Validation("No valid keywords provided".to_string()));
    }
    if keywords.len() > MAX_KEYWORDS {
        return Err(Error::Validation(format!(
            "Too many keywords (max {})",
            MAX_KEYWORDS
        )));
    }

    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LinkInfo;

    #[test]
    fn test_valid_urls() {
        assert!(validate_url("https://example.com/page").is_ok());
        assert!(validate_url(" http://localhost:8080 ").is_ok());
    }

    #[test]
    fn test_validated_url_keeps_typed_form() {
        let url = validate_url("  https://Example.com ").unwrap();
        assert_eq!(url, "https://Example.com");

        let self_link = LinkInfo::new(url, "https://Example.com", "Home", false);
        assert!(self_link.is_internal);
    }

    #[test]
    fn test_invalid_urls() {
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("mailto:someone@example.com").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_parse_keywords() {
        let keywords = parse_keywords(" seo , rust crates,, ").unwrap();
        assert_eq!(keywords, vec!["seo", "rust crates"]);
    }

    #[test]
    fn test_keyword_limits() {
        assert!(matches!(parse_keywords("  "), Err(Error::Validation(_))));
        assert!(matches!(parse_keywords(",,,"), Err(Error::Validation(_))));

        let fifty = vec!["k"; 50].join(",");
        assert_eq!(parse_keywords(&fifty).unwrap().len(), 50);
        let fifty_one = vec!["k"; 51].join(",");
        assert!(parse_keywords(&fifty_one).is_err());
    }
}
