use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Parsed representation of a fetched page. Built once per run and shared
/// read-only by every analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1: Option<String>,
    /// Heading texts keyed by tag (`h1`..`h6`), in document order.
    pub headings: BTreeMap<String, Vec<String>>,
    pub body_text: String,
    pub images: Vec<ImageInfo>,
    pub links: Vec<LinkInfo>,
    pub word_count: usize,
    pub canonical: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
}

impl PageContent {
    pub fn headings_for(&self, tag: &str) -> &[String] {
        self.headings.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn internal_links(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter().filter(|l| l.is_internal)
    }

    pub fn external_links(&self) -> impl Iterator<Item = &LinkInfo> {
        self.links.iter().filter(|l| l.is_external)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub has_alt: bool,
}

impl ImageInfo {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        let alt = alt.into();
        Self {
            src: src.into(),
            has_alt: !alt.trim().is_empty(),
            alt,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkInfo {
    pub href: String,
    pub text: String,
    pub is_internal: bool,
    pub is_external: bool,
    pub nofollow: bool,
}

impl LinkInfo {
    /// Relative hrefs and hrefs containing the page's own URL are internal.
    pub fn new(
        page_url: &str,
        href: impl Into<String>,
        text: impl Into<String>,
        nofollow: bool,
    ) -> Self {
        let href = href.into();
        let is_internal = !(href.starts_with("http://") || href.starts_with("https://"))
            || href.contains(page_url);
        Self {
            href,
            text: text.into(),
            is_internal,
            is_external: !is_internal,
            nofollow,
        }
    }
}
