use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

use crate::models::{ImageInfo, LinkInfo, PageContent, HEADING_TAGS};

const SKIPPED_TEXT_TAGS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static IMAGES: Lazy<Selector> = Lazy::new(|| selector("img"));
static LINKS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static CANONICAL: Lazy<Selector> = Lazy::new(|| selector(r#"link[rel~="canonical"]"#));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector(r#"meta[property="og:description"]"#));
static HEADINGS: Lazy<Vec<(&'static str, Selector)>> =
    Lazy::new(|| HEADING_TAGS.iter().map(|tag| (*tag, selector(tag))).collect());

/// Extracts the content model from raw HTML fetched from `url`.
pub fn parse_page(url: &str, html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = first_text(&document, &TITLE);
    let meta_description = document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    let headings: BTreeMap<String, Vec<String>> = HEADINGS
        .iter()
        .map(|(tag, sel)| {
            let texts = document.select(sel).map(|h| element_text(&h)).collect();
            (tag.to_string(), texts)
        })
        .collect();
    let h1 = headings
        .get("h1")
        .and_then(|h| h.first())
        .cloned()
        .filter(|text| !text.is_empty());

    let body_text = visible_text(&document);
    let word_count = body_text.split_whitespace().count();

    let images = document
        .select(&IMAGES)
        .filter(|img| !in_skipped_region(img))
        .map(|img| {
            let attrs = img.value();
            ImageInfo::new(attrs.attr("src").unwrap_or(""), attrs.attr("alt").unwrap_or(""))
        })
        .collect();

    let links = document
        .select(&LINKS)
        .filter(|a| !in_skipped_region(a))
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let nofollow = a
                .value()
                .attr("rel")
                .map(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("nofollow")))
                .unwrap_or(false);
            Some(LinkInfo::new(url, href, element_text(&a), nofollow))
        })
        .collect();

    let canonical = document
        .select(&CANONICAL)
        .next()
        .map(|link| link.value().attr("href").unwrap_or("").to_string());
    let og_title = meta_property(&document, &OG_TITLE);
    let og_description = meta_property(&document, &OG_DESCRIPTION);

    PageContent {
        url: url.to_string(),
        title,
        meta_description,
        h1,
        headings,
        body_text,
        images,
        links,
        word_count,
        canonical,
        og_title,
        og_description,
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// True when the element sits inside a subtree excluded from the body text.
fn in_skipped_region(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| SKIPPED_TEXT_TAGS.contains(&ancestor.value().name()))
}

fn first_text(document: &Html, sel: &Selector) -> Option<String> {
    document
        .select(sel)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

fn meta_property(document: &Html, sel: &Selector) -> Option<String> {
    document
        .select(sel)
        .next()
        .map(|meta| meta.value().attr("content").unwrap_or("").trim().to_string())
}

/// Document text without scripts, styles and page chrome, whitespace-collapsed.
fn visible_text(document: &Html) -> String {
    let mut chunks = Vec::new();
    collect_text(document.root_element(), &mut chunks);
    chunks.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, chunks: &mut Vec<&'a str>) {
    if SKIPPED_TEXT_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, chunks);
        } else if let Node::Text(text) = child.value() {
            let text: &str = text;
            let text = text.trim();
            if !text.is_empty() {
                chunks.push(text);
            }
        }
    }
}
