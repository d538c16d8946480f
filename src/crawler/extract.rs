//! Content extraction for the crawler module
//!
//! Best-effort parsing of raw markup into title, headings, and body text.
//! Extraction never fails: malformed HTML degrades to empty strings, a
//! missing title falls back to the first top-level heading and then to a
//! fixed placeholder.

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

/// Placeholder title for pages without a usable title or heading
pub const UNTITLED_PAGE: &str = "Untitled Page";

/// Extracted text content of one page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page title, never empty
    pub title: String,

    /// All heading text (levels 1-3), whitespace-normalized
    pub headings: String,

    /// All paragraph text, whitespace-normalized
    pub body: String,
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn select_joined_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    let parts: Vec<String> = document
        .select(&selector)
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    parts.join(" ")
}

/// Parse raw markup into a [`PageContent`] triple.
pub fn extract(raw_html: &str) -> PageContent {
    let document = Html::parse_document(raw_html);

    let mut title = select_joined_text(&document, "title");
    if title.is_empty() {
        title = Selector::parse("h1")
            .ok()
            .and_then(|h1| {
                document
                    .select(&h1)
                    .map(|element| normalize_whitespace(&element.text().collect::<String>()))
                    .find(|text| !text.is_empty())
            })
            .unwrap_or_default();
    }
    if title.is_empty() {
        title = UNTITLED_PAGE.to_string();
    }

    PageContent {
        title,
        headings: select_joined_text(&document, "h1, h2, h3"),
        body: select_joined_text(&document, "p"),
    }
}

/// Extract outbound link targets from a fetched page.
///
/// Resolves relative hrefs against `page_url` and skips anchors and
/// non-HTTP schemes. Returned URLs are absolute but not yet canonical;
/// the orchestrator canonicalizes and filters them before enqueueing.
pub fn discover_links(raw_html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(raw_html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("javascript:")
            || href.starts_with("data:")
        {
            continue;
        }

        match page_url.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => debug!("Skipping unresolvable link {}: {}", href, e),
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_title_element() {
        let content = extract("<html><head><title>Talent Portal</title></head><body><h1>Welcome</h1></body></html>");
        assert_eq!(content.title, "Talent Portal");
    }

    #[test]
    fn test_extract_falls_back_to_first_heading() {
        let content = extract("<html><body><h1>Find Work</h1><p>Browse roles.</p></body></html>");
        assert_eq!(content.title, "Find Work");
    }

    #[test]
    fn test_extract_falls_back_to_placeholder() {
        let content = extract("<html><body><p>no title anywhere</p></body></html>");
        assert_eq!(content.title, UNTITLED_PAGE);
    }

    #[test]
    fn test_extract_concatenates_headings() {
        let html = "<h1>One</h1><h2>  Two\n  words </h2><h3>Three</h3><h4>ignored</h4>";
        let content = extract(html);
        assert_eq!(content.headings, "One Two words Three");
    }

    #[test]
    fn test_extract_concatenates_paragraphs() {
        let html = "<p>First   paragraph.</p><div><p>Second\nparagraph.</p></div>";
        let content = extract(html);
        assert_eq!(content.body, "First paragraph. Second paragraph.");
    }

    #[test]
    fn test_extract_tolerates_malformed_markup() {
        let content = extract("<html><body><p>unclosed<div><h1>Broken");
        assert!(!content.title.is_empty());
    }

    #[test]
    fn test_extract_empty_input() {
        let content = extract("");
        assert_eq!(content.title, UNTITLED_PAGE);
        assert_eq!(content.headings, "");
        assert_eq!(content.body, "");
    }

    #[test]
    fn test_discover_links_resolves_relative() {
        let page_url = Url::parse("https://x.com/jobs/list").unwrap();
        let links = discover_links(
            r#"<a href="/about">About</a><a href="detail/1">Detail</a>"#,
            &page_url,
        );
        assert_eq!(
            links,
            vec![
                "https://x.com/about".to_string(),
                "https://x.com/jobs/detail/1".to_string(),
            ]
        );
    }

    #[test]
    fn test_discover_links_skips_non_navigable() {
        let page_url = Url::parse("https://x.com/").unwrap();
        let links = discover_links(
            r##"<a href="#top">Top</a>
               <a href="mailto:hi@x.com">Mail</a>
               <a href="tel:+15551234">Call</a>
               <a href="javascript:void(0)">JS</a>
               <a href="">Empty</a>
               <a href="https://other.com/page">Other</a>"##,
            &page_url,
        );
        // Foreign origins survive discovery; the filter drops them later.
        assert_eq!(links, vec!["https://other.com/page".to_string()]);
    }
}
