//! HTML parser for extracting candidate links
//!
//! Candidate links are the anchors nested inside `<li>` elements whose href
//! passes the configured `LinkFilter`. Everything else on the page (navigation
//! bars, inline prose links, footers) is ignored.

use crate::url::{resolve_link, LinkFilter};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracted information from a list page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Candidate links, deduplicated and in ascending order
    pub links: BTreeSet<String>,
}

/// Parses a list page and extracts its candidate links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
/// * `filter` - Which hrefs count as candidates
///
/// # Example
///
/// ```
/// use url::Url;
/// use wikiscrape::crawler::parse_list_page;
/// use wikiscrape::url::LinkFilter;
///
/// let html = r#"<ul><li><a href="/wiki/Python">Python</a></li><li><a href="/not-wiki">No</a></li></ul>"#;
/// let base_url = Url::parse("https://en.wikipedia.org").unwrap();
/// let parsed = parse_list_page(html, &base_url, LinkFilter::WikiPrefix);
/// assert_eq!(
///     parsed.links.into_iter().collect::<Vec<_>>(),
///     vec!["https://en.wikipedia.org/wiki/Python".to_string()]
/// );
/// ```
pub fn parse_list_page(html: &str, base_url: &Url, filter: LinkFilter) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        links: extract_list_links(&document, base_url, filter),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the list-item anchors of a document accepted by `filter`
///
/// Every `<a href>` that has an `<li>` ancestor is considered. Accepted hrefs
/// are resolved against `base_url`; hrefs that do not resolve to an HTTP(S)
/// URL are dropped.
pub fn extract_list_links(
    document: &Html,
    base_url: &Url,
    filter: LinkFilter,
) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(anchor_selector) = Selector::parse("li a[href]") else {
        return links;
    };

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !filter.accepts(href) {
            continue;
        }

        if let Some(absolute_url) = resolve_link(href, base_url) {
            links.insert(absolute_url);
        }
    }

    links
}
