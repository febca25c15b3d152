//! Field extraction from language articles
//!
//! This module turns an article page into a `LanguageRecord`:
//! - Locating the article body (`#bodyContent`) and the infobox table
//! - Reading the Paradigm, First appeared and Filename extensions rows
//! - Counting level-2 headings and internal `/wiki/` links
//!
//! A failed lookup leaves that one field empty. Only a page without an
//! infobox or article body produces no fields at all, and only a page with
//! all three infobox rows produces a record.

mod infobox;
mod record;

pub use infobox::{file_extensions, first_appeared, paradigm, row_value};
pub use record::{ArticleFields, LanguageRecord};

use infobox::element_text;
use scraper::{ElementRef, Html, Selector};

/// Extracts every available field from an article document
///
/// # Arguments
///
/// * `document` - The parsed article page
/// * `page_url` - The article URL, used for the name fallback
///
/// # Returns
///
/// * `Some(ArticleFields)` - The infobox and article body were found
/// * `None` - Either the infobox or the article body is missing
pub fn extract_article(document: &Html, page_url: &str) -> Option<ArticleFields> {
    let infobox_selector = Selector::parse("table.infobox").ok()?;
    let article_selector = Selector::parse("#bodyContent").ok()?;

    let infobox = document.select(&infobox_selector).next();
    let article = document.select(&article_selector).next();
    let (Some(infobox), Some(article)) = (infobox, article) else {
        tracing::info!("Infobox or article not found for: {}", page_url);
        return None;
    };

    Some(ArticleFields {
        name: extract_name(document, &article)
            .unwrap_or_else(|| name_from_url(page_url).to_string()),
        paradigm: paradigm(&infobox),
        first_appeared: first_appeared(&infobox),
        file_extensions: file_extensions(&infobox),
        header_sections: count_headers(&article),
        internal_links: count_internal_links(&article),
    })
}

/// Parses an article page and builds its language record
///
/// Returns None when the page lacks an infobox or article body, or when the
/// infobox is missing any of paradigm, first-appeared or filename extensions.
///
/// # Example
///
/// ```
/// use wikiscrape::extract_language;
///
/// let html = r#"
///     <h1>Rust</h1>
///     <div id="bodyContent">
///         <table class="infobox">
///             <tr><th>Paradigm</th><td>Multi-paradigm</td></tr>
///             <tr><th>First appeared</th><td>2015</td></tr>
///             <tr><th>Filename extensions</th><td>.rs</td></tr>
///         </table>
///         <h2>History</h2>
///         <a href="/wiki/Mozilla">Mozilla</a>
///     </div>
/// "#;
/// let record = extract_language(html, "https://en.wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(record.name, "Rust");
/// assert_eq!(record.header_sections, 1);
/// assert_eq!(record.internal_links, 1);
/// ```
pub fn extract_language(html: &str, page_url: &str) -> Option<LanguageRecord> {
    let document = Html::parse_document(html);
    let fields = extract_article(&document, page_url)?;
    complete_record(fields, page_url)
}

/// Applies the completeness check to extracted fields and logs the verdict
///
/// Returns a record only when paradigm, first-appeared and filename
/// extensions were all found.
pub fn complete_record(fields: ArticleFields, page_url: &str) -> Option<LanguageRecord> {
    let name = fields.name.clone();
    let missing = fields.missing_fields();

    match fields.into_record(page_url) {
        Some(record) => {
            tracing::info!("Appending info for: {}", name);
            Some(record)
        }
        None => {
            tracing::info!(
                "Not enough info for: {} (missing {})",
                name,
                missing.join(", ")
            );
            None
        }
    }
}

/// Text of the first `<h1>`, preferring one inside the article body
fn extract_name(document: &Html, article: &ElementRef) -> Option<String> {
    let heading_selector = Selector::parse("h1").ok()?;

    article
        .select(&heading_selector)
        .next()
        .or_else(|| document.select(&heading_selector).next())
        .map(|heading| element_text(&heading))
        .filter(|name| !name.is_empty())
}

/// Last path segment of a URL string
fn name_from_url(page_url: &str) -> &str {
    page_url.rsplit('/').next().unwrap_or(page_url)
}

/// Number of level-2 headings in the article body
fn count_headers(article: &ElementRef) -> usize {
    Selector::parse("h2")
        .map(|selector| article.select(&selector).count())
        .unwrap_or(0)
}

/// Number of anchors in the article body whose href starts with `/wiki/`
fn count_internal_links(article: &ElementRef) -> usize {
    Selector::parse("a[href]")
        .map(|selector| {
            article
                .select(&selector)
                .filter(|a| {
                    a.value()
                        .attr("href")
                        .is_some_and(|href| href.starts_with("/wiki/"))
                })
                .count()
        })
        .unwrap_or(0)
}
