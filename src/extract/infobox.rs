//! Infobox row lookups
//!
//! An infobox row is a `<th>` label cell followed by a value cell. Values are
//! returned with whitespace runs collapsed to single spaces.

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Collapses whitespace runs (including non-breaking spaces) and trims
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content of an element, whitespace collapsed
pub(crate) fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Finds the value cell of the first row whose label satisfies `is_label`
///
/// The value cell is the next sibling element of the label cell; text nodes
/// between the two are skipped.
pub fn row_value<F>(infobox: &ElementRef, is_label: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    let header_selector = Selector::parse("th").ok()?;

    let header = infobox
        .select(&header_selector)
        .find(|th| is_label(&element_text(th)))?;

    header
        .next_siblings()
        .find_map(ElementRef::wrap)
        .map(|value| element_text(&value))
}

/// Row labelled exactly "Paradigm"
pub fn paradigm(infobox: &ElementRef) -> Option<String> {
    row_value(infobox, |label| label == "Paradigm")
}

/// Row whose label contains "First appeared"
pub fn first_appeared(infobox: &ElementRef) -> Option<String> {
    let pattern = Regex::new(r"First\sappeared").ok()?;
    row_value(infobox, |label| pattern.is_match(label))
}

/// Row whose label contains "Filename extensions"
pub fn file_extensions(infobox: &ElementRef) -> Option<String> {
    let pattern = Regex::new(r"Filename\sextensions").ok()?;
    row_value(infobox, |label| pattern.is_match(label))
}
