use serde::{Deserialize, Serialize};

/// Structured data extracted from one programming-language article
///
/// Field order is the serialization order of the output index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    /// Display name of the language
    pub name: String,

    /// Article URL the record was extracted from
    pub url: String,

    /// Infobox "Paradigm" value
    pub paradigm: String,

    /// Infobox "First appeared" value
    pub first_appeared: String,

    /// Infobox "Filename extensions" value
    pub file_extensions: String,

    /// Number of level-2 headings in the article body
    pub header_sections: usize,

    /// Number of `/wiki/` links in the article body
    pub internal_links: usize,
}

/// Every field an article yields, before the completeness check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFields {
    pub name: String,
    pub paradigm: Option<String>,
    pub first_appeared: Option<String>,
    pub file_extensions: Option<String>,
    pub header_sections: usize,
    pub internal_links: usize,
}

impl ArticleFields {
    /// Names of the infobox fields that were not found
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.paradigm.is_none() {
            missing.push("paradigm");
        }
        if self.first_appeared.is_none() {
            missing.push("first_appeared");
        }
        if self.file_extensions.is_none() {
            missing.push("file_extensions");
        }
        missing
    }

    /// Builds a record if paradigm, first-appeared and filename extensions
    /// were all found
    pub fn into_record(self, url: &str) -> Option<LanguageRecord> {
        Some(LanguageRecord {
            name: self.name,
            url: url.to_string(),
            paradigm: self.paradigm?,
            first_appeared: self.first_appeared?,
            file_extensions: self.file_extensions?,
            header_sections: self.header_sections,
            internal_links: self.internal_links,
        })
    }
}
