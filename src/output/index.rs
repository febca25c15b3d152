//! JSON output index
//!
//! The index maps every accepted source URL to its language record, or to an
//! empty object when field extraction is disabled. Keys are kept sorted so a
//! run over a stable cache always writes the same bytes.

use crate::extract::LanguageRecord;
use crate::ScrapeError;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Indentation of the written index
const INDENT: &[u8] = b"    ";

/// A single value of the output index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    /// Complete language record
    Language(LanguageRecord),
    /// Link recorded without extraction, written as `{}`
    Placeholder,
}

impl Serialize for IndexEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Language(record) => record.serialize(serializer),
            Self::Placeholder => serializer.collect_map(std::iter::empty::<((), ())>()),
        }
    }
}

/// Accumulated results of a run, keyed by source URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl OutputIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a language record under its URL
    pub fn insert_record(&mut self, record: LanguageRecord) {
        self.entries
            .insert(record.url.clone(), IndexEntry::Language(record));
    }

    /// Adds a URL with an empty placeholder value
    pub fn insert_placeholder(&mut self, url: impl Into<String>) {
        self.entries.insert(url.into(), IndexEntry::Placeholder);
    }

    /// Looks up the entry of a URL
    pub fn get(&self, url: &str) -> Option<&IndexEntry> {
        self.entries.get(url)
    }

    /// Number of URLs in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index holds no URLs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over URLs and entries in ascending URL order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    /// Serializes the index with four-space indentation
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ScrapeError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        Ok(buffer)
    }

    /// Serializes the index into a writer with four-space indentation
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ScrapeError> {
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.entries.serialize(&mut serializer)?;
        Ok(())
    }
}

/// Writes the index to a JSON file, replacing any previous content
///
/// # Arguments
///
/// * `index` - The accumulated results
/// * `output_path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the index
/// * `Err(ScrapeError)` - Failed to create or write the file
pub fn write_index(index: &OutputIndex, output_path: &Path) -> Result<(), ScrapeError> {
    let output_error = |source| ScrapeError::Output {
        path: output_path.to_path_buf(),
        source,
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }

    let file = File::create(output_path).map_err(output_error)?;
    let mut writer = BufWriter::new(file);
    index.write_json(&mut writer)?;
    writer.flush().map_err(output_error)?;

    Ok(())
}
