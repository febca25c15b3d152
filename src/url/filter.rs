use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;

/// Rule deciding which list-item hrefs are candidate links
///
/// # Examples
///
/// ```
/// use wikiscrape::url::LinkFilter;
///
/// assert!(LinkFilter::WikiPrefix.accepts("/wiki/Rust"));
/// assert!(!LinkFilter::WikiPrefix.accepts("/w/index.php"));
///
/// assert!(LinkFilter::NonFragment.accepts("/w/index.php"));
/// assert!(!LinkFilter::NonFragment.accepts("#History"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LinkFilter {
    /// Keep hrefs beginning with `/wiki`
    #[default]
    WikiPrefix,
    /// Keep every href except same-page `#fragment` anchors
    NonFragment,
}

impl LinkFilter {
    /// Returns true if the href should be followed
    pub fn accepts(&self, href: &str) -> bool {
        match self {
            Self::WikiPrefix => href.starts_with("/wiki"),
            Self::NonFragment => !href.is_empty() && !href.starts_with('#'),
        }
    }

    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WikiPrefix => "wiki-prefix",
            Self::NonFragment => "non-fragment",
        }
    }
}

impl fmt::Display for LinkFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
