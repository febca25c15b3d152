use std::path::{Path, PathBuf};
use url::Url;

/// File name used when a URL path names a directory
const INDEX_FILE: &str = "index.html";

/// Derives the cache file location of a URL
///
/// The file lives at `<root>/<host>[:port]<path>`. Query strings and
/// fragments do not take part, so `/wiki/Rust#History` and `/wiki/Rust`
/// share one file. A path that is empty or ends in `/` gets `index.html`
/// appended so that it names a file rather than a directory.
///
/// # Arguments
///
/// * `url` - The page URL
/// * `root` - The cache root directory
///
/// # Returns
///
/// * `Some(PathBuf)` - The cache file path
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use url::Url;
/// use wikiscrape::url::cache_path_for;
///
/// let url = Url::parse("https://en.wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(
///     cache_path_for(&url, Path::new("cache")),
///     Some(PathBuf::from("cache/en.wikipedia.org/wiki/Rust"))
/// );
/// ```
pub fn cache_path_for(url: &Url, root: &Path) -> Option<PathBuf> {
    let host = url.host_str()?;
    let netloc = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let mut path = root.join(netloc);
    for segment in url.path().split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }

    if url.path().is_empty() || url.path().ends_with('/') {
        path.push(INDEX_FILE);
    }

    Some(path)
}
