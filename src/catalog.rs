//! Service catalog input.
//!
//! The catalog is read from a JSON file, either the OData envelope served by
//! the discovery service (`{"d": {"results": [...]}}`) or a bare array of
//! entries. Icon bytes are retrieved through an [`IconFetcher`].

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One service from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    #[serde(rename = "Category", alias = "category", default)]
    pub category: String,

    #[serde(rename = "Icon", alias = "icon", alias = "iconUrl")]
    pub icon: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    OData { d: ODataResults },
    Plain(Vec<CatalogEntry>),
}

#[derive(Deserialize)]
struct ODataResults {
    results: Vec<CatalogEntry>,
}

/// Parses catalog JSON in either supported layout.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    Ok(match document {
        CatalogDocument::OData { d } => d.results,
        CatalogDocument::Plain(entries) => entries,
    })
}

/// Reads and parses a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_catalog(&content)
}

// ============================================================================
// Fetching
// ============================================================================

/// Retrieves the bytes behind an icon URL.
///
/// `None` means the icon is unavailable; the asset is then skipped as
/// missing rather than failing the batch.
pub trait IconFetcher: Sync {
    fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// Resolves icon URLs against a local mirror directory.
///
/// The file looked up is the last path segment of the URL, with any query
/// string or fragment removed.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn local_path(&self, url: &str) -> Option<PathBuf> {
        let without_query = url.split(['?', '#']).next().unwrap_or(url);
        let segment = without_query.rsplit('/').next()?;
        if segment.is_empty() || segment == ".." {
            return None;
        }
        Some(self.root.join(segment))
    }
}

impl IconFetcher for DirectoryFetcher {
    fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let path = self.local_path(url)?;
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!("no local icon for {url} at {}: {err}", path.display());
                None
            }
        }
    }
}

/// Pairs every entry with its fetched bytes, keeping catalog order.
pub fn fetch_all<F: IconFetcher + ?Sized>(
    entries: Vec<CatalogEntry>,
    fetcher: &F,
) -> Vec<(CatalogEntry, Option<Vec<u8>>)> {
    entries
        .into_iter()
        .map(|entry| {
            let bytes = fetcher.fetch(&entry.icon);
            (entry, bytes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_odata_envelope() {
        let json = r#"{"d":{"results":[
            {"Name":"Alert Notification","Category":"Foundation","Icon":"https://x.test/a.svg","Extra":1}
        ]}}"#;
        let entries = parse_catalog(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Alert Notification");
        assert_eq!(entries[0].category, "Foundation");
    }

    #[test]
    fn parses_plain_array_with_camel_case() {
        let json = r#"[{"name":"A","category":"B","iconUrl":"c.png"}]"#;
        let entries = parse_catalog(json).unwrap();
        assert_eq!(entries[0].icon, "c.png");
    }

    #[test]
    fn directory_fetcher_uses_last_segment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.svg"), b"<svg/>").unwrap();
        let fetcher = DirectoryFetcher::new(dir.path());

        assert_eq!(
            fetcher.fetch("https://x.test/icons/a.svg?v=2").as_deref(),
            Some(&b"<svg/>"[..])
        );
        assert!(fetcher.fetch("https://x.test/icons/missing.svg").is_none());
        assert!(fetcher.fetch("https://x.test/icons/").is_none());
    }
}
