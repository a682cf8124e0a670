//! Normalized asset records.
//!
//! A raw catalog entry (name, category, icon URL and whatever bytes could be
//! fetched for it) becomes an immutable [`AssetRecord`] with a filesystem-safe
//! filename, a cleaned category and a typed payload.

use std::collections::HashSet;

use base64::{Engine as _, engine::general_purpose};

use crate::catalog::CatalogEntry;
use crate::error::SkipReason;

// ============================================================================
// Payloads
// ============================================================================

/// SVG text that begins at its first `<svg` occurrence.
///
/// Any XML prolog, doctype or comment ahead of the root element is removed
/// exactly once, here. Composition code can rely on the invariant and must not
/// strip again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorMarkup(String);

impl VectorMarkup {
    /// Strips everything before the first `<svg`.
    ///
    /// Returns `None` when the text has no `<svg` at all.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find("<svg")?;
        Some(Self(text[start..].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Opaque raster bytes with the extension they were served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBytes {
    pub bytes: Vec<u8>,
    pub extension: String,
}

impl RasterBytes {
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            bytes,
            extension: extension.into(),
        }
    }

    /// `data:image/{extension};base64,{...}`
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/{};base64,{}",
            self.extension,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// The icon content of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Vector(VectorMarkup),
    Raster(RasterBytes),
}

impl Payload {
    /// Bytes written for the regular variant.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Vector(markup) => markup.as_str().as_bytes().to_vec(),
            Self::Raster(raster) => raster.bytes.clone(),
        }
    }
}

// ============================================================================
// AssetRecord
// ============================================================================

/// A catalog entry after normalization.
///
/// `payload` is `Err` when the entry cannot be composed; the record still
/// exists so the skip can be reported under its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub name: String,
    pub category: String,
    /// Filesystem-safe stem. Never contains `/`, `\`, spaces or commas.
    pub filename: String,
    /// Lowercase, without the leading dot.
    pub extension: String,
    pub payload: Result<Payload, SkipReason>,
}

impl AssetRecord {
    /// Normalizes a single catalog entry.
    ///
    /// `bytes` is `None` when the icon could not be fetched.
    pub fn normalize(entry: &CatalogEntry, bytes: Option<Vec<u8>>) -> Self {
        let extension = extension_from_url(&entry.icon);
        let payload = match bytes {
            None => Err(SkipReason::MissingPayload),
            Some(bytes) if extension == "svg" => {
                VectorMarkup::parse(&String::from_utf8_lossy(&bytes))
                    .map(Payload::Vector)
                    .ok_or(SkipReason::MalformedVectorMarkup)
            }
            Some(bytes) => Ok(Payload::Raster(RasterBytes::new(bytes, extension.clone()))),
        };

        Self {
            name: entry.name.clone(),
            category: sanitize_category(&entry.category),
            filename: sanitize_filename(&entry.name),
            extension,
            payload,
        }
    }
}

/// Normalizes a whole batch, keeping filenames unique within each category.
///
/// The first entry keeps its stem; later collisions get `-2`, `-3`, ... in
/// input order, skipping any suffix another entry already owns.
pub fn normalize_all<I>(entries: I) -> Vec<AssetRecord>
where
    I: IntoIterator<Item = (CatalogEntry, Option<Vec<u8>>)>,
{
    let mut stems = UniqueStems::new();

    entries
        .into_iter()
        .map(|(entry, bytes)| {
            let mut record = AssetRecord::normalize(&entry, bytes);
            record.filename = stems.claim(&record.category, &record.filename);
            record
        })
        .collect()
}

/// Hands out filename stems that are unique, ignoring case, within a scope.
///
/// A scope is whatever shares one output folder: a category, a glyph
/// collection, or `""` for a flat layout.
#[derive(Debug, Default)]
pub struct UniqueStems {
    taken: HashSet<(String, String)>,
}

impl UniqueStems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `stem`, or the first of `stem-2`, `stem-3`, ... still free in
    /// `scope`, and marks it taken.
    pub fn claim(&mut self, scope: &str, stem: &str) -> String {
        let mut candidate = stem.to_string();
        let mut n = 1;
        while !self
            .taken
            .insert((scope.to_string(), candidate.to_lowercase()))
        {
            n += 1;
            candidate = format!("{stem}-{n}");
        }
        candidate
    }
}

// ============================================================================
// Naming rules
// ============================================================================

/// Lowercased text after the final `.` of the URL.
///
/// A URL without any dot yields the whole (lowercased) URL.
pub fn extension_from_url(url: &str) -> String {
    let tail = match url.rfind('.') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };
    tail.to_lowercase()
}

/// Derives a filename stem from a display name.
///
/// Applied in order: remove `/` and `\`, then replace spaces with `-`, then
/// replace commas with `-`.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\'], "")
        .replace(' ', "-")
        .replace(',', "-")
}

/// Trims the category and replaces path separators with `-`.
///
/// The result is always a single plain path segment: `.` and `..` become
/// dashes.
pub fn sanitize_category(category: &str) -> String {
    let flat = category.trim().replace(['/', '\\'], "-");
    if !flat.is_empty() && flat.chars().all(|c| c == '.') {
        return "-".repeat(flat.len());
    }
    flat
}
