//! Stencil library packaging.
//!
//! A library document wraps a JSON array of entries in a single
//! `<mxlibrary>` element, which is the layout the diagramming tool imports:
//!
//! ```text
//! <mxlibrary>[{"data":"data:image/svg+xml;base64,...","title":"name","aspect":"fixed","w":56,"h":56}]</mxlibrary>
//! ```
//!
//! Packaging a group is all-or-nothing: if any file cannot be measured, no
//! document is produced for that group.

pub mod measure;

pub use measure::{SizePx, measure};

use base64::{Engine as _, engine::general_purpose};
use quick_xml::escape::{partial_escape, unescape};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::library::LibraryFile;
use measure::file_extension;

/// Root element of a library document.
pub const LIBRARY_ROOT: &str = "mxlibrary";

/// The only aspect mode emitted.
pub const ASPECT_FIXED: &str = "fixed";

// ============================================================================
// StencilEntry
// ============================================================================

/// One shape in a stencil library.
///
/// Field names are the library format's keys and must not be renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StencilEntry {
    /// `data:image/{type};base64,{payload}`
    pub data: String,
    pub title: String,
    pub aspect: String,
    pub w: u32,
    pub h: u32,
}

impl StencilEntry {
    /// Builds the entry for one finished file.
    pub fn from_file(file_name: &str, bytes: &[u8]) -> Result<Self> {
        let size = measure(file_name, bytes)?;
        Ok(Self {
            data: format!(
                "data:image/{};base64,{}",
                media_subtype(file_extension(file_name)),
                general_purpose::STANDARD.encode(bytes)
            ),
            title: title_of(file_name).to_string(),
            aspect: ASPECT_FIXED.to_string(),
            w: size.width,
            h: size.height,
        })
    }
}

/// `svg` becomes `svg+xml`; every other extension passes through.
pub fn media_subtype(extension: &str) -> &str {
    if extension == "svg" {
        "svg+xml"
    } else {
        extension
    }
}

/// File name without its last extension.
fn title_of(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name)
}

// ============================================================================
// StencilDocument
// ============================================================================

/// A packaged library for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StencilDocument {
    pub name: String,
    pub entries: Vec<StencilEntry>,
}

impl StencilDocument {
    /// Serializes the entries as one JSON array inside the root element.
    pub fn to_xml(&self) -> Result<String> {
        let json = serde_json::to_string(&self.entries)?;
        Ok(format!(
            "<{LIBRARY_ROOT}>{}</{LIBRARY_ROOT}>",
            partial_escape(json.as_str())
        ))
    }

    /// Reads a library document back.
    ///
    /// Returns `None` when the text is not a single root element holding a
    /// JSON array of entries.
    pub fn from_xml(name: impl Into<String>, text: &str) -> Option<Self> {
        let inner = text
            .trim()
            .strip_prefix(&format!("<{LIBRARY_ROOT}>"))?
            .strip_suffix(&format!("</{LIBRARY_ROOT}>"))?;
        let json = unescape(inner).ok()?;
        let entries = serde_json::from_str(&json).ok()?;
        Some(Self {
            name: name.into(),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Packages files into one library document, preserving their order.
///
/// The first file that cannot be measured aborts the whole group.
pub fn package(name: &str, files: &[LibraryFile]) -> Result<StencilDocument> {
    let entries = files
        .iter()
        .map(|file| StencilEntry::from_file(&file.file_name, &file.bytes))
        .collect::<Result<Vec<_>>>()?;

    Ok(StencilDocument {
        name: name.to_string(),
        entries,
    })
}
