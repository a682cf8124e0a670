//! Flat icons synthesized from icon-font path data.
//!
//! Glyph packages map glyph names to raw SVG path data. Each glyph becomes a
//! standalone single-path SVG on a `0 0 510 510` viewBox, which the stencil
//! packager can measure like any other asset.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::sanitize_filename;

/// Fill applied to every glyph path.
pub const GLYPH_FILL: &str = "#0a6ed1";

/// One glyph from a bundled icon font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDefinition {
    pub collection: String,
    pub name: String,
    pub path_data: String,
}

impl GlyphDefinition {
    pub fn new(
        collection: impl Into<String>,
        name: impl Into<String>,
        path_data: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            name: name.into(),
            path_data: path_data.into(),
        }
    }

    /// Renders the glyph as SVG text.
    ///
    /// Pure: the same definition always yields byte-identical output.
    pub fn to_svg(&self) -> String {
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 510 510" preserveAspectRatio="xMidYMid">"#,
                "<defs><style>.cls-1{{fill:{fill};}}</style></defs>",
                "<title>{title}</title>",
                r#"<path class="cls-1" d="{path}"/>"#,
                "</svg>"
            ),
            fill = GLYPH_FILL,
            title = escape(self.name.as_str()),
            path = escape(self.path_data.as_str()),
        )
    }

    /// File stem, with the same character rules as catalog assets.
    pub fn stem(&self) -> String {
        sanitize_filename(&self.name)
    }
}

// ============================================================================
// GlyphPackage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphPath {
    pub path: String,
}

/// A bundled glyph set: `{"collection": "...", "data": {"name": {"path": "..."}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphPackage {
    pub collection: String,
    pub data: BTreeMap<String, GlyphPath>,
}

impl GlyphPackage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&content)
    }

    /// All glyphs, ordered by name.
    pub fn glyphs(&self) -> Vec<GlyphDefinition> {
        self.data
            .iter()
            .map(|(name, glyph)| GlyphDefinition::new(&self.collection, name, &glyph.path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_output() {
        let glyph = GlyphDefinition::new("SAP-icons", "accept", "M0 0L10 10z");
        assert_eq!(
            glyph.to_svg(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 510 510" preserveAspectRatio="xMidYMid">"#,
                "<defs><style>.cls-1{fill:#0a6ed1;}</style></defs>",
                "<title>accept</title>",
                r#"<path class="cls-1" d="M0 0L10 10z"/>"#,
                "</svg>"
            )
        );
    }

    #[test]
    fn synthesis_is_deterministic() {
        let a = GlyphDefinition::new("c", "n", "M1 2");
        let b = GlyphDefinition::new("c", "n", "M1 2");
        assert_eq!(a.to_svg(), b.to_svg());
        assert_ne!(a.to_svg(), GlyphDefinition::new("c", "n", "M1 3").to_svg());
    }

    #[test]
    fn title_is_escaped() {
        let svg = GlyphDefinition::new("c", "a<b", "M0 0").to_svg();
        assert!(svg.contains("<title>a&lt;b</title>"));
    }

    #[test]
    fn package_glyphs_sorted_by_name() {
        let json = r#"{"collection":"tnt","data":{"zeta":{"path":"M2"},"alpha":{"path":"M1"}}}"#;
        let package = GlyphPackage::from_json(json).unwrap();
        let glyphs = package.glyphs();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].name, "alpha");
        assert_eq!(glyphs[0].collection, "tnt");
        assert_eq!(glyphs[1].path_data, "M2");
    }

    #[test]
    fn stem_is_sanitized() {
        assert_eq!(GlyphDefinition::new("c", "a b/c", "").stem(), "a-bc");
    }
}
