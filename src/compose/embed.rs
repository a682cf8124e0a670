//! Embeds an asset's icon into a [`CompositeFrame`].
//!
//! The icon lives in a nested `<svg>` with its own `0 0 56 56` viewBox, a
//! fixed height of 30, placed at `x=0`, `y=25%`. The nested document's single
//! child (the icon's own root, or an `<image>` for rasters) is stretched to
//! 100% of it in both axes.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::document::Element;
use super::frame::{CompositeFrame, frame_view_box};
use crate::error::SkipReason;
use crate::record::{AssetRecord, Payload, RasterBytes, VectorMarkup};

/// Height of the nested icon document in frame units.
pub const EMBED_HEIGHT: u32 = 30;

/// Vertical offset of the nested icon document.
pub const EMBED_TOP: &str = "25%";

/// Outcome of composing one asset.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    Composed(CompositeIcon),
    Skipped(SkipReason),
}

impl Embedding {
    pub fn composed(self) -> Option<CompositeIcon> {
        match self {
            Self::Composed(icon) => Some(icon),
            Self::Skipped(_) => None,
        }
    }
}

/// A finished composite document.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeIcon {
    document: Element,
}

impl CompositeIcon {
    pub fn document(&self) -> &Element {
        &self.document
    }

    pub fn to_svg(&self) -> String {
        self.document.to_xml()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_svg().into_bytes()
    }
}

impl CompositeFrame {
    /// Embeds the record's payload, consuming the frame.
    ///
    /// Records without a usable payload produce [`Embedding::Skipped`] and the
    /// frame is dropped untouched.
    pub fn embed(self, record: &AssetRecord) -> Embedding {
        let child = match &record.payload {
            Ok(Payload::Vector(markup)) => Element::new("svg").markup(stretch_root(markup)),
            Ok(Payload::Raster(raster)) => Element::new("svg").child(raster_image(raster)),
            Err(reason) => return Embedding::Skipped(*reason),
        };

        let nested = child
            .attr("viewBox", frame_view_box())
            .attr("height", EMBED_HEIGHT)
            .attr("x", 0)
            .attr("y", EMBED_TOP);

        Embedding::Composed(CompositeIcon {
            document: self.into_root().child(nested),
        })
    }
}

fn raster_image(raster: &RasterBytes) -> Element {
    Element::new("image")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("xlink:href", raster.data_uri())
}

/// Rewrites the icon's root tag so it fills its container.
///
/// Existing `width`/`height` are dropped and `100%` set on both; all other
/// attributes and the body are kept byte-for-byte. A root without a
/// `viewBox` gets one from its original `width`/`height` so its user space
/// still maps onto the container. Markup whose root tag cannot be read is
/// returned unchanged.
fn stretch_root(markup: &VectorMarkup) -> String {
    let text = markup.as_str();
    let mut reader = Reader::from_str(text);

    let (tag, empty) = loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => break (tag, false),
            Ok(Event::Empty(tag)) => break (tag, true),
            Ok(Event::Eof) | Err(_) => return text.to_string(),
            Ok(_) => continue,
        }
    };
    let body_start = reader.buffer_position() as usize;

    let mut out = String::with_capacity(text.len() + 32);
    let mut has_view_box = false;
    let mut width = None;
    let mut height = None;
    out.push('<');
    out.push_str(&String::from_utf8_lossy(tag.name().as_ref()));
    for attr in tag.attributes().with_checks(false) {
        let Ok(attr) = attr else {
            return text.to_string();
        };
        let key = attr.key.as_ref();
        match key {
            b"width" => {
                width = user_units(&attr.value);
                continue;
            }
            b"height" => {
                height = user_units(&attr.value);
                continue;
            }
            b"viewBox" => has_view_box = true,
            _ => {}
        }
        out.push(' ');
        out.push_str(&String::from_utf8_lossy(key));
        out.push_str("=\"");
        // Values stay escaped as found; only a bare `"` needs re-escaping
        // when the source used single quotes.
        out.push_str(&String::from_utf8_lossy(&attr.value).replace('"', "&quot;"));
        out.push('"');
    }
    if !has_view_box {
        if let (Some(width), Some(height)) = (width, height) {
            out.push_str(&format!(r#" viewBox="0 0 {width} {height}""#));
        }
    }
    out.push_str(r#" width="100%" height="100%""#);
    out.push_str(if empty { "/>" } else { ">" });
    out.push_str(&text[body_start..]);
    out
}

/// A plain or `px` length as a positive number of user units.
fn user_units(value: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(value).ok()?.trim();
    let number = text.strip_suffix("px").unwrap_or(text).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite() && *n > 0.0)
}
