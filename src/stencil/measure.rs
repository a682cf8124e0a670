//! Width/height detection for finished asset files.
//!
//! SVG documents are parsed with usvg and measured by their declared size
//! (`width`/`height`, falling back to the `viewBox`). Raster files only have
//! their headers decoded.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use resvg::usvg::{Options, Tree};

use crate::error::{Error, Result};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Text after the last `.` of a file name, or `""`.
pub(crate) fn file_extension(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// Measures `bytes`, choosing the parser from the file name's extension.
///
/// Zero-sized results are rejected so no stencil entry is ever emitted
/// without real dimensions.
pub fn measure(file_name: &str, bytes: &[u8]) -> Result<SizePx> {
    let extension = file_extension(file_name);
    let size = if extension.eq_ignore_ascii_case("svg") {
        measure_svg(file_name, bytes)?
    } else {
        measure_raster(file_name, extension, bytes)?
    };

    if size.width == 0 || size.height == 0 {
        return Err(Error::unmeasurable(
            file_name,
            format!("zero-sized ({}x{})", size.width, size.height),
        ));
    }
    Ok(size)
}

fn measure_svg(file_name: &str, bytes: &[u8]) -> Result<SizePx> {
    let tree = Tree::from_data(bytes, &Options::default())
        .map_err(|e| Error::unmeasurable(file_name, e))?;
    let size = tree.size();
    Ok(SizePx::new(
        to_pixels(size.width()),
        to_pixels(size.height()),
    ))
}

fn measure_raster(file_name: &str, extension: &str, bytes: &[u8]) -> Result<SizePx> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::unmeasurable(file_name, e))?;

    if reader.format().is_none() {
        if let Some(format) = ImageFormat::from_extension(extension) {
            reader.set_format(format);
        }
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::unmeasurable(file_name, e))?;
    Ok(SizePx::new(width, height))
}

fn to_pixels(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn svg_view_box_size() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 56 56"/>"#;
        assert_eq!(measure("a.svg", svg).unwrap(), SizePx::new(56, 56));
    }

    #[test]
    fn svg_declared_size_wins() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="80" viewBox="0 0 12 8"/>"#;
        assert_eq!(measure("a.svg", svg).unwrap(), SizePx::new(120, 80));
    }

    #[test]
    fn png_header_size() {
        assert_eq!(measure("icon.png", &png(7, 3)).unwrap(), SizePx::new(7, 3));
    }

    #[test]
    fn corrupted_raster_is_unmeasurable() {
        let mut bytes = png(4, 4);
        bytes.truncate(12);
        let err = measure("broken.png", &bytes).unwrap_err();
        assert!(matches!(
            err,
            Error::UnmeasurableDimensions { ref file, .. } if file == "broken.png"
        ));
    }

    #[test]
    fn garbage_svg_is_unmeasurable() {
        assert!(measure("x.svg", b"not xml at all").is_err());
    }

    #[test]
    fn extension_helper() {
        assert_eq!(file_extension("a.b.png"), "png");
        assert_eq!(file_extension("plain"), "");
    }
}
