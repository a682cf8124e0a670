//! icon-stencil: composite icon variants and stencil library packaging
//!
//! This crate turns a catalog of service icons (SVG or raster) into a
//! normalized asset library in two variants, plain and circled, optionally
//! adds flat icons synthesized from icon-font path data, and packages each
//! group of finished files into a stencil library for a diagramming tool.
//!
//! # Example
//!
//! ```
//! use icon_stencil::{
//!     AssetRecord, CatalogEntry, Generator, GeneratorConfig, MemorySink,
//! };
//!
//! let entry = CatalogEntry {
//!     name: "Alert Notification".into(),
//!     category: "Foundation".into(),
//!     icon: "https://example.test/alert.svg".into(),
//! };
//! let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"/>"#;
//! let records = vec![AssetRecord::normalize(&entry, Some(svg.to_vec()))];
//!
//! let generator = Generator::new(GeneratorConfig::new().with_workers(2)).unwrap();
//! let mut sink = MemorySink::new();
//! let report = generator.run(&records, &[], &mut sink);
//!
//! assert!(report.is_clean());
//! assert!(sink.get("circled/Alert-Notification.svg").is_some());
//! assert!(sink.get("libraries/regular.xml").is_some());
//! ```
//!
//! # Composing a single icon
//!
//! ```
//! use icon_stencil::{AssetRecord, CatalogEntry, CompositeFrame, Embedding, FrameStyle};
//!
//! let entry = CatalogEntry {
//!     name: "Logo".into(),
//!     category: String::new(),
//!     icon: "logo.png".into(),
//! };
//! let record = AssetRecord::normalize(&entry, Some(vec![0x89, b'P', b'N', b'G']));
//!
//! match CompositeFrame::new(&FrameStyle::default(), true).embed(&record) {
//!     Embedding::Composed(icon) => assert!(icon.to_svg().contains("data:image/png;base64,")),
//!     Embedding::Skipped(reason) => panic!("skipped: {reason}"),
//! }
//! ```

mod catalog;
mod compose;
mod config;
mod error;
mod glyph;
mod library;
mod pipeline;
mod record;
mod sink;
mod stencil;

pub use catalog::{CatalogEntry, DirectoryFetcher, IconFetcher, fetch_all, load_catalog, parse_catalog};
pub use compose::{
    CIRCLE_RADIUS, CompositeFrame, CompositeIcon, EMBED_HEIGHT, EMBED_TOP, Element, Embedding,
    FRAME_CENTER, FRAME_SIZE, Node, compose,
};
pub use config::{CONFIG_FILE_NAME, FrameFill, FrameStyle, GeneratorConfig};
pub use error::{Error, Result, SkipReason};
pub use glyph::{GLYPH_FILL, GlyphDefinition, GlyphPackage, GlyphPath};
pub use library::{GroupKey, GroupKind, LIBRARIES_DIR, LibraryFile, LibraryGroup, library_path};
pub use pipeline::{BatchReport, FailedGroup, FailedWrite, Generator, SkippedAsset};
pub use record::{
    AssetRecord, Payload, RasterBytes, UniqueStems, VectorMarkup, extension_from_url,
    normalize_all, sanitize_category, sanitize_filename,
};
pub use sink::{AssetSink, DirectorySink, MemorySink};
pub use stencil::{
    ASPECT_FIXED, LIBRARY_ROOT, SizePx, StencilDocument, StencilEntry, measure, media_subtype,
    package,
};
