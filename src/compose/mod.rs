//! Composite icon construction.
//!
//! A [`CompositeFrame`] is the fixed 56×56 canvas, with or without a circular
//! border. [`CompositeFrame::embed`] places an asset's icon inside it and
//! returns an [`Embedding`]: either a finished [`CompositeIcon`] or the reason
//! the asset was skipped.
//!
//! Documents are built as immutable element trees ([`Element`]) and
//! serialized once; nothing is shared between assets.

pub mod document;
pub mod embed;
pub mod frame;

pub use document::{Element, Node};
pub use embed::{CompositeIcon, EMBED_HEIGHT, EMBED_TOP, Embedding};
pub use frame::{CIRCLE_RADIUS, CompositeFrame, FRAME_CENTER, FRAME_SIZE};

use crate::config::FrameStyle;
use crate::record::AssetRecord;

/// Builds a fresh frame for `record` and embeds it.
pub fn compose(record: &AssetRecord, style: &FrameStyle, circled: bool) -> Embedding {
    CompositeFrame::new(style, circled).embed(record)
}
