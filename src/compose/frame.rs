//! The fixed 56×56 canvas hosting an embedded icon.

use super::document::{Element, SVG_NS, XLINK_NS};
use crate::config::FrameStyle;

/// Side of the square user-space canvas.
pub const FRAME_SIZE: u32 = 56;

/// Radius of the optional border; diameter 46 against the 56 frame.
pub const CIRCLE_RADIUS: u32 = 23;

/// Centre of the canvas on both axes.
pub const FRAME_CENTER: u32 = FRAME_SIZE / 2;

/// `viewBox` shared by the frame and the nested icon document.
pub fn frame_view_box() -> String {
    format!("0 0 {FRAME_SIZE} {FRAME_SIZE}")
}

/// A freshly built root document, optionally carrying a circular border.
///
/// Every asset gets its own frame; frames are consumed by
/// [`CompositeFrame::embed`] and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeFrame {
    root: Element,
}

impl CompositeFrame {
    /// Builds the frame. The circle is only added when `circled` is set.
    pub fn new(style: &FrameStyle, circled: bool) -> Self {
        let mut root = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("xmlns:xlink", XLINK_NS)
            .attr("version", "1.1")
            .attr("viewBox", frame_view_box());

        if circled {
            root = root.child(border(style));
        }

        Self { root }
    }

    /// Frame without a border.
    pub fn plain() -> Self {
        Self::new(&FrameStyle::default(), false)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn is_circled(&self) -> bool {
        self.root.children_named("circle").next().is_some()
    }

    pub(crate) fn into_root(self) -> Element {
        self.root
    }
}

fn border(style: &FrameStyle) -> Element {
    Element::new("circle")
        .attr("cx", FRAME_CENTER)
        .attr("cy", FRAME_CENTER)
        .attr("r", CIRCLE_RADIUS)
        .attr("stroke", &style.stroke_color)
        .attr("stroke-opacity", 1)
        .attr("stroke-width", style.stroke_width)
        .attr("fill", style.fill.as_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrameFill;

    #[test]
    fn plain_frame_has_no_circle() {
        let frame = CompositeFrame::plain();
        assert!(!frame.is_circled());
        assert_eq!(frame.root().get_attr("viewBox"), Some("0 0 56 56"));
    }

    #[test]
    fn circle_geometry_is_fixed() {
        let style = FrameStyle {
            stroke_color: "#ff0000".into(),
            stroke_width: 3.5,
            fill: FrameFill::White,
        };
        let frame = CompositeFrame::new(&style, true);
        let circle = frame.root().children_named("circle").next().unwrap();

        assert_eq!(circle.get_attr("cx"), Some("28"));
        assert_eq!(circle.get_attr("cy"), Some("28"));
        assert_eq!(circle.get_attr("r"), Some("23"));
        assert_eq!(circle.get_attr("stroke"), Some("#ff0000"));
        assert_eq!(circle.get_attr("stroke-width"), Some("3.5"));
        assert_eq!(circle.get_attr("fill"), Some("#FFFFFF"));
    }

    #[test]
    fn default_stroke() {
        let frame = CompositeFrame::new(&FrameStyle::default(), true);
        let xml = frame.root().to_xml();
        assert!(xml.contains(r##"stroke="#074d92""##));
        assert!(xml.contains(r#"stroke-width="2""#));
        assert!(xml.contains(r#"fill="none""#));
    }

    #[test]
    fn frames_are_independent() {
        let a = CompositeFrame::new(&FrameStyle::default(), true);
        let b = CompositeFrame::new(&FrameStyle::default(), true);
        assert_eq!(a, b);
        assert_eq!(a.root().children().len(), 1);
    }
}
