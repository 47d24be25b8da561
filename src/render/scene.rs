//! Builds the overlay SVG document for one flatten pass.
//!
//! The document mirrors the on-screen stacking order exactly: standard top
//! text, standard bottom text, then every layer in insertion order. The
//! compositor rasterizes it once and blends it over the background.
//!
//! Colors go through [`parse_color`] here; an unparseable color means the
//! element is simply not painted, which is where unvalidated input finally
//! surfaces.

use std::fmt::Write;

use html_escape::encode_text;

use crate::layer::{Layer, LayerKind, LayerStore};
use crate::style::{StandardTextStyle, parse_color};
use crate::text::StandardText;

/// Classic meme face with a safe fallback.
const FONT_FAMILY: &str = "Impact, sans-serif";

/// Distance of the standard captions from the canvas edge.
const EDGE_MARGIN: f32 = 16.0;

/// Width of the stroked text outline.
const OUTLINE_WIDTH: f32 = 2.0;

/// Approximate cap-height fraction used to place text baselines.
const BASELINE_FACTOR: f32 = 0.8;

/// Fixed footprint of a shape layer.
const SHAPE_SIZE: f32 = 100.0;

/// Renders the full overlay scene as an SVG document sized to the canvas.
pub(crate) fn overlay_svg(
    width: u32,
    height: u32,
    text: &StandardText,
    layers: &LayerStore,
) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    let center_x = width as f32 / 2.0;
    if !text.top().is_empty() {
        let baseline = EDGE_MARGIN + text.top_style.font_size * BASELINE_FACTOR;
        push_standard_text(&mut svg, text.top(), &text.top_style, center_x, baseline);
    }
    if !text.bottom().is_empty() {
        let baseline = height as f32 - EDGE_MARGIN;
        push_standard_text(&mut svg, text.bottom(), &text.bottom_style, center_x, baseline);
    }

    for layer in layers.iter() {
        match layer.kind {
            LayerKind::Text => push_text_layer(&mut svg, layer),
            LayerKind::Shape => push_shape_layer(&mut svg, layer),
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Normalizes a color string to `#rrggbb`, or `None` if it isn't paintable.
fn hex_attr(value: &str) -> Option<String> {
    let rgba = parse_color(value)?;
    Some(format!("#{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2]))
}

fn push_standard_text(
    out: &mut String,
    content: &str,
    style: &StandardTextStyle,
    center_x: f32,
    baseline: f32,
) {
    let Some(fill) = hex_attr(&style.color) else {
        return;
    };
    let outline = hex_attr(&style.outline_color);

    let _ = write!(
        out,
        r#"<text x="{center_x}" y="{baseline}" text-anchor="middle" font-family="{FONT_FAMILY}" font-weight="900" font-size="{size}" fill="{fill}""#,
        size = style.font_size,
    );
    if let Some(outline) = outline {
        let _ = write!(
            out,
            r#" stroke="{outline}" stroke-width="{OUTLINE_WIDTH}" stroke-linejoin="round" paint-order="stroke""#,
        );
    }
    let _ = write!(out, ">{}</text>", encode_text(content));
}

fn open_group(out: &mut String, layer: &Layer, pivot: Option<(f32, f32)>) {
    let _ = write!(
        out,
        r#"<g transform="translate({x} {y})"#,
        x = layer.position.x,
        y = layer.position.y,
    );
    if layer.rotation_degrees != 0.0 {
        match pivot {
            Some((px, py)) => {
                let _ = write!(out, " rotate({} {px} {py})", layer.rotation_degrees);
            }
            None => {
                let _ = write!(out, " rotate({})", layer.rotation_degrees);
            }
        }
    }
    out.push_str("\">");
}

fn push_text_layer(out: &mut String, layer: &Layer) {
    let Some(fill) = hex_attr(&layer.style.color) else {
        return;
    };
    let style = &layer.style;
    let content = layer.content.to_uppercase();

    open_group(out, layer, None);

    // A static document has no layout pass to size the backing box, so it
    // is estimated from glyph count.
    if let Some(background) = hex_attr(&style.background_color) {
        let box_width = content.chars().count() as f32 * style.font_size * 0.6 + style.padding * 2.0;
        let box_height = style.font_size + style.padding * 2.0;
        let _ = write!(
            out,
            r#"<rect width="{box_width}" height="{box_height}" rx="{rx}" fill="{background}"/>"#,
            rx = style.corner_radius,
        );
    }

    let _ = write!(
        out,
        r##"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-weight="{weight}" font-size="{size}" fill="{fill}" stroke="#000000" stroke-width="{OUTLINE_WIDTH}" stroke-linejoin="round" paint-order="stroke">{text}</text>"##,
        x = style.padding,
        y = style.padding + style.font_size * BASELINE_FACTOR,
        weight = encode_attribute(&style.font_weight),
        size = style.font_size,
        text = encode_text(&content),
    );

    out.push_str("</g>");
}

fn push_shape_layer(out: &mut String, layer: &Layer) {
    let Some(fill) = hex_attr(&layer.style.background_color) else {
        return;
    };
    let half = SHAPE_SIZE / 2.0;

    open_group(out, layer, Some((half, half)));

    // A corner radius of half the footprint or more reads as "fully round".
    if layer.style.corner_radius >= half {
        let _ = write!(
            out,
            r#"<ellipse cx="{half}" cy="{half}" rx="{half}" ry="{half}" fill="{fill}"/>"#,
        );
    } else {
        let _ = write!(
            out,
            r#"<rect width="{SHAPE_SIZE}" height="{SHAPE_SIZE}" rx="{rx}" fill="{fill}"/>"#,
            rx = layer.style.corner_radius,
        );
    }

    out.push_str("</g>");
}

fn encode_attribute(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{LayerPatch, StylePatch};
    use crate::style::Position;

    #[test]
    fn empty_scene_is_a_bare_document() {
        let svg = overlay_svg(500, 500, &StandardText::new(), &LayerStore::new());
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn standard_text_is_centered_and_outlined() {
        let mut text = StandardText::new();
        text.set_top("hello");

        let svg = overlay_svg(500, 500, &text, &LayerStore::new());
        assert!(svg.contains(r#"x="250""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"paint-order="stroke""#));
        assert!(svg.contains(">HELLO</text>"));
    }

    #[test]
    fn layers_follow_standard_text_in_document_order() {
        let mut text = StandardText::new();
        text.set_top("top");
        let mut layers = LayerStore::new();
        layers.add(LayerKind::Shape, Some("cloud"));

        let svg = overlay_svg(500, 500, &text, &layers);
        let text_at = svg.find(">TOP<").unwrap();
        let shape_at = svg.find("<ellipse").unwrap();
        assert!(text_at < shape_at, "layers stack above standard text");
    }

    #[test]
    fn text_layer_is_upper_cased_and_escaped() {
        let mut layers = LayerStore::new();
        let id = layers.add(LayerKind::Text, Some("cats < dogs"));
        layers.update(
            id,
            LayerPatch {
                position: Some(Position::new(10.0, 20.0)),
                ..LayerPatch::default()
            },
        );

        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(svg.contains("CATS &lt; DOGS"));
        assert!(svg.contains(r#"translate(10 20)"#));
    }

    #[test]
    fn text_layer_background_box_appears_when_opaque() {
        let mut layers = LayerStore::new();
        let id = layers.add(LayerKind::Text, Some("hey"));

        // Default text background is transparent: no box.
        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(!svg.contains("<rect"));

        layers.update_style(
            id,
            StylePatch {
                background_color: Some("#102030".to_string()),
                ..StylePatch::default()
            },
        );
        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(svg.contains(r##"fill="#102030""##));
    }

    #[test]
    fn cloud_renders_as_ellipse_and_box_as_rect() {
        let mut layers = LayerStore::new();
        layers.add(LayerKind::Shape, Some("cloud"));
        layers.add(LayerKind::Shape, Some("box"));

        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains(r#"<rect width="100" height="100" rx="4""#));
    }

    #[test]
    fn rotation_is_emitted_only_when_set() {
        let mut layers = LayerStore::new();
        let id = layers.add(LayerKind::Shape, Some("cloud"));

        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(!svg.contains("rotate("));

        layers.update(
            id,
            LayerPatch {
                rotation_degrees: Some(15.0),
                ..LayerPatch::default()
            },
        );
        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(svg.contains("rotate(15 50 50)"));
    }

    #[test]
    fn unpaintable_color_drops_the_element() {
        let mut layers = LayerStore::new();
        let id = layers.add(LayerKind::Text, Some("ghost"));
        layers.update_style(
            id,
            StylePatch {
                color: Some("definitely-not-a-color".to_string()),
                ..StylePatch::default()
            },
        );

        let svg = overlay_svg(500, 500, &StandardText::new(), &layers);
        assert!(!svg.contains("GHOST"));
    }
}
