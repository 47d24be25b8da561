//! Style and geometry primitives shared by layers and standard captions.
//!
//! Colors are carried as RGB-hex strings (`"#ffffff"`) or the literal
//! `"transparent"`, exactly as the editing UI produces them. They are not
//! validated on input; [`parse_color`] resolves them at render time and an
//! unparseable value simply renders as nothing.

use std::str::FromStr;

use image::Rgba;
use palette::Srgb;
use serde::{Deserialize, Serialize};

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Appearance of a draggable overlay layer.
///
/// `font_size` is 0 for shapes by convention; `corner_radius` of 50 or more
/// renders a shape as an ellipse rather than a rounded rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub font_size: f32,
    pub color: String,
    pub background_color: String,
    pub font_weight: String,
    pub padding: f32,
    pub corner_radius: f32,
}

/// Appearance of one standard caption slot (top or bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardTextStyle {
    pub font_size: f32,
    pub color: String,
    pub outline_color: String,
}

impl Default for StandardTextStyle {
    fn default() -> Self {
        Self {
            font_size: 40.0,
            color: "#ffffff".to_string(),
            outline_color: "#000000".to_string(),
        }
    }
}

/// Resolves a color string to an opaque pixel.
///
/// Returns `None` for `"transparent"` and for anything `palette` cannot
/// parse as a hex color.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    if value.eq_ignore_ascii_case("transparent") {
        return None;
    }
    let srgb = Srgb::<u8>::from_str(value).ok()?;
    Some(Rgba([srgb.red, srgb.green, srgb.blue, 255]))
}
