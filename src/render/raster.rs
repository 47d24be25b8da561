//! SVG rasterization and pixel compositing for the flatten pipeline.

use std::sync::Arc;

use image::{Rgba, RgbaImage, imageops};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::error::RenderError;

/// Loads the system font database once per compositor.
///
/// Text rendering resolves the Impact-style faces from here; on a machine
/// with no matching font the captions fall back to whatever sans-serif the
/// database offers.
pub(crate) fn load_fonts() -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
}

/// Rasterizes an SVG document at its declared size.
pub(crate) fn render_overlay(
    svg: &str,
    fonts: &Arc<fontdb::Database>,
) -> Result<RgbaImage, RenderError> {
    let mut options = Options::default();
    options.fontdb = Arc::clone(fonts);
    let tree = Tree::from_str(svg, &options).map_err(|e| RenderError::Overlay(e.to_string()))?;

    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap (premultiplied alpha) to an RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let pixel = pixmap.pixel(x, y).unwrap();
            let (r, g, b, a) =
                unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
            img.put_pixel(x, y, Rgba([r, g, b, a]));
        }
    }

    img
}

fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

/// Composites `src` onto `dest` at the given position with source-over
/// alpha blending.
pub(crate) fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;
            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = src.get_pixel(sx, sy);
            let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
            let blended = alpha_blend(*src_pixel, *dst_pixel);
            dest.put_pixel(dx as u32, dy as u32, blended);
        }
    }
}

fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

/// Scales an image to fit inside `width` x `height` preserving aspect ratio
/// (the "object-contain" rule), returning the resized image and the centered
/// offset to letterbox it at.
pub(crate) fn contain_fit(src: &RgbaImage, width: u32, height: u32) -> (RgbaImage, i64, i64) {
    let scale = (width as f32 / src.width() as f32).min(height as f32 / src.height() as f32);
    let scaled_w = ((src.width() as f32 * scale).round() as u32).max(1);
    let scaled_h = ((src.height() as f32 * scale).round() as u32).max(1);

    let resized = imageops::resize(src, scaled_w, scaled_h, imageops::FilterType::Triangle);
    let x = (width as i64 - scaled_w as i64) / 2;
    let y = (height as i64 - scaled_h as i64) / 2;
    (resized, x, y)
}

// ============================================================================
// Tests
// ============================================================================
