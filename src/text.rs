//! Caption rendering with `rusttype`.

use crate::canvas::{with_alpha, Canvas, Point};
use anyhow::{Context, Result};
use image::Rgba;
use rusttype::{point, Font, Scale};
use std::path::{Path, PathBuf};

/// Fonts tried, in order, when no font is given explicitly.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read font file {}", path.display()))?;
    Font::try_from_vec(data)
        .with_context(|| format!("{} is not a usable TrueType font", path.display()))
}

/// First existing entry of the well-known system font locations.
pub fn find_system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Advance width of `text` at a pixel height of `px`.
pub fn text_width(font: &Font<'_>, text: &str, px: f32) -> f32 {
    let scale = Scale::uniform(px);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Draw `text` with its line box starting at `top_left` (pixels).
///
/// Glyph coverage scales the color's alpha, so partially covered edge
/// pixels blend smoothly into what is underneath.
pub fn draw_text(
    canvas: &mut Canvas,
    font: &Font<'_>,
    text: &str,
    px: f32,
    top_left: Point,
    color: Rgba<u8>,
) {
    let scale = Scale::uniform(px);
    let ascent = font.v_metrics(scale).ascent;
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    for glyph in font.layout(text, scale, point(top_left.x, top_left.y + ascent)) {
        let Some(bounds) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let x = bounds.min.x + gx as i32;
            let y = bounds.min.y + gy as i32;
            if x < 0 || y < 0 || x >= width || y >= height || coverage <= 0.0 {
                return;
            }
            canvas.blend_pixel(x as u32, y as u32, with_alpha(color, coverage));
        });
    }
}
