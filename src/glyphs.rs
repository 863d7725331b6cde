//! Small pictograms placed around the splash-screen logo.
//!
//! Each builder takes the top-left corner and side length of the glyph's
//! square cell in logical coordinates and returns the shapes to draw.

use crate::canvas::Point;
use crate::shape::Shape;
use image::Rgba;

const STROKE: f32 = 3.0;
const HAIRLINE: f32 = 1.0;

pub type GlyphFn = fn(f32, f32, f32, Rgba<u8>) -> Vec<Shape>;

/// Two handle rings joined to a common tip.
pub fn scissors(x: f32, y: f32, size: f32, color: Rgba<u8>) -> Vec<Shape> {
    let ring = size / 3.0;
    let tip = Point::new(x + size, y + size / 2.0);
    vec![
        Shape::ellipse(x, y, ring, ring).outlined(color, STROKE),
        Shape::ellipse(x, y + size * 2.0 / 3.0, ring, ring).outlined(color, STROKE),
        Shape::line(
            Point::new(x + size / 6.0, y + size / 6.0),
            tip,
            STROKE,
            color,
        ),
        Shape::line(
            Point::new(x + size / 6.0, y + size * 5.0 / 6.0),
            tip,
            STROKE,
            color,
        ),
    ]
}

/// Framed page with a solid header band and a ruled grid.
pub fn calendar(x: f32, y: f32, size: f32, color: Rgba<u8>) -> Vec<Shape> {
    let top = y + size / 5.0;
    let header_bottom = y + size * 2.0 / 5.0;
    let mut shapes = vec![
        Shape::rect(x, top, size, size - size / 5.0).outlined(color, STROKE),
        Shape::rect(x, top, size, header_bottom - top).filled(color),
    ];
    for i in 1..4 {
        let row = top + i as f32 * size / 5.0;
        shapes.push(Shape::line(
            Point::new(x, row),
            Point::new(x + size, row),
            HAIRLINE,
            color,
        ));
        let column = x + i as f32 * size / 4.0;
        shapes.push(Shape::line(
            Point::new(column, header_bottom),
            Point::new(column, y + size),
            HAIRLINE,
            color,
        ));
    }
    shapes
}

pub fn clock(x: f32, y: f32, size: f32, color: Rgba<u8>) -> Vec<Shape> {
    let center = Point::new(x + size / 2.0, y + size / 2.0);
    vec![
        Shape::ellipse(x, y, size, size).outlined(color, STROKE),
        // hour hand
        Shape::line(center, center.offset(0.0, -size / 3.0), STROKE, color),
        // minute hand
        Shape::line(center, center.offset(size / 4.0, 0.0), 2.0, color),
    ]
}

pub fn comb(x: f32, y: f32, size: f32, color: Rgba<u8>) -> Vec<Shape> {
    const TEETH: u32 = 8;
    let spine = size / 4.0;
    let tooth = size / TEETH as f32;
    let mut shapes = vec![Shape::rect(x, y, size, spine).filled(color)];
    for i in 0..TEETH {
        shapes.push(
            Shape::rect(x + i as f32 * tooth, y + spine, tooth * 0.75, size - spine).filled(color),
        );
    }
    shapes
}

pub fn star(x: f32, y: f32, size: f32, color: Rgba<u8>) -> Vec<Shape> {
    vec![Shape::star(x, y, size, 5, 0.5).filled(color)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    const TRANSLUCENT: Rgba<u8> = Rgba([255, 255, 255, 200]);

    #[test]
    fn every_glyph_stays_inside_its_cell() {
        let glyphs: [GlyphFn; 5] = [scissors, calendar, clock, comb, star];
        for glyph in glyphs {
            for shape in glyph(100.0, 100.0, 64.0, TRANSLUCENT) {
                let inside = |p: Point| {
                    (100.0..=164.001).contains(&p.x) && (100.0..=164.001).contains(&p.y)
                };
                let far = match shape.kind {
                    ShapeKind::Line { to } => to,
                    _ => shape.position.offset(shape.width, shape.height),
                };
                assert!(inside(shape.position), "{:?} starts outside", shape.kind);
                assert!(inside(far), "{:?} ends outside", shape.kind);
            }
        }
    }

    #[test]
    fn comb_has_spine_and_eight_teeth() {
        let shapes = comb(0.0, 0.0, 64.0, TRANSLUCENT);
        assert_eq!(shapes.len(), 9);
        assert!(shapes.iter().all(|s| s.kind == ShapeKind::Rect));
    }

    #[test]
    fn glyphs_carry_requested_color() {
        for shape in clock(0.0, 0.0, 64.0, TRANSLUCENT) {
            assert_eq!(shape.outline.or(shape.fill), Some(TRANSLUCENT));
        }
    }
}
