//! Shape descriptors and their rasterization.

use crate::canvas::{Canvas, Point, Transform};
use image::Rgba;
use std::f32::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect,
    RoundedRect { radius: f32 },
    Ellipse,
    /// A segment from the shape's position to `to`.
    Line { to: Point },
    /// Vertices relative to the shape's position.
    Polygon { points: Vec<Point> },
    Star { points: u32, inner_ratio: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot: Point,
}

/// A single drawing instruction in logical coordinates.
///
/// `position` is the top-left corner of the bounding box (the start point
/// for lines) and `width`/`height` its extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub position: Point,
    pub width: f32,
    pub height: f32,
    pub rotation: Option<Rotation>,
    pub fill: Option<Rgba<u8>>,
    pub outline: Option<Rgba<u8>>,
    pub stroke_width: f32,
}

impl Shape {
    fn new(kind: ShapeKind, position: Point, width: f32, height: f32) -> Self {
        Self {
            kind,
            position,
            width,
            height,
            rotation: None,
            fill: None,
            outline: None,
            stroke_width: 0.0,
        }
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ShapeKind::Rect, Point::new(x, y), width, height)
    }

    pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        Self::new(
            ShapeKind::RoundedRect { radius },
            Point::new(x, y),
            width,
            height,
        )
    }

    pub fn ellipse(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ShapeKind::Ellipse, Point::new(x, y), width, height)
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::ellipse(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    /// Lines are painted with their outline color.
    pub fn line(from: Point, to: Point, width: f32, color: Rgba<u8>) -> Self {
        let mut shape = Self::new(
            ShapeKind::Line { to },
            from,
            (to.x - from.x).abs(),
            (to.y - from.y).abs(),
        );
        shape.outline = Some(color);
        shape.stroke_width = width;
        shape
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        let width = points.iter().map(|p| p.x).fold(0.0, f32::max);
        let height = points.iter().map(|p| p.y).fold(0.0, f32::max);
        Self::new(ShapeKind::Polygon { points }, Point::ZERO, width, height)
    }

    pub fn star(x: f32, y: f32, size: f32, points: u32, inner_ratio: f32) -> Self {
        Self::new(
            ShapeKind::Star {
                points,
                inner_ratio,
            },
            Point::new(x, y),
            size,
            size,
        )
    }

    pub fn filled(mut self, color: Rgba<u8>) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn outlined(mut self, color: Rgba<u8>, width: f32) -> Self {
        self.outline = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn rotated(mut self, degrees: f32, pivot: Point) -> Self {
        self.rotation = Some(Rotation { degrees, pivot });
        self
    }

    /// Vertices of a star inscribed in the bounding box, starting at the
    /// top point and alternating outer and inner radius.
    pub fn star_vertices(&self) -> Vec<Point> {
        let ShapeKind::Star {
            points,
            inner_ratio,
        } = self.kind
        else {
            return Vec::new();
        };
        let outer = self.width.min(self.height) / 2.0;
        let inner = outer * inner_ratio;
        let center = self.position.offset(self.width / 2.0, self.height / 2.0);

        (0..points * 2)
            .map(|i| {
                let angle = i as f32 * PI / points as f32 - PI / 2.0;
                let radius = if i % 2 == 0 { outer } else { inner };
                center.offset(radius * angle.cos(), radius * angle.sin())
            })
            .collect()
    }
}

impl Canvas {
    /// Rasterize `shape` through `t`.
    ///
    /// Rotated shapes go through [`Canvas::draw_rotated`] as a group of one.
    pub fn draw(&mut self, shape: &Shape, t: &Transform) {
        match shape.rotation {
            Some(rotation) if rotation.degrees != 0.0 => {
                let mut plain = shape.clone();
                plain.rotation = None;
                self.draw_rotated(std::slice::from_ref(&plain), rotation, t);
            }
            _ => self.draw_unrotated(shape, t),
        }
    }

    pub fn draw_all(&mut self, shapes: &[Shape], t: &Transform) {
        for shape in shapes {
            self.draw(shape, t);
        }
    }

    /// Draw `shapes` onto a transparent layer of the same size, rotate the
    /// layer about the pivot and composite it back.
    pub fn draw_rotated(&mut self, shapes: &[Shape], rotation: Rotation, t: &Transform) {
        let mut layer = Canvas::transparent(self.width(), self.height()).with_mode(self.mode());
        layer.draw_all(shapes, t);
        let rotated = layer.rotated(rotation.degrees, t.point(rotation.pivot));
        self.composite(&rotated);
    }

    fn draw_unrotated(&mut self, shape: &Shape, t: &Transform) {
        let min = t.point(shape.position);
        let max = t.point(shape.position.offset(shape.width, shape.height));
        let stroke = t.stroke(shape.stroke_width);

        match &shape.kind {
            ShapeKind::Rect => {
                if let Some(fill) = shape.fill {
                    self.fill_rect(min, max, fill);
                }
                if let Some(outline) = shape.outline {
                    self.stroke_rect(min, max, stroke, outline);
                }
            }
            ShapeKind::RoundedRect { radius } => {
                let radius = t.length(*radius);
                if let Some(fill) = shape.fill {
                    self.fill_rounded_rect(min, max, radius, fill);
                }
                if let Some(outline) = shape.outline {
                    self.stroke_rounded_rect(min, max, radius, stroke, outline);
                }
            }
            ShapeKind::Ellipse => {
                let center = Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
                let (rx, ry) = ((max.x - min.x) / 2.0, (max.y - min.y) / 2.0);
                if let Some(fill) = shape.fill {
                    self.fill_ellipse(center, rx, ry, fill);
                }
                if let Some(outline) = shape.outline {
                    self.stroke_ellipse(center, rx, ry, stroke, outline);
                }
            }
            ShapeKind::Line { to } => {
                if let Some(color) = shape.outline.or(shape.fill) {
                    self.draw_line(min, t.point(*to), stroke, color);
                }
            }
            ShapeKind::Polygon { points } => {
                let pixels: Vec<Point> = points
                    .iter()
                    .map(|p| t.point(shape.position.offset(p.x, p.y)))
                    .collect();
                self.paint_polygon(&pixels, shape.fill, shape.outline, stroke);
            }
            ShapeKind::Star { .. } => {
                let pixels: Vec<Point> =
                    shape.star_vertices().into_iter().map(|p| t.point(p)).collect();
                self.paint_polygon(&pixels, shape.fill, shape.outline, stroke);
            }
        }
    }

    fn paint_polygon(
        &mut self,
        points: &[Point],
        fill: Option<Rgba<u8>>,
        outline: Option<Rgba<u8>>,
        stroke: f32,
    ) {
        if let Some(fill) = fill {
            self.fill_polygon(points, fill);
        }
        if let Some(outline) = outline {
            for (i, from) in points.iter().enumerate() {
                let to = points[(i + 1) % points.len()];
                self.draw_line(*from, to, stroke, outline);
            }
        }
    }
}
