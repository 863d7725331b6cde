//! Raster canvas and the primitives every composition is built from.
//!
//! Compositions are written against a fixed 512×512 logical space; a
//! [`Transform`] maps that space onto the actual pixel grid so the same
//! drawing code produces every density bucket.

use image::{Rgba, RgbaImage};

/// Side length of the logical drawing space.
pub const LOGICAL_SIZE: f32 = 512.0;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Maps logical coordinates onto a pixel grid.
///
/// The logical square is scaled to the shorter side of the frame and
/// centered along the longer one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub offset: Point,
}

impl Transform {
    pub fn fit(width: u32, height: u32) -> Self {
        let side = width.min(height) as f32;
        Self {
            scale: side / LOGICAL_SIZE,
            offset: Point::new(
                (width as f32 - side) / 2.0,
                (height as f32 - side) / 2.0,
            ),
        }
    }

    pub fn point(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    pub fn length(&self, len: f32) -> f32 {
        len * self.scale
    }

    /// Stroke widths never collapse below one pixel.
    pub fn stroke(&self, width: f32) -> f32 {
        self.length(width).max(1.0)
    }
}

/// Linear interpolation between two colors, channels truncated.
///
/// Alpha is left alone when both ends share it, so a gradient between two
/// opaque colors is opaque on every row.
pub fn gradient_color(start: Rgba<u8>, end: Rgba<u8>, ratio: f64) -> Rgba<u8> {
    let ratio = ratio.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - ratio) + b as f64 * ratio) as u8;
    let alpha = if start[3] == end[3] {
        start[3]
    } else {
        mix(start[3], end[3])
    };
    Rgba([
        mix(start[0], end[0]),
        mix(start[1], end[1]),
        mix(start[2], end[2]),
        alpha,
    ])
}

/// Returns `color` with its alpha multiplied by `factor`.
pub fn with_alpha(color: Rgba<u8>, factor: f32) -> Rgba<u8> {
    let mut out = color;
    out[3] = (color[3] as f32 * factor.clamp(0.0, 1.0)).round() as u8;
    out
}

/// How shape fills land on the pixels already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    /// Source-over blending.
    #[default]
    Blend,
    /// The shape color overwrites the pixel, alpha included.
    Replace,
}

/// A mutable RGBA pixel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
    mode: PaintMode,
}

impl From<RgbaImage> for Canvas {
    fn from(image: RgbaImage) -> Self {
        Self {
            image,
            mode: PaintMode::Blend,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self::from(RgbaImage::from_pixel(width, height, color))
    }

    pub fn with_mode(mut self, mode: PaintMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, TRANSPARENT)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Paint every scanline with the color interpolated at `y / height`.
    pub fn fill_vertical_gradient(&mut self, top: Rgba<u8>, bottom: Rgba<u8>) {
        let height = self.height();
        for y in 0..height {
            let color = gradient_color(top, bottom, y as f64 / height as f64);
            for x in 0..self.width() {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Source-over blend of `color` onto one pixel, in integer arithmetic
    /// so opaque results stay exactly opaque.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let dst = self.image.get_pixel_mut(x, y);
        let src_alpha = color[3] as u32;
        match src_alpha {
            0 => return,
            255 => {
                *dst = color;
                return;
            }
            _ => {}
        }

        let inverse = 255 - src_alpha;
        let dst_alpha = dst[3] as u32;
        // Both terms carry an extra factor of 255.
        let out_alpha = src_alpha * 255 + dst_alpha * inverse;
        if out_alpha == 0 {
            return;
        }
        for i in 0..3 {
            let channel = color[i] as u32 * src_alpha * 255 + dst[i] as u32 * dst_alpha * inverse;
            dst[i] = ((channel + out_alpha / 2) / out_alpha) as u8;
        }
        dst[3] = ((out_alpha + 127) / 255) as u8;
    }

    /// Paint `color` into every pixel inside `[min, max)` whose center
    /// satisfies `inside`. Anything outside the canvas is skipped.
    fn fill_region<F>(&mut self, min: Point, max: Point, color: Rgba<u8>, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        if color[3] == 0 {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f32 + 0.5, y as f32 + 0.5) {
                    match self.mode {
                        PaintMode::Blend => self.blend_pixel(x, y, color),
                        PaintMode::Replace => self.image.put_pixel(x, y, color),
                    }
                }
            }
        }
    }

    pub fn fill_rect(&mut self, min: Point, max: Point, color: Rgba<u8>) {
        self.fill_region(min, max, color, |px, py| {
            in_rect(px, py, min, max)
        });
    }

    pub fn stroke_rect(&mut self, min: Point, max: Point, width: f32, color: Rgba<u8>) {
        let inner_min = min.offset(width, width);
        let inner_max = max.offset(-width, -width);
        self.fill_region(min, max, color, |px, py| {
            in_rect(px, py, min, max) && !in_rect(px, py, inner_min, inner_max)
        });
    }

    pub fn fill_rounded_rect(&mut self, min: Point, max: Point, radius: f32, color: Rgba<u8>) {
        self.fill_region(min, max, color, |px, py| {
            in_rounded_rect(px, py, min, max, radius)
        });
    }

    pub fn stroke_rounded_rect(
        &mut self,
        min: Point,
        max: Point,
        radius: f32,
        width: f32,
        color: Rgba<u8>,
    ) {
        let inner_min = min.offset(width, width);
        let inner_max = max.offset(-width, -width);
        let inner_radius = (radius - width).max(0.0);
        self.fill_region(min, max, color, |px, py| {
            in_rounded_rect(px, py, min, max, radius)
                && !in_rounded_rect(px, py, inner_min, inner_max, inner_radius)
        });
    }

    pub fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32, color: Rgba<u8>) {
        let min = center.offset(-rx, -ry);
        let max = center.offset(rx, ry);
        self.fill_region(min, max, color, |px, py| {
            in_ellipse(px, py, center, rx, ry)
        });
    }

    pub fn stroke_ellipse(&mut self, center: Point, rx: f32, ry: f32, width: f32, color: Rgba<u8>) {
        let min = center.offset(-rx, -ry);
        let max = center.offset(rx, ry);
        let (inner_rx, inner_ry) = (rx - width, ry - width);
        self.fill_region(min, max, color, |px, py| {
            in_ellipse(px, py, center, rx, ry) && !in_ellipse(px, py, center, inner_rx, inner_ry)
        });
    }

    /// Even-odd fill of an arbitrary polygon.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let (min, max) = bounds(points);
        self.fill_region(min, max, color, |px, py| in_polygon(px, py, points));
    }

    /// A straight segment of the given width with square ends.
    pub fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Rgba<u8>) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let half = width / 2.0;
        let (nx, ny) = (-dy / len * half, dx / len * half);
        let quad = [
            from.offset(nx, ny),
            to.offset(nx, ny),
            to.offset(-nx, -ny),
            from.offset(-nx, -ny),
        ];
        self.fill_polygon(&quad, color);
    }

    /// Alpha-composite `layer` over this canvas, aligned at the origin.
    pub fn composite(&mut self, layer: &Canvas) {
        let (width, height) = (self.width(), self.height());
        for (x, y, pixel) in layer.image.enumerate_pixels() {
            if x < width && y < height {
                self.blend_pixel(x, y, *pixel);
            }
        }
    }

    /// Clear everything outside the inscribed circle. Pixels the edge
    /// passes through keep the covered fraction of their alpha.
    pub fn clip_to_circle(&mut self) {
        let center = Point::new(self.width() as f32 / 2.0, self.height() as f32 / 2.0);
        let radius = self.width().min(self.height()) as f32 / 2.0;

        for (x, y, pixel) in self.image.enumerate_pixels_mut() {
            let distance = (x as f32 + 0.5 - center.x).hypot(y as f32 + 0.5 - center.y);
            let coverage = (radius - distance).clamp(0.0, 1.0);
            if coverage == 0.0 {
                *pixel = TRANSPARENT;
            } else if coverage < 1.0 {
                *pixel = with_alpha(*pixel, coverage);
            }
        }
    }

    /// Rotate the whole canvas by `degrees` (clockwise on screen) about
    /// `pivot`, producing a new layer of the same size.
    ///
    /// Each destination pixel is mapped back onto the source with the
    /// inverse rotation and takes its nearest neighbour; pixels that map
    /// outside the source stay transparent.
    pub fn rotated(&self, degrees: f32, pivot: Point) -> Canvas {
        let width = self.width();
        let height = self.height();
        let (sin, cos) = degrees.to_radians().sin_cos();
        let mut rotated = Canvas::transparent(width, height);

        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 + 0.5 - pivot.x;
                let dy = y as f32 + 0.5 - pivot.y;

                let source_x = dx * cos + dy * sin + pivot.x;
                let source_y = -dx * sin + dy * cos + pivot.y;

                if source_x >= 0.0
                    && source_y >= 0.0
                    && (source_x as u32) < width
                    && (source_y as u32) < height
                {
                    let pixel = self.image.get_pixel(source_x as u32, source_y as u32);
                    rotated.image.put_pixel(x, y, *pixel);
                }
            }
        }

        rotated
    }
}

fn in_rect(px: f32, py: f32, min: Point, max: Point) -> bool {
    px >= min.x && px < max.x && py >= min.y && py < max.y
}

fn in_rounded_rect(px: f32, py: f32, min: Point, max: Point, radius: f32) -> bool {
    if !in_rect(px, py, min, max) {
        return false;
    }
    let radius = radius.min((max.x - min.x) / 2.0).min((max.y - min.y) / 2.0);
    if radius <= 0.0 {
        return true;
    }
    // Distance to the nearest corner-circle center; zero on the straight parts.
    let cx = px.clamp(min.x + radius, max.x - radius);
    let cy = py.clamp(min.y + radius, max.y - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

fn in_ellipse(px: f32, py: f32, center: Point, rx: f32, ry: f32) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (px - center.x) / rx;
    let ny = (py - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

fn in_polygon(px: f32, py: f32, points: &[Point]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > py) != (b.y > py) && px < (b.x - a.x) * (py - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn bounds(points: &[Point]) -> (Point, Point) {
    let mut min = Point::new(f32::MAX, f32::MAX);
    let mut max = Point::new(f32::MIN, f32::MIN);
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}
