//! The rasterizer: turns a [`Style`] into pixels at any [`Dimensions`].

use crate::canvas::{Canvas, PaintMode, Point, Transform, LOGICAL_SIZE, TRANSPARENT, WHITE};
use crate::glyphs::{self, GlyphFn};
use crate::shape::{Rotation, Shape};
use crate::text;
use image::{Rgba, RgbaImage};
use rusttype::Font;
use serde::Serialize;
use std::f32::consts::PI;
use std::fmt;

/// Output size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }
}

impl From<u32> for Dimensions {
    fn from(size: u32) -> Self {
        Self::square(size)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which composition to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Calendar pictogram on a plain white background
    CalendarOnWhite,
    /// Open scissors on the primary/secondary gradient
    ScissorsOnGradient,
    /// Full-screen splash: orbiting pictograms, central logo and caption
    #[value(skip)]
    Splash,
}

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::CalendarOnWhite => "calendar-on-white",
            Style::ScissorsOnGradient => "scissors-on-gradient",
            Style::Splash => "splash",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colors, caption strings and font shared by every composition.
#[derive(Clone)]
pub struct Theme {
    /// Gradient start and main accent.
    pub primary: Rgba<u8>,
    /// Gradient end and secondary accent.
    pub secondary: Rgba<u8>,
    /// Backdrop of the calendar icon.
    pub background: Rgba<u8>,
    pub title: String,
    pub subtitle: String,
    pub font: Option<Font<'static>>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Rgba([102, 126, 234, 255]),
            secondary: Rgba([118, 75, 162, 255]),
            background: WHITE,
            title: "Salon Booking".to_string(),
            subtitle: "Il tuo salone a portata di tap".to_string(),
            font: None,
        }
    }
}

impl fmt::Debug for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Theme")
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .field("background", &self.background)
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("font", &self.font.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

/// Render `style` at `size` with the default theme.
pub fn render(size: impl Into<Dimensions>, style: Style) -> RgbaImage {
    Renderer::default().render(size, style)
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Background plus foreground; every pixel is opaque for all styles.
    pub fn render(&self, size: impl Into<Dimensions>, style: Style) -> RgbaImage {
        let size = size.into();
        let mut canvas = Canvas::new(size.width, size.height, TRANSPARENT);
        self.paint_background(&mut canvas, style);
        self.paint_foreground(&mut canvas, style);
        canvas.into_image()
    }

    /// The composition without its background, transparent elsewhere.
    pub fn render_foreground(&self, size: impl Into<Dimensions>, style: Style) -> RgbaImage {
        let size = size.into();
        let mut canvas = Canvas::transparent(size.width, size.height);
        self.paint_foreground(&mut canvas, style);
        canvas.into_image()
    }

    fn paint_background(&self, canvas: &mut Canvas, style: Style) {
        match style {
            Style::CalendarOnWhite => {
                *canvas = Canvas::new(canvas.width(), canvas.height(), self.theme.background);
            }
            Style::ScissorsOnGradient | Style::Splash => {
                canvas.fill_vertical_gradient(self.theme.primary, self.theme.secondary);
            }
        }
    }

    fn paint_foreground(&self, canvas: &mut Canvas, style: Style) {
        let t = Transform::fit(canvas.width(), canvas.height());
        match style {
            Style::CalendarOnWhite => canvas.draw_all(&self.calendar_icon(), &t),
            Style::ScissorsOnGradient => self.paint_scissors(canvas, &t),
            Style::Splash => self.paint_splash(canvas, &t),
        }
    }

    fn calendar_icon(&self) -> Vec<Shape> {
        let (primary, secondary) = (self.theme.primary, self.theme.secondary);
        let page = WHITE;

        let mut shapes = vec![
            // body; the part left uncovered by the page forms the header band
            Shape::rounded_rect(64.0, 96.0, 384.0, 352.0, 48.0).filled(secondary),
            Shape::rounded_rect(88.0, 184.0, 336.0, 240.0, 24.0).filled(page),
        ];

        // binder posts
        for x in [144.0, 328.0] {
            shapes.push(
                Shape::rounded_rect(x, 56.0, 40.0, 88.0, 20.0)
                    .filled(primary)
                    .outlined(page, 8.0),
            );
        }

        // 3x4 day grid, one day highlighted
        const CELL: f32 = 52.0;
        const GAP: f32 = 26.0;
        const ROW_GAP: f32 = 24.0;
        for row in 0..3 {
            for col in 0..4 {
                let x = 113.0 + col as f32 * (CELL + GAP);
                let y = 202.0 + row as f32 * (CELL + ROW_GAP);
                let color = if (row, col) == (1, 2) { secondary } else { primary };
                shapes.push(Shape::rounded_rect(x, y, CELL, CELL, 10.0).filled(color));
            }
        }

        shapes
    }

    fn paint_scissors(&self, canvas: &mut Canvas, t: &Transform) {
        const PIVOT: Point = Point::new(256.0, 272.0);
        const OPEN_ANGLE: f32 = 24.0;

        let blade = |color: Rgba<u8>| {
            vec![
                // tapered blade from just below the pivot up to the tip
                Shape::polygon(vec![
                    Point::new(244.0, 288.0),
                    Point::new(268.0, 288.0),
                    Point::new(264.0, 128.0),
                    Point::new(256.0, 72.0),
                    Point::new(248.0, 128.0),
                ])
                .filled(color),
                // arm down to the handle
                Shape::rect(248.0, 280.0, 16.0, 64.0).filled(color),
                Shape::circle(Point::new(256.0, 384.0), 48.0).outlined(color, 16.0),
            ]
        };

        // Blades are drawn upright and swung open about the pivot.
        canvas.draw_rotated(
            &blade(WHITE),
            Rotation {
                degrees: -OPEN_ANGLE,
                pivot: PIVOT,
            },
            t,
        );
        canvas.draw_rotated(
            &blade(Rgba([236, 236, 246, 255])),
            Rotation {
                degrees: OPEN_ANGLE,
                pivot: PIVOT,
            },
            t,
        );

        canvas.draw(
            &Shape::circle(PIVOT, 14.0)
                .filled(self.theme.secondary)
                .outlined(WHITE, 6.0),
            t,
        );
    }

    fn paint_splash(&self, canvas: &mut Canvas, t: &Transform) {
        const CENTER: Point = Point::new(LOGICAL_SIZE / 2.0, LOGICAL_SIZE / 2.0);
        const ICON_SIZE: f32 = LOGICAL_SIZE / 8.0;
        const ORBIT: f32 = LOGICAL_SIZE / 3.0;
        const LOGO_SIZE: f32 = ICON_SIZE * 2.0;

        let icons: [(GlyphFn, f32, u8); 5] = [
            (glyphs::scissors, 0.0, 200),
            (glyphs::calendar, PI / 3.0, 180),
            (glyphs::clock, 2.0 * PI / 3.0, 160),
            (glyphs::comb, PI, 140),
            (glyphs::star, 4.0 * PI / 3.0, 120),
        ];

        // Each glyph keeps exactly its own opacity, even where strokes cross.
        let mut overlay =
            Canvas::transparent(canvas.width(), canvas.height()).with_mode(PaintMode::Replace);
        for (glyph, angle, opacity) in icons {
            let x = CENTER.x + ORBIT * angle.cos() - ICON_SIZE / 2.0;
            let y = CENTER.y + ORBIT * angle.sin() - ICON_SIZE / 2.0;
            overlay.draw_all(&glyph(x, y, ICON_SIZE, Rgba([255, 255, 255, opacity])), t);
        }

        overlay.draw(&Shape::circle(CENTER, LOGO_SIZE / 2.0).filled(WHITE), t);
        canvas.composite(&overlay);

        if let Some(font) = &self.theme.font {
            let title_top = CENTER.y + LOGO_SIZE + 40.0;
            let subtitle_top = CENTER.y + LOGO_SIZE + 80.0;
            self.paint_caption(
                canvas,
                t,
                font,
                &self.theme.title,
                LOGICAL_SIZE / 15.0,
                title_top,
                WHITE,
            );
            self.paint_caption(
                canvas,
                t,
                font,
                &self.theme.subtitle,
                LOGICAL_SIZE / 30.0,
                subtitle_top,
                Rgba([255, 255, 255, 200]),
            );
        }
    }

    /// Horizontally centered line of text; `size` and `top` are logical.
    #[allow(clippy::too_many_arguments)]
    fn paint_caption(
        &self,
        canvas: &mut Canvas,
        t: &Transform,
        font: &Font<'static>,
        caption: &str,
        size: f32,
        top: f32,
        color: Rgba<u8>,
    ) {
        let px = t.length(size);
        if caption.is_empty() || px < 1.0 {
            return;
        }
        let width = text::text_width(font, caption, px);
        let left = canvas.width() as f32 / 2.0 - width / 2.0;
        let top = t.point(Point::new(0.0, top)).y;
        text::draw_text(canvas, font, caption, px, Point::new(left, top), color);
    }
}
