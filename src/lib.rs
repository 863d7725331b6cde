//! Procedural launcher icons and splash screens for Android resource trees.

pub mod canvas;
pub mod generate;
pub mod glyphs;
pub mod manifest;
pub mod render;
pub mod shape;
pub mod sizes;
pub mod text;
pub mod writer;

pub use render::{render, Dimensions, Renderer, Style, Theme};
pub use writer::save;
