//! Android resolution tables.

use crate::render::Dimensions;
use serde::Serialize;

/// Launcher icon side length per density bucket.
pub const LAUNCHER_ICONS: [(&str, u32); 5] = [
    ("mdpi", 48),
    ("hdpi", 72),
    ("xhdpi", 96),
    ("xxhdpi", 144),
    ("xxxhdpi", 192),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// One `drawable*` folder that receives a `splash.png`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplashTarget {
    pub folder: &'static str,
    pub density: Option<&'static str>,
    pub orientation: Option<Orientation>,
    pub width: u32,
    pub height: u32,
}

impl SplashTarget {
    const fn new(
        folder: &'static str,
        density: Option<&'static str>,
        orientation: Option<Orientation>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            folder,
            density,
            orientation,
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

use Orientation::{Landscape, Portrait};

pub const SPLASH_SCREENS: [SplashTarget; 16] = [
    SplashTarget::new("drawable", None, None, 480, 800),
    SplashTarget::new("drawable-mdpi", Some("mdpi"), None, 320, 480),
    SplashTarget::new("drawable-hdpi", Some("hdpi"), None, 480, 800),
    SplashTarget::new("drawable-xhdpi", Some("xhdpi"), None, 720, 1280),
    SplashTarget::new("drawable-xxhdpi", Some("xxhdpi"), None, 1080, 1920),
    SplashTarget::new("drawable-xxxhdpi", Some("xxxhdpi"), None, 1440, 2560),
    SplashTarget::new("drawable-port-mdpi", Some("mdpi"), Some(Portrait), 320, 480),
    SplashTarget::new("drawable-port-hdpi", Some("hdpi"), Some(Portrait), 480, 800),
    SplashTarget::new("drawable-port-xhdpi", Some("xhdpi"), Some(Portrait), 720, 1280),
    SplashTarget::new("drawable-port-xxhdpi", Some("xxhdpi"), Some(Portrait), 1080, 1920),
    SplashTarget::new("drawable-port-xxxhdpi", Some("xxxhdpi"), Some(Portrait), 1440, 2560),
    SplashTarget::new("drawable-land-mdpi", Some("mdpi"), Some(Landscape), 480, 320),
    SplashTarget::new("drawable-land-hdpi", Some("hdpi"), Some(Landscape), 800, 480),
    SplashTarget::new("drawable-land-xhdpi", Some("xhdpi"), Some(Landscape), 1280, 720),
    SplashTarget::new("drawable-land-xxhdpi", Some("xxhdpi"), Some(Landscape), 1920, 1080),
    SplashTarget::new("drawable-land-xxxhdpi", Some("xxxhdpi"), Some(Landscape), 2560, 1440),
];

pub fn is_known_density(name: &str) -> bool {
    LAUNCHER_ICONS.iter().any(|(density, _)| *density == name)
}
