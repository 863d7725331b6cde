//! `assets.json` data model
//!
//! A flat record of every image a run wrote, so the result can be checked
//! or diffed without opening the PNGs.

use crate::render::Style;
use crate::sizes::Orientation;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

pub const MANIFEST_FILE: &str = "assets.json";

/// Root structure of an `assets.json` file
#[derive(Serialize, Debug, Clone)]
pub struct AssetManifest {
    /// Every written asset, in generation order
    pub assets: Vec<AssetEntry>,

    /// Format version and generator name
    pub info: Info,
}

/// What role an image plays in the Android resource tree
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Launcher,
    LauncherRound,
    LauncherForeground,
    Splash,
}

impl AssetKind {
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Launcher => "ic_launcher.png",
            AssetKind::LauncherRound => "ic_launcher_round.png",
            AssetKind::LauncherForeground => "ic_launcher_foreground.png",
            AssetKind::Splash => "splash.png",
        }
    }
}

/// A single written image
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssetEntry {
    /// Path relative to the output root, `/`-separated
    pub path: String,

    pub kind: AssetKind,

    /// Density bucket (e.g. "xhdpi"); absent for the default `drawable` folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<String>,

    /// Screen orientation for orientation-qualified splash folders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    pub width: u32,
    pub height: u32,

    /// Composition the image was rendered from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Source icon the image was resized from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Versioning and authorship information
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The manifest format version (currently 1)
    pub version: u8,

    /// The tool that wrote the manifest
    pub generator: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            generator: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

impl AssetManifest {
    pub fn new(assets: Vec<AssetEntry>) -> Self {
        Self {
            assets,
            info: Info::default(),
        }
    }
}

impl AssetEntry {
    /// Creates an entry for `folder/<kind file name>`
    ///
    /// # Arguments
    /// * `folder` - The resource folder (e.g. "mipmap-hdpi")
    /// * `kind` - What the image is
    /// * `width`, `height` - Pixel size of the written image
    pub fn new(folder: &str, kind: AssetKind, width: u32, height: u32) -> Self {
        Self {
            path: format!("{folder}/{}", kind.file_name()),
            kind,
            density: None,
            orientation: None,
            width,
            height,
            style: None,
            source: None,
        }
    }

    pub fn with_density(mut self, density: &str) -> Self {
        self.density = Some(density.to_string());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_source(mut self, source: &Path) -> Self {
        self.source = Some(source.display().to_string());
        self
    }
}

/// Writes `assets.json` into `dir`
///
/// # Errors
/// Returns an error if serialization fails or the file can't be written.
pub fn write_manifest(dir: &Path, assets: Vec<AssetEntry>) -> Result<()> {
    let manifest = AssetManifest::new(assets);
    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize assets.json")?;
    std::fs::write(dir.join(MANIFEST_FILE), json).context("Failed to write assets.json file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_entry_path_uses_kind_file_name() {
        let entry = AssetEntry::new("mipmap-hdpi", AssetKind::LauncherRound, 72, 72);
        assert_eq!(entry.path, "mipmap-hdpi/ic_launcher_round.png");
        assert_eq!(entry.width, 72);
    }

    #[test]
    fn test_splash_entry_serialization() {
        let entry = AssetEntry::new("drawable-land-xhdpi", AssetKind::Splash, 1280, 720)
            .with_density("xhdpi")
            .with_orientation(Orientation::Landscape)
            .with_style(Style::Splash);

        let json = serde_json::to_string_pretty(&AssetManifest::new(vec![entry])).unwrap();

        let expected_fields = [
            "\"path\": \"drawable-land-xhdpi/splash.png\"",
            "\"kind\": \"splash\"",
            "\"density\": \"xhdpi\"",
            "\"orientation\": \"landscape\"",
            "\"width\": 1280",
            "\"height\": 720",
            "\"style\": \"splash\"",
            "\"version\": 1",
        ];
        for field in expected_fields {
            assert!(
                json.contains(field),
                "JSON missing expected field: {}\nActual JSON:\n{}",
                field,
                json
            );
        }
        assert!(!json.contains("\"source\""));
    }

    #[test]
    fn test_launcher_entry_from_source() {
        let entry = AssetEntry::new("mipmap-mdpi", AssetKind::LauncherForeground, 48, 48)
            .with_density("mdpi")
            .with_source(Path::new("src/assets/iconApp.png"));

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["kind"], "launcher_foreground");
        assert_eq!(value["source"], "src/assets/iconApp.png");
        assert!(value.get("style").is_none());
        assert!(value.get("orientation").is_none());
    }

    #[test]
    fn test_write_manifest() {
        let dir = TempDir::new().unwrap();
        let assets = vec![
            AssetEntry::new("mipmap-mdpi", AssetKind::Launcher, 48, 48)
                .with_density("mdpi")
                .with_style(Style::CalendarOnWhite),
            AssetEntry::new("drawable", AssetKind::Splash, 480, 800).with_style(Style::Splash),
        ];

        write_manifest(dir.path(), assets).unwrap();

        let content = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["assets"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["assets"][0]["style"], "calendar-on-white");
        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["info"]["generator"], "splash-gen");
    }
}
