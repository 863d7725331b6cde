use crate::canvas::Canvas;
use crate::manifest::{write_manifest, AssetEntry, AssetKind};
use crate::render::{Renderer, Style, Theme};
use crate::sizes::{is_known_density, LAUNCHER_ICONS, SPLASH_SCREENS};
use crate::{text, writer};
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage, Rgba};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
    str::FromStr,
};

pub const DEFAULT_OUTPUT: &str = "android/app/src/main/res";

/// Everything a run needs; the CLI fills this in from its flags.
#[derive(Debug, Clone)]
pub struct Options {
    pub source: Option<PathBuf>,
    pub output: PathBuf,
    pub icon_style: Style,
    pub icons_only: bool,
    pub splash_only: bool,
    pub densities: Option<Vec<String>>,
    pub primary: String,
    pub secondary: String,
    pub title: String,
    pub subtitle: String,
    pub font: Option<PathBuf>,
    pub manifest: bool,
}

impl Default for Options {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            source: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            icon_style: Style::CalendarOnWhite,
            icons_only: false,
            splash_only: false,
            densities: None,
            primary: "#667eea".to_string(),
            secondary: "#764ba2".to_string(),
            title: theme.title,
            subtitle: theme.subtitle,
            font: None,
            manifest: false,
        }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Outcome of a batch: what was written and what could not be.
#[derive(Debug, Default)]
pub struct Report {
    pub written: Vec<AssetEntry>,
    pub failed: Vec<Failure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Where launcher icons come from
enum IconSource {
    Render(Style),
    Resize { path: PathBuf, image: DynamicImage },
}

/// Run the whole batch.
///
/// Configuration problems (missing source, bad color, unknown density,
/// unreadable font) are returned before anything is written. A failure to
/// write one asset is recorded in the report and the batch moves on.
pub fn generate_assets(options: &Options) -> Result<Report> {
    let icon_source = match &options.source {
        Some(path) => IconSource::Resize {
            path: path.clone(),
            image: load_image(path)?,
        },
        None => IconSource::Render(options.icon_style),
    };
    let densities = resolve_densities(options.densities.as_deref())?;
    let renderer = Renderer::new(build_theme(options)?);

    // Ensure the output directory exists
    create_dir_all(&options.output).context("Can't create output directory")?;

    let mut report = Report::default();

    if !options.splash_only {
        generate_launcher_icons(&icon_source, &renderer, options, &densities, &mut report);
    }

    if !options.icons_only {
        generate_splash_screens(&renderer, options, &densities, &mut report);
    }

    if options.manifest {
        write_manifest(&options.output, report.written.clone())?;
        println!("✓ Generated {}", crate::manifest::MANIFEST_FILE);
    }

    Ok(report)
}

fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        anyhow::bail!("Source icon {} not found", path.display());
    }
    let source = image::open(path)
        .with_context(|| format!("Failed to load image {}", path.display()))?;

    if source.width() != source.height() {
        log::warn!(
            "Source icon is {}x{}, not square; it will be stretched",
            source.width(),
            source.height()
        );
    }

    Ok(source)
}

fn resolve_densities(filter: Option<&[String]>) -> Result<Option<Vec<String>>> {
    let Some(filter) = filter else {
        return Ok(None);
    };
    for density in filter {
        if !is_known_density(density) {
            anyhow::bail!(
                "Unknown density: {}. Available densities: mdpi, hdpi, xhdpi, xxhdpi, xxxhdpi",
                density
            );
        }
    }
    Ok(Some(filter.to_vec()))
}

/// Folders without a density are only produced when no filter is set.
fn wants_density(densities: &Option<Vec<String>>, density: Option<&str>) -> bool {
    match (densities, density) {
        (None, _) => true,
        (Some(list), Some(density)) => list.iter().any(|d| d == density),
        (Some(_), None) => false,
    }
}

fn build_theme(options: &Options) -> Result<Theme> {
    let font = if options.icons_only {
        None
    } else {
        match &options.font {
            Some(path) => Some(text::load_font(path)?),
            None => discover_font(),
        }
    };

    Ok(Theme {
        primary: parse_color(&options.primary)?,
        secondary: parse_color(&options.secondary)?,
        title: options.title.clone(),
        subtitle: options.subtitle.clone(),
        font,
        ..Theme::default()
    })
}

fn discover_font() -> Option<rusttype::Font<'static>> {
    let Some(path) = text::find_system_font() else {
        log::warn!("No system font found; splash captions will be skipped (use --font)");
        return None;
    };
    match text::load_font(&path) {
        Ok(font) => {
            log::debug!("Using caption font {}", path.display());
            Some(font)
        }
        Err(err) => {
            log::warn!("{:#}; splash captions will be skipped", err);
            None
        }
    }
}

/// Parse a CSS color (`#fff`, `rgb(...)`, named colors, ...).
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow::anyhow!("Invalid CSS color: {}", value))?;
    Ok(Rgba([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
        (color.alpha * 255.).round() as u8,
    ]))
}

fn generate_launcher_icons(
    icon_source: &IconSource,
    renderer: &Renderer,
    options: &Options,
    densities: &Option<Vec<String>>,
    report: &mut Report,
) {
    println!("Generating Android launcher icons...");

    for (density, size) in LAUNCHER_ICONS {
        if !wants_density(densities, Some(density)) {
            continue;
        }
        let folder = format!("mipmap-{density}");

        let (launcher, foreground) = match icon_source {
            IconSource::Resize { image, .. } => {
                let resized = image.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
                (resized.clone(), resized)
            }
            IconSource::Render(style) => (
                renderer.render(size, *style),
                renderer.render_foreground(size, *style),
            ),
        };
        let mut round = Canvas::from(launcher.clone());
        round.clip_to_circle();
        let round = round.into_image();

        let variants = [
            (AssetKind::Launcher, launcher),
            (AssetKind::LauncherRound, round),
            (AssetKind::LauncherForeground, foreground),
        ];
        for (kind, image) in variants {
            let entry = AssetEntry::new(&folder, kind, size, size).with_density(density);
            let entry = match icon_source {
                IconSource::Resize { path, .. } => entry.with_source(path),
                IconSource::Render(style) => entry.with_style(*style),
            };
            write_asset(&options.output, DynamicImage::ImageRgba8(image), entry, report);
        }
    }
}

fn generate_splash_screens(
    renderer: &Renderer,
    options: &Options,
    densities: &Option<Vec<String>>,
    report: &mut Report,
) {
    println!("Generating splash screens...");

    for target in SPLASH_SCREENS {
        if !wants_density(densities, target.density) {
            continue;
        }
        let rendered = renderer.render(target.dimensions(), Style::Splash);
        // Splash screens are fully opaque; drop the alpha channel.
        let image = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rendered).to_rgb8());

        let mut entry = AssetEntry::new(target.folder, AssetKind::Splash, target.width, target.height)
            .with_style(Style::Splash);
        if let Some(density) = target.density {
            entry = entry.with_density(density);
        }
        if let Some(orientation) = target.orientation {
            entry = entry.with_orientation(orientation);
        }
        write_asset(&options.output, image, entry, report);
    }
}

fn write_asset(root: &Path, image: DynamicImage, entry: AssetEntry, report: &mut Report) {
    let path = root.join(&entry.path);
    log::debug!("Encoding {:?} image to {}", image.color(), path.display());
    match writer::save(&image, &path) {
        Ok(()) => {
            println!("  ✓ Generated {} ({}x{})", entry.path, entry.width, entry.height);
            report.written.push(entry);
        }
        Err(error) => {
            log::error!("Skipping {}: {:#}", entry.path, error);
            report.failed.push(Failure { path, error });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::MANIFEST_FILE;
    use image::RgbaImage;
    use tempfile::TempDir;

    fn options_in(dir: &Path) -> Options {
        Options {
            output: dir.join("res"),
            densities: Some(vec!["mdpi".to_string()]),
            ..Options::default()
        }
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#667eea").unwrap(), Rgba([102, 126, 234, 255]));
        assert_eq!(parse_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_density_filter() {
        let filter = Some(vec!["hdpi".to_string()]);
        assert!(wants_density(&None, None));
        assert!(wants_density(&filter, Some("hdpi")));
        assert!(!wants_density(&filter, Some("mdpi")));
        assert!(!wants_density(&filter, None));

        assert!(resolve_densities(Some(&["ldpi".to_string()])).is_err());
    }

    #[test]
    fn test_rendered_icons_for_one_density() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            icons_only: true,
            manifest: true,
            ..options_in(dir.path())
        };

        let report = generate_assets(&options).unwrap();
        assert!(report.is_success());
        assert_eq!(report.written.len(), 3);

        let mipmap = options.output.join("mipmap-mdpi");
        for name in ["ic_launcher.png", "ic_launcher_round.png", "ic_launcher_foreground.png"] {
            let img = image::open(mipmap.join(name)).unwrap();
            assert_eq!((img.width(), img.height()), (48, 48), "{name}");
        }
        let round = image::open(mipmap.join("ic_launcher_round.png")).unwrap().to_rgba8();
        assert_eq!(round.get_pixel(0, 0)[3], 0);
        assert_eq!(round.get_pixel(24, 24)[3], 255);

        assert!(!options.output.join("mipmap-hdpi").exists());
        assert!(!options.output.join("drawable-mdpi").exists());
        assert!(options.output.join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn test_missing_source_aborts_before_output() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            source: Some(dir.path().join("iconApp.png")),
            ..options_in(dir.path())
        };

        let err = generate_assets(&options).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!options.output.exists());
    }

    #[test]
    fn test_invalid_color_aborts_before_output() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            primary: "bogus".to_string(),
            ..options_in(dir.path())
        };

        assert!(generate_assets(&options).is_err());
        assert!(!options.output.exists());
    }

    #[test]
    fn test_resized_source_icons() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("iconApp.png");
        RgbaImage::from_pixel(300, 300, Rgba([200, 50, 50, 255]))
            .save(&source)
            .unwrap();
        let options = Options {
            source: Some(source),
            icons_only: true,
            ..options_in(dir.path())
        };

        let report = generate_assets(&options).unwrap();
        assert!(report.written.iter().all(|e| e.source.is_some()));

        let icon = image::open(options.output.join("mipmap-mdpi/ic_launcher.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(icon.dimensions(), (48, 48));
        let center = icon.get_pixel(24, 24);
        for (got, want) in center.0.iter().zip([200u8, 50, 50, 255]) {
            assert!(got.abs_diff(want) <= 1, "{:?}", center);
        }
    }

    #[test]
    fn test_unwritable_asset_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            densities: Some(vec!["mdpi".to_string(), "hdpi".to_string()]),
            splash_only: true,
            ..options_in(dir.path())
        };
        // Block one splash folder with a regular file.
        std::fs::create_dir_all(&options.output).unwrap();
        std::fs::write(options.output.join("drawable-land-mdpi"), b"in the way").unwrap();

        let report = generate_assets(&options).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].path.ends_with("drawable-land-mdpi/splash.png"));
        // mdpi and hdpi: plain, port and land folders, minus the blocked one.
        assert_eq!(report.written.len(), 5);
        assert!(options.output.join("drawable-land-hdpi/splash.png").is_file());
    }

    #[test]
    fn test_splash_screens_are_rgb() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            splash_only: true,
            ..options_in(dir.path())
        };

        let report = generate_assets(&options).unwrap();
        assert_eq!(report.written.len(), 3);

        let splash = image::open(options.output.join("drawable-port-mdpi/splash.png")).unwrap();
        assert!(matches!(splash, DynamicImage::ImageRgb8(_)));
        assert_eq!((splash.width(), splash.height()), (320, 480));
    }
}
