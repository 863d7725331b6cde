use image::{Rgba, RgbaImage};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn splash_gen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_splash-gen"))
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("splash-gen command failed");
    }
}

fn assert_png(path: &Path, width: u32, height: u32) {
    let img = image::open(path)
        .unwrap_or_else(|e| panic!("{} should be a readable PNG: {}", path.display(), e));
    assert_eq!(
        (img.width(), img.height()),
        (width, height),
        "unexpected size for {}",
        path.display()
    );
}

/// Runs `splash-gen --densities mdpi -o res` and checks every folder it
/// should touch, and the ones it should leave alone.
#[test]
fn test_generates_mdpi_resources() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .args(["--densities", "mdpi", "-o"])
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");
    assert_success(&output);

    for name in ["ic_launcher.png", "ic_launcher_round.png", "ic_launcher_foreground.png"] {
        assert_png(&output_dir.join("mipmap-mdpi").join(name), 48, 48);
    }
    assert_png(&output_dir.join("drawable-mdpi/splash.png"), 320, 480);
    assert_png(&output_dir.join("drawable-port-mdpi/splash.png"), 320, 480);
    assert_png(&output_dir.join("drawable-land-mdpi/splash.png"), 480, 320);

    assert!(!output_dir.join("mipmap-hdpi").exists());
    assert!(!output_dir.join("drawable").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Generated mipmap-mdpi/ic_launcher.png"));
}

#[test]
fn test_output_is_deterministic() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");

    for dir in [&first, &second] {
        let output = splash_gen()
            .args(["--densities", "mdpi", "--icons-only", "--icon-style", "scissors-on-gradient", "-o"])
            .arg(dir)
            .output()
            .expect("Failed to run splash-gen command");
        assert_success(&output);
    }

    let a = std::fs::read(first.join("mipmap-mdpi/ic_launcher.png")).unwrap();
    let b = std::fs::read(second.join("mipmap-mdpi/ic_launcher.png")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_resizes_source_icon() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source_path = temp_dir.path().join("iconApp.png");
    create_dummy_512x512_image(&source_path);
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .arg(&source_path)
        .args(["--icons-only", "--densities", "hdpi,xxxhdpi", "-o"])
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");
    assert_success(&output);

    assert_png(&output_dir.join("mipmap-hdpi/ic_launcher.png"), 72, 72);
    assert_png(&output_dir.join("mipmap-xxxhdpi/ic_launcher_foreground.png"), 192, 192);

    let round = image::open(output_dir.join("mipmap-hdpi/ic_launcher_round.png"))
        .unwrap()
        .to_rgba8();
    assert_eq!(round.get_pixel(0, 0)[3], 0, "round icon corners are masked");
    assert_eq!(round.get_pixel(36, 36)[3], 255);

    assert!(!output_dir.join("drawable-hdpi").exists());
}

/// Runs with `--manifest` and asserts that `assets.json` exists and lists
/// every written file.
#[test]
fn test_manifest_lists_generated_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .args(["--densities", "mdpi", "--manifest", "-o"])
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");
    assert_success(&output);

    let content =
        std::fs::read_to_string(output_dir.join("assets.json")).expect("Failed to read assets.json");
    let parsed: serde_json::Value =
        serde_json::from_str(&content).expect("assets.json should contain valid JSON");

    let assets = parsed["assets"].as_array().expect("'assets' array");
    assert_eq!(assets.len(), 6);
    assert_eq!(parsed["info"]["version"], 1);

    for (i, asset) in assets.iter().enumerate() {
        let path = asset["path"].as_str().expect("path should be a string");
        assert!(output_dir.join(path).is_file(), "entry {} points at a missing file", i);
        assert!(asset["width"].is_u64(), "entry {} should have a width", i);
        assert_eq!(asset["density"], "mdpi");
    }
}

#[test]
fn test_missing_source_fails_without_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .arg(temp_dir.path().join("iconApp.png"))
        .arg("-o")
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    assert!(!output_dir.exists());
}

#[test]
fn test_unknown_density_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .args(["--densities", "ldpi", "-o"])
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown density: ldpi"));
    assert!(!output_dir.exists());
}

#[test]
fn test_conflicting_modes_are_rejected() {
    let output = splash_gen()
        .args(["--icons-only", "--splash-only"])
        .output()
        .expect("Failed to run splash-gen command");
    assert!(!output.status.success());
}

#[test]
fn test_inspect_asset_recognizes_splash() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("res");

    let output = splash_gen()
        .args(["--densities", "mdpi", "--splash-only", "-o"])
        .arg(&output_dir)
        .output()
        .expect("Failed to run splash-gen command");
    assert_success(&output);

    let output = Command::new(env!("CARGO_BIN_EXE_inspect-asset"))
        .arg(output_dir.join("drawable-mdpi/splash.png"))
        .output()
        .expect("Failed to run inspect-asset command");
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("320x480"));
    assert!(stdout.contains("Looks like a splash screen"), "{}", stdout);
}

/// Creates a dummy 512x512 RGBA image and saves it as PNG
fn create_dummy_512x512_image(path: &Path) {
    let width = 512;
    let height = 512;

    let mut image = RgbaImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let red = (255.0 * x as f32 / width as f32) as u8;
        let green = (255.0 * y as f32 / height as f32) as u8;
        *pixel = Rgba([red, green, 128, 255]);
    }

    image.save(path).expect("Failed to save dummy image");
}
