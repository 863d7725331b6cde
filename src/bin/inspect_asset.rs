use anyhow::{Context, Result};
use image::io::Reader as ImageReader;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "android/app/src/main/res/drawable/splash.png".to_string());

    let img = ImageReader::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .decode()
        .with_context(|| format!("Failed to decode {path}"))?;

    let rgba_img = img.to_rgba8();
    let width = img.width();
    let height = img.height();

    println!("Inspecting: {}", path);
    println!("Image dimensions: {}x{} ({:?})", width, height, img.color());
    if width == 0 || height == 0 {
        println!("⚠ Empty image");
        return Ok(());
    }

    let top = rgba_img.get_pixel(0, 0);
    let bottom = rgba_img.get_pixel(0, height - 1);
    let center = rgba_img.get_pixel(width / 2, height / 2);

    println!("\nSampled pixels:");
    println!("  top-left     RGBA: {:?}", top.0);
    println!("  bottom-left  RGBA: {:?}", bottom.0);
    println!("  center       RGBA: {:?}", center.0);

    let transparent = rgba_img.pixels().filter(|p| p[3] < 255).count();
    println!("  {} of {} pixels are not fully opaque", transparent, width * height);

    let has_gradient = top != bottom;
    let has_logo = center.0 == [255, 255, 255, 255];

    if has_gradient && has_logo {
        println!("✓ Looks like a splash screen (gradient background, white logo)");
    } else if width == height {
        println!("✓ Square image, likely a launcher icon");
    } else {
        println!("⚠ Neither a splash screen nor a launcher icon");
    }

    Ok(())
}
