use anyhow::Result;
use clap::Parser;
use splash_gen::generate::{self, Options, DEFAULT_OUTPUT};
use splash_gen::Style;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "splash-gen",
    about = "Draw Android launcher icons and splash screens"
)]
struct Args {
    /// Existing icon to resize instead of drawing one (PNG, any size).
    #[clap(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Android resource directory to write into.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Composition used for launcher icons when no source is given
    #[clap(long, value_enum, default_value_t = Style::CalendarOnWhite)]
    icon_style: Style,

    /// Generate only launcher icons
    #[clap(long, conflicts_with = "splash_only")]
    icons_only: bool,

    /// Generate only splash screens
    #[clap(long)]
    splash_only: bool,

    /// Restrict output to these density buckets (e.g. mdpi,xhdpi)
    #[clap(long, value_delimiter = ',', value_name = "DENSITIES")]
    densities: Option<Vec<String>>,

    /// Gradient start / accent color (CSS color format)
    #[clap(long, default_value = "#667eea")]
    primary: String,

    /// Gradient end / accent color (CSS color format)
    #[clap(long, default_value = "#764ba2")]
    secondary: String,

    /// Splash screen title
    #[clap(long, default_value = "Salon Booking")]
    title: String,

    /// Splash screen subtitle
    #[clap(long, default_value = "Il tuo salone a portata di tap")]
    subtitle: String,

    /// TrueType font for splash captions (defaults to a system font)
    #[clap(long, value_name = "FONT")]
    font: Option<PathBuf>,

    /// Also write assets.json listing every generated file
    #[clap(long)]
    manifest: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        Options {
            source: args.source,
            output: args.output,
            icon_style: args.icon_style,
            icons_only: args.icons_only,
            splash_only: args.splash_only,
            densities: args.densities,
            primary: args.primary,
            secondary: args.secondary,
            title: args.title,
            subtitle: args.subtitle,
            font: args.font,
            manifest: args.manifest,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let report = generate::generate_assets(&args.into())?;

    if !report.is_success() {
        for failure in &report.failed {
            eprintln!("✗ {}: {:#}", failure.path.display(), failure.error);
        }
        anyhow::bail!(
            "{} of {} assets could not be written",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    println!("\n✨ Generated {} assets", report.written.len());
    Ok(())
}
