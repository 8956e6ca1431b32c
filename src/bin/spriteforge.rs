use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use spriteforge::{
    BackgroundSource, ConverterSettings, OutputFormat, ProcessOptions, QuantizeOptions,
    RemovalOptions, SheetGrid, SourceSheetStore, encode_raster, process_sprites,
};

#[derive(Parser, Debug)]
#[command(name = "spriteforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert sources into one pixel-art sprite sheet.
    Convert(ConvertArgs),
    /// Write a default settings JSON document.
    Settings(SettingsArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input files (GIFs or sprite-sheet images); repeatable.
    #[arg(long = "in", required = true)]
    inputs: Vec<PathBuf>,

    /// Optional settings JSON; flags below override it.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output frame width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output frame height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Grid columns for sprite-sheet image inputs.
    #[arg(long)]
    src_cols: Option<u32>,

    /// Grid rows for sprite-sheet image inputs.
    #[arg(long)]
    src_rows: Option<u32>,

    /// Fixed output column count (0 = auto).
    #[arg(long, default_value_t = 0)]
    cols: u32,

    /// Remove the background via border flood fill.
    #[arg(long)]
    remove_bg: bool,

    /// Background similarity tolerance (0-255).
    #[arg(long, default_value_t = 10)]
    tolerance: u8,

    /// Background color source.
    #[arg(long, value_enum, default_value_t = BgSourceChoice::Auto)]
    bg_source: BgSourceChoice,

    /// Erosion passes applied after background removal.
    #[arg(long, default_value_t = 0)]
    erode: u32,

    /// Also clear enclosed background-colored regions.
    #[arg(long)]
    fill_interior: bool,

    /// Reduce the sheet to at most this many colors (0 = off).
    #[arg(long, default_value_t = 0)]
    colors: usize,

    /// Apply Floyd-Steinberg dithering when quantizing.
    #[arg(long)]
    dither: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SettingsArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BgSourceChoice {
    Auto,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl From<BgSourceChoice> for BackgroundSource {
    fn from(v: BgSourceChoice) -> Self {
        match v {
            BgSourceChoice::Auto => Self::Auto,
            BgSourceChoice::TopLeft => Self::TopLeft,
            BgSourceChoice::TopRight => Self::TopRight,
            BgSourceChoice::BottomLeft => Self::BottomLeft,
            BgSourceChoice::BottomRight => Self::BottomRight,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Webp,
}

impl From<FormatChoice> for OutputFormat {
    fn from(v: FormatChoice) -> Self {
        match v {
            FormatChoice::Png => Self::Png,
            FormatChoice::Webp => Self::Webp,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Settings(args) => cmd_settings(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            ConverterSettings::from_json(&json)?
        }
        None => ConverterSettings::default(),
    };
    if let Some(w) = args.width {
        settings.target_width = w;
    }
    if let Some(h) = args.height {
        settings.target_height = h;
    }
    if let Some(c) = args.src_cols {
        settings.src_cols = c;
    }
    if let Some(r) = args.src_rows {
        settings.src_rows = r;
    }
    settings.validate()?;

    let grid = SheetGrid::new(settings.src_cols, settings.src_rows)?;
    let mut store = SourceSheetStore::new();
    for path in &args.inputs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes =
            fs::read(path).with_context(|| format!("read source '{}'", path.display()))?;

        let is_gif = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
        if is_gif {
            store.insert_gif(&name, &bytes)?;
        } else {
            store.insert_image_bytes(&name, &bytes, grid)?;
        }
    }

    let frames = store.generate_frames();
    let opts = ProcessOptions {
        target_width: settings.target_width,
        target_height: settings.target_height,
        output_cols: args.cols,
        removal: args.remove_bg.then(|| RemovalOptions {
            source: args.bg_source.into(),
            tolerance: args.tolerance,
            erode_iterations: args.erode,
            fill_interior: args.fill_interior,
        }),
        quantize: (args.colors > 0).then(|| QuantizeOptions {
            max_colors: args.colors,
            dither: args.dither,
        }),
        ..ProcessOptions::default()
    };

    let Some(sheet) = process_sprites(&store, &frames, &opts)? else {
        anyhow::bail!("no frames to process");
    };

    let bytes = encode_raster(&sheet.raster, args.format.into())?;
    fs::write(&args.out, bytes)
        .with_context(|| format!("write output '{}'", args.out.display()))?;
    println!(
        "wrote {} ({}x{} frames of {}x{}px)",
        args.out.display(),
        sheet.layout.cols,
        sheet.layout.rows,
        sheet.frame_width,
        sheet.frame_height
    );
    Ok(())
}

fn cmd_settings(args: SettingsArgs) -> anyhow::Result<()> {
    let json = ConverterSettings::default().to_json()?;
    fs::write(&args.out, json)
        .with_context(|| format!("write settings '{}'", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}
