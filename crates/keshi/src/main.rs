//! keshi: replay mask-painting sessions from the command line.
//!
//! Loads an image, replays a JSON stroke script through the mask editor
//! exactly as the interactive UI would drive it, and writes the resulting
//! mask (and optionally a translucent overlay preview) as PNG. Useful
//! for:
//!
//! - Producing masks for batch object removal without a browser
//! - Reproducing painting bugs from a recorded session
//! - Comparing binary and soft mask exports for the same strokes
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin keshi -- <IMAGE> --script strokes.json --mask mask.png
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod script;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use keshi_mask::{Editor, EditorConfig, EditorError, MaskMode, StampSize, Tool};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::script::{FileLoader, ReplayStats, Script};

/// Replay a mask-painting script over an image.
///
/// Positions in the script are display coordinates; they are mapped into
/// the image's natural resolution before stamping.
#[derive(Parser)]
#[command(name = "keshi", version)]
struct Cli {
    /// Path to the source image (PNG, JPEG, BMP, WebP) or a `data:` URI.
    image: String,

    /// Path to the JSON stroke script.
    #[arg(long)]
    script: PathBuf,

    /// Write the exported mask as a grayscale PNG.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Write the mask drawn over the image as an RGBA PNG.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// How coverage is exported.
    #[arg(long, value_enum, default_value_t = Mode::Binary)]
    mask_mode: Mode,

    /// Tool selected before the script starts.
    #[arg(long, value_enum, default_value_t = ToolArg::Brush)]
    tool: ToolArg,

    /// Stamp size selected before the script starts.
    #[arg(long, default_value_t = StampSize::DEFAULT, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(u64::from(StampSize::MIN)..=u64::from(StampSize::MAX)))]
    size: u32,

    /// Stroke width of the circle tool's ring, in image pixels.
    #[arg(long, default_value_t = EditorConfig::DEFAULT_RING_WIDTH)]
    ring_width: f32,

    /// Disable anti-aliased stamp edges.
    #[arg(long)]
    no_anti_alias: bool,

    /// Output the report as JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Full editor config as a JSON string.
    ///
    /// When provided, all other editor parameter flags are ignored.
    /// The JSON must be a valid `EditorConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Mask export mode selection.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Any coverage becomes fully selected.
    Binary,
    /// Anti-aliased coverage is kept.
    Soft,
}

/// Initial tool selection.
#[derive(Clone, Copy, ValueEnum)]
enum ToolArg {
    /// Filled disc.
    Brush,
    /// Filled square.
    Rectangle,
    /// Ring outline.
    Circle,
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("error parsing --config-json: {0}")]
    Config(#[source] serde_json::Error),

    #[error("error reading script {path}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing script {path}: {source}")]
    ParseScript {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("error loading image: {0}")]
    Load(#[from] EditorError),

    #[error("error encoding {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: keshi_export::ExportError,
    },

    #[error("error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error serializing report: {0}")]
    Report(#[source] serde_json::Error),
}

/// Build an [`EditorConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual parameter flags are ignored.  Otherwise, a config is
/// assembled from the individual flags.
fn config_from_cli(cli: &Cli) -> Result<EditorConfig, CliError> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(CliError::Config);
    }

    Ok(EditorConfig {
        default_tool: match cli.tool {
            ToolArg::Brush => Tool::Brush,
            ToolArg::Rectangle => Tool::Rectangle,
            ToolArg::Circle => Tool::Circle,
        },
        default_stamp_size: StampSize::clamped(cli.size),
        ring_width: cli.ring_width,
        anti_alias: !cli.no_anti_alias,
        mask_mode: match cli.mask_mode {
            Mode::Binary => MaskMode::Binary,
            Mode::Soft => MaskMode::Soft,
        },
        ..EditorConfig::default()
    })
}

/// Summary of one run.
#[derive(Debug, Serialize)]
struct Report {
    image: String,
    width: u32,
    height: u32,
    mask_mode: MaskMode,
    #[serde(flatten)]
    replay: ReplayStats,
    covered_pixels: u64,
    covered_fraction: f64,
}

impl Report {
    #[allow(clippy::cast_precision_loss)]
    fn new(image: &str, editor: &Editor, replay: ReplayStats) -> Self {
        let dims = editor.mask().dimensions();
        let covered_pixels = editor.mask().covered_pixel_count();
        let total = dims.pixel_count();
        let covered_fraction = if total == 0 {
            0.0
        } else {
            covered_pixels as f64 / total as f64
        };
        Self {
            image: editor
                .image()
                .map_or_else(|| image.to_owned(), |img| img.uri().to_owned()),
            width: dims.width,
            height: dims.height,
            mask_mode: editor.config().mask_mode,
            replay,
            covered_pixels,
            covered_fraction,
        }
    }

    /// Human-readable report.
    fn text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Image: {} ({}x{})", self.image, self.width, self.height);
        let _ = writeln!(out, "{}", "=".repeat(40));
        let _ = writeln!(out, "{:<20} {:>12}", "Actions", self.replay.actions);
        let _ = writeln!(out, "{:<20} {:>12}", "Stamps issued", self.replay.stamps_issued);
        let _ = writeln!(out, "{:<20} {:>12}", "Stamps rejected", self.replay.stamps_rejected);
        let _ = writeln!(out, "{:<20} {:>12}", "Actions failed", self.replay.actions_failed);
        let _ = writeln!(
            out,
            "{:<20} {:>12} ({:.2}%)",
            "Covered pixels",
            self.covered_pixels,
            self.covered_fraction * 100.0
        );
        let mode = match self.mask_mode {
            MaskMode::Binary => "binary",
            MaskMode::Soft => "soft",
        };
        let _ = write!(out, "{:<20} {:>12}", "Mask mode", mode);
        out
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keshi=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_png(
    path: &Path,
    encoded: Result<Vec<u8>, keshi_export::ExportError>,
) -> Result<(), CliError> {
    let bytes = encoded.map_err(|source| CliError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, &bytes).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "written");
    Ok(())
}

fn run(cli: &Cli) -> Result<Report, CliError> {
    let config = config_from_cli(cli)?;
    tracing::debug!(?config, "editor config");

    let script_text = std::fs::read_to_string(&cli.script).map_err(|source| CliError::ReadScript {
        path: cli.script.clone(),
        source,
    })?;
    let script: Script =
        serde_json::from_str(&script_text).map_err(|source| CliError::ParseScript {
            path: cli.script.clone(),
            source,
        })?;

    let mut editor = Editor::new(config);
    editor.select_image(&cli.image, &FileLoader)?;

    let stats = script::replay(&mut editor, &script, &FileLoader);
    tracing::info!(
        actions = stats.actions,
        stamps = stats.stamps_issued,
        rejected = stats.stamps_rejected,
        "script replayed"
    );

    if let Some(ref path) = cli.mask {
        write_png(path, keshi_export::mask_to_png(&editor.export_mask()))?;
    }
    if let Some(ref path) = cli.overlay
        && let Some(image) = editor.image()
    {
        let preview = keshi_export::overlay(
            image.pixels(),
            editor.mask().coverage(),
            editor.config().overlay_color,
        );
        write_png(path, keshi_export::rgba_to_png(&preview))?;
    }

    Ok(Report::new(&cli.image, &editor, stats))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let report = match run(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report).map_err(CliError::Report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.text());
    }

    ExitCode::SUCCESS
}
