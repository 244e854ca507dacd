//! roentgen: command-line host for the enhancement session.
//!
//! Loads a radiograph, applies a sequence of session operations in
//! order, and writes the resulting buffer and/or the exposure anomaly
//! report. Drives `roentgen-session` exactly as a GUI host would,
//! including undo/redo as ordinary operations in the sequence.
//!
//! # Usage
//!
//! ```text
//! roentgen scan.png --apply contrast,sharpen,highlight --out marked.png
//! roentgen scan.png --report
//! roentgen scan.png --apply equalize,undo,redo --out back.png
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use roentgen_pipeline::{
    AnomalyParams, BrightnessContrast, CannyParams, EqualizeParams, HighlightParams,
};
use roentgen_session::{HistoryLog, PipelineSession};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Raw percentage form of the pipeline's unit contrast factor.
const DEFAULT_CONTRAST_RAW: i32 = 100;

/// Radiograph enhancement with bounded undo/redo.
///
/// Applies the requested operations in order against a single loaded
/// image and reports or saves the final working buffer.
#[derive(Parser)]
#[command(name = "roentgen", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Comma-separated operations applied in order.
    #[arg(long, value_enum, value_delimiter = ',')]
    apply: Vec<Op>,

    /// Brightness offset used by the contrast operation.
    #[arg(long, default_value_t = BrightnessContrast::DEFAULT_BRIGHTNESS)]
    brightness: i32,

    /// Contrast percentage used by the contrast operation (100 = unchanged).
    #[arg(long, default_value_t = DEFAULT_CONTRAST_RAW)]
    contrast: i32,

    /// Canny low threshold, shared by the canny and highlight operations.
    #[arg(long, default_value_t = CannyParams::DEFAULT_LOW)]
    canny_low: f32,

    /// Canny high threshold, shared by the canny and highlight operations.
    #[arg(long, default_value_t = CannyParams::DEFAULT_HIGH)]
    canny_high: f32,

    /// Contrast clip limit for adaptive equalization.
    #[arg(long, default_value_t = EqualizeParams::DEFAULT_CLIP_LIMIT)]
    clip_limit: f64,

    /// Equalization tile columns.
    #[arg(long, default_value_t = EqualizeParams::DEFAULT_TILE_GRID.0, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    grid_cols: u32,

    /// Equalization tile rows.
    #[arg(long, default_value_t = EqualizeParams::DEFAULT_TILE_GRID.1, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    grid_rows: u32,

    /// Minimum enclosed contour area (square pixels) for highlighting.
    #[arg(long, default_value_t = HighlightParams::DEFAULT_MIN_AREA)]
    min_area: f64,

    /// Histogram bucket count for the anomaly report.
    #[arg(long, default_value_t = AnomalyParams::DEFAULT_BINS, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    bins: u32,

    /// Darkest-bucket pixel count above which the image is anomalous.
    #[arg(long, default_value_t = AnomalyParams::DEFAULT_DARK_THRESHOLD)]
    dark_threshold: u64,

    /// Brightest-bucket pixel count above which the image is anomalous.
    #[arg(long, default_value_t = AnomalyParams::DEFAULT_BRIGHT_THRESHOLD)]
    bright_threshold: u64,

    /// Maximum number of history snapshots held at once.
    #[arg(long, default_value_t = HistoryLog::DEFAULT_CAPACITY, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    history_capacity: usize,

    /// Write the final working buffer to this path (format from extension).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the exposure anomaly report as JSON on stdout.
    #[arg(long)]
    report: bool,
}

/// Session operation selection.
#[derive(Clone, Copy, ValueEnum)]
enum Op {
    /// Brightness/contrast remap of the original image.
    Contrast,
    /// 3x3 sharpening convolution of the working buffer.
    Sharpen,
    /// Replace the working buffer with its binary edge map.
    Canny,
    /// Contrast-limited adaptive histogram equalization.
    Equalize,
    /// Ring sufficiently large edge-bounded regions.
    Highlight,
    /// Return to the original image (undoable).
    Reset,
    /// Step back one committed state.
    Undo,
    /// Step forward one committed state.
    Redo,
}

/// Apply one operation to the session with the parameters from the CLI.
fn apply_op(session: &mut PipelineSession, op: Op, cli: &Cli) {
    match op {
        Op::Contrast => session.set_brightness_contrast(cli.brightness, cli.contrast),
        Op::Sharpen => session.sharpen(),
        Op::Canny => session.canny(&CannyParams {
            low: cli.canny_low,
            high: cli.canny_high,
        }),
        Op::Equalize => session.adaptive_equalize(&EqualizeParams {
            clip_limit: cli.clip_limit,
            tile_grid: (cli.grid_cols, cli.grid_rows),
        }),
        Op::Highlight => session.highlight(&HighlightParams {
            low: cli.canny_low,
            high: cli.canny_high,
            min_area: cli.min_area,
        }),
        Op::Reset => session.reset(),
        Op::Undo => session.undo(),
        Op::Redo => session.redo(),
    }
}

/// Install the tracing subscriber on stderr, honoring `RUST_LOG` with an
/// `info` default. Stdout stays reserved for the JSON report.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let image_bytes = match std::fs::read(&cli.image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", cli.image_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut session = PipelineSession::with_history_capacity(cli.history_capacity);
    if let Err(e) = session.load(&image_bytes) {
        eprintln!("Error loading {}: {e}", cli.image_path.display());
        return ExitCode::FAILURE;
    }

    for &op in &cli.apply {
        apply_op(&mut session, op, &cli);
    }

    eprintln!(
        "History: {} entries, cursor {:?}, undo {}, redo {}",
        session.history().len(),
        session.history().cursor(),
        if session.can_undo() { "yes" } else { "no" },
        if session.can_redo() { "yes" } else { "no" },
    );

    if cli.report {
        let params = AnomalyParams {
            bins: cli.bins,
            dark_threshold: cli.dark_threshold,
            bright_threshold: cli.bright_threshold,
        };
        // The session is loaded at this point, so a report always exists.
        let Some(report) = session.check_anomaly(&params) else {
            eprintln!("Error: no image loaded for the anomaly report");
            return ExitCode::FAILURE;
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(ref out) = cli.out {
        let Some(current) = session.current() else {
            eprintln!("Error: no image loaded to save");
            return ExitCode::FAILURE;
        };
        match current.save(out) {
            Ok(()) => eprintln!("Image written to {}", out.display()),
            Err(e) => {
                eprintln!("Error writing {}: {e}", out.display());
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
