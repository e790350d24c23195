//! `peg-target`: evaluate a frame of contours stored as JSON.

mod draw;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, warn};
use peg_target::io::{FrameContours, PegDetectConfig, PegDetectReport, PegIoError};
use peg_target::{overlay_rects, PegTargetParamsError};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("no frame given: pass --frame or set frame_path in the config")]
    MissingFrame,
    #[error(transparent)]
    Io(#[from] PegIoError),
    #[error(transparent)]
    Params(#[from] PegTargetParamsError),
    #[error("overlay image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "peg-target", version, about = "Peg target evaluation from contour frames")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and write a JSON report.
    Detect(DetectArgs),
    /// Print (or write) the default configuration as JSON.
    DefaultConfig {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// Frame JSON: `{ "contours": [[[x, y], ...], ...] }`.
    #[arg(long)]
    frame: Option<PathBuf>,
    /// Detector configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report path; overrides `output_path` from the config.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Image to draw the overlay onto.
    #[arg(long, requires = "overlay")]
    image: Option<PathBuf>,
    /// Where to save the annotated image.
    #[arg(long, requires = "image")]
    overlay: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: u8) {
    let level = peg_target_core::level_for_verbosity(verbose);
    if let Err(err) = peg_target_core::init_frame_logger(level) {
        eprintln!("logger already installed: {err}");
    }
}

#[cfg(feature = "tracing")]
fn init_logging(_verbose: u8) {
    peg_target_core::init_frame_tracing(false);
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Detect(args) => run_detect(args),
        Command::DefaultConfig { out } => run_default_config(out.as_deref()),
    }
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(args)))]
fn run_detect(args: DetectArgs) -> Result<(), CliError> {
    let cfg = match &args.config {
        Some(path) => PegDetectConfig::load_json(path)?,
        None => PegDetectConfig::default(),
    };
    let frame_path = args
        .frame
        .clone()
        .or_else(|| cfg.frame_path.as_ref().map(PathBuf::from))
        .ok_or(CliError::MissingFrame)?;

    let detector = cfg.build_detector()?;
    let frame = FrameContours::load_json(&frame_path)?;
    info!("{} contours in {}", frame.contours.len(), frame_path.display());

    let mut report = PegDetectReport::new(&frame_path, &frame);
    report.evaluate(&detector, &frame);
    if let Some(eval) = &report.evaluation {
        if !eval.is_established() {
            warn!("peg target not found");
        }
        println!("{eval}");
    }

    if let (Some(image_path), Some(overlay_path)) = (&args.image, &args.overlay) {
        if let Some(eval) = &report.evaluation {
            write_overlay(image_path, overlay_path, &overlay_rects(eval))?;
        }
    }

    let out_path = args.out.unwrap_or_else(|| cfg.output_path());
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(PegIoError::from)?;
    }
    report.write_json(&out_path)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}

fn write_overlay(
    image_path: &Path,
    overlay_path: &Path,
    rects: &[peg_target::OverlayRect],
) -> Result<(), CliError> {
    let mut img = image::open(image_path)?.to_rgb8();
    draw::draw_overlay(&mut img, rects);
    img.save(overlay_path)?;
    info!("wrote overlay to {}", overlay_path.display());
    Ok(())
}

fn run_default_config(out: Option<&Path>) -> Result<(), CliError> {
    let cfg = PegDetectConfig::default();
    match out {
        Some(path) => {
            cfg.write_json(path)?;
            println!("wrote default config to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&cfg)?),
    }
    Ok(())
}
