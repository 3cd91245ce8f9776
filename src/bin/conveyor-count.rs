use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use conveyor_count::integration::draw_annotations;
use conveyor_count::{CounterConfig, CountingPipeline};

/// Count boxes and pallets crossing their zone lines in a sequence of frames.
#[derive(Parser, Debug)]
#[command(name = "conveyor-count", version)]
struct Args {
    /// Directory of frame images, processed in file name order
    #[arg(long, value_name = "DIR")]
    frames: PathBuf,
    /// JSON zone configuration; built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the conveyor zone rotation, in degrees
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<f64>,
    /// Write annotated frames to this directory
    #[arg(long, value_name = "DIR")]
    annotate: Option<PathBuf>,
    /// Print the final counts as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CounterConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CounterConfig::default(),
    };
    if let Some(rotation) = args.rotation {
        config.conveyor.tracking.rotation_deg = rotation;
        config.validate().context("invalid rotation override")?;
    }

    let frames = list_frames(&args.frames)?;
    if frames.is_empty() {
        bail!("no frames found in {}", args.frames.display());
    }
    if let Some(dir) = &args.annotate {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    info!(
        frames = frames.len(),
        rotation = config.conveyor.tracking.rotation_deg,
        "starting run"
    );

    let mut pipeline = CountingPipeline::from_config(&config);
    for path in &frames {
        let mut frame = match image::open(path) {
            Ok(img) => img.to_rgb8(),
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable frame");
                continue;
            }
        };

        let report = match pipeline.process_frame(&frame) {
            Ok(report) => report,
            Err(err) => match err.source {},
        };

        if let Some(dir) = &args.annotate {
            draw_annotations(&mut frame, &report.annotations);
            let name = path.file_name().context("frame path has no file name")?;
            let out = dir.join(name);
            frame
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
        }
    }

    let counts = pipeline.counts();
    if args.json {
        println!("{}", serde_json::to_string(&counts)?);
    } else {
        println!("boxes: {}", counts.boxes);
        println!("pallets: {}", counts.pallets);
    }
    Ok(())
}

/// Regular files in `dir`, sorted by name.
fn list_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut frames = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            frames.push(entry.path());
        }
    }
    frames.sort();
    Ok(frames)
}
