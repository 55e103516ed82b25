use anyhow::{Context, Result};
use blobtrack::Counts;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use vehicle_counter::{CounterConfig, RecordingReader, ReportWriter};

#[derive(Parser, Debug)]
#[command(
    name = "vehicle-counter",
    about = "Track and count vehicles from recorded blob detections"
)]
struct Args {
    /// JSON-lines file with one frame of blobs per line
    #[arg(long, value_name = "PATH")]
    detections: PathBuf,
    /// Engine and detector configuration (defaults when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write one JSON report per frame to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = match &args.config {
        Some(path) => CounterConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            log::info!("No config given, using defaults");
            CounterConfig::default()
        }
    };

    let file = File::open(&args.detections)
        .with_context(|| format!("failed to open {}", args.detections.display()))?;
    let frames = RecordingReader::new(BufReader::new(file));

    let mut report = match &args.report {
        Some(path) => Some(
            ReportWriter::create(path)
                .with_context(|| format!("failed to create report {}", path.display()))?,
        ),
        None => None,
    };

    let started = Instant::now();
    let summary = vehicle_counter::run(&config, frames, report.as_mut())
        .with_context(|| format!("replay of {} failed", args.detections.display()))?;
    let elapsed = started.elapsed();

    log::info!(
        "Processed {} frames in {:.2?} ({} tracks)",
        summary.frames,
        elapsed,
        summary.tracks_created
    );
    for policy in &summary.counts {
        match &policy.counts {
            Counts::Total(total) => log::info!("{}: {} vehicles", policy.policy, total),
            Counts::PerLane(lanes) => {
                for lane in lanes {
                    log::info!("{} / {}: {} vehicles", policy.policy, lane.name, lane.count);
                }
            }
        }
    }
    Ok(())
}
