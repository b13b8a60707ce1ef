//! Replays recorded pose frames (one JSON frame per line) through a form
//! analysis session and prints one JSON analysis per frame.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use formcoach_analysis::{FormSession, PlankPolicy, SessionConfig};
use formcoach_core::{ExerciseKind, FormAnalysis, PoseFrame};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formcoach-replay")]
#[command(about = "Replay recorded pose frames through the exercise form analyzer")]
struct Cli {
    /// JSON-lines file of pose frames ("-" for stdin)
    input: PathBuf,

    /// Session config file (TOML/JSON/YAML); flags below override it
    #[arg(long)]
    config: Option<String>,

    /// Exercise being performed (plank, push-up, squat, ...)
    #[arg(long)]
    exercise: Option<ExerciseKind>,

    /// Flip x coordinates around this image width (front camera input)
    #[arg(long)]
    mirror_width: Option<f64>,

    /// Report sagging plank hips as "keep your hips level"
    #[arg(long)]
    fold_plank_sag: bool,

    /// Only print frames whose feedback differs from the previous frame
    #[arg(long)]
    changes_only: bool,
}

/// One output line
#[derive(Serialize)]
struct FrameReport {
    frame: usize,
    #[serde(flatten)]
    analysis: FormAnalysis,
    perfect_reps: u32,
}

impl FrameReport {
    fn new(frame: usize, analysis: &FormAnalysis, perfect_reps: u32) -> Self {
        Self {
            frame,
            analysis: *analysis,
            perfect_reps,
        }
    }
}

fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("loading session config {}", path))?,
        None => SessionConfig::default(),
    };

    if let Some(exercise) = cli.exercise {
        config.exercise = exercise;
    }
    if let Some(width) = cli.mirror_width {
        config = config.with_mirroring(width);
    }
    if cli.fold_plank_sag {
        config.plank_policy = PlankPolicy::FoldedHipLevel;
    }

    config.validate()?;
    Ok(config)
}

fn parse_frame(line: &str) -> Option<formcoach_core::Result<PoseFrame>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(PoseFrame::from_json(line))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = session_config(&cli)?;
    let mut session = FormSession::new(config);

    let reader: Box<dyn BufRead> = if cli.input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("opening {}", cli.input.display()))?;
        Box::new(BufReader::new(file))
    };

    tracing::info!(
        session = %session.id(),
        exercise = %session.exercise(),
        "replaying {}",
        cli.input.display()
    );

    let mut out = BufWriter::new(io::stdout().lock());
    let mut frames = 0usize;
    let mut skipped = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", line_no + 1))?;
        let frame = match parse_frame(&line) {
            None => continue,
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                // A bad record is a frame the detector never delivered
                tracing::warn!("skipping line {}: {}", line_no + 1, e);
                skipped += 1;
                continue;
            }
        };

        let analysis = session.analyze(frame);
        frames += 1;

        if cli.changes_only && !session.feedback_changed() {
            continue;
        }
        let report = FrameReport::new(frames, &analysis, session.perfect_rep_count());
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    out.flush()?;

    let progress = session.progress();
    tracing::info!(
        frames,
        skipped,
        perfect_reps = progress.count,
        goal = progress.goal,
        "replay finished"
    );

    Ok(())
}
