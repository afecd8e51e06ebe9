use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "beatframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one frame and print its state as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and print one JSON state per line.
    Frames(RangeArgs),
    /// Print the composed scene timeline.
    Timeline(InputArgs),
    /// Print the resolved beats of every scene.
    Beats(BeatsArgs),
    /// Print a determinism fingerprint per frame.
    Fingerprint(RangeArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the end of the timeline.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate frames on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BeatsArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Only print this scene.
    #[arg(long)]
    scene: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Beats(args) => cmd_beats(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
    }
}

fn load_project(path: &Path) -> anyhow::Result<beatframe::PreparedProject> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let def: beatframe::ProjectDef = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse project JSON '{}'", path.display()))?;
    beatframe::prepare(&def).context("prepare project")
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f =
                File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

fn frame_range(
    project: &beatframe::PreparedProject,
    args: &RangeArgs,
) -> anyhow::Result<beatframe::FrameRange> {
    let end = args.end.unwrap_or(project.total_frames());
    if end > project.total_frames() {
        anyhow::bail!(
            "--end {end} is past the end of the timeline ({} frames)",
            project.total_frames()
        );
    }
    Ok(beatframe::FrameRange::new(
        beatframe::FrameIndex(args.start),
        beatframe::FrameIndex(end),
    )?)
}

fn threading(args: &RangeArgs) -> beatframe::Threading {
    if args.parallel {
        beatframe::Threading::Parallel {
            threads: args.threads,
        }
    } else {
        beatframe::Threading::Serial
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input.in_path)?;
    let state = beatframe::Evaluator::eval_frame(&project, beatframe::FrameIndex(args.frame))?;
    let mut w = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut w, &state).context("write frame JSON")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_frames(args: RangeArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input.in_path)?;
    let range = frame_range(&project, &args)?;
    let frames = beatframe::eval_frames(&project, range, threading(&args))?;
    let mut w = open_output(args.out.as_deref())?;
    for state in &frames {
        serde_json::to_writer(&mut w, state).context("write frame JSON")?;
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

fn cmd_timeline(args: InputArgs) -> anyhow::Result<()> {
    let project = load_project(&args.in_path)?;
    let mut w = open_output(None)?;
    serde_json::to_writer_pretty(&mut w, &project.timeline).context("write timeline JSON")?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_beats(args: BeatsArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input.in_path)?;
    let mut w = open_output(None)?;
    let mut matched = false;
    for scene in &project.scenes {
        if args.scene.as_deref().is_some_and(|id| id != scene.id) {
            continue;
        }
        matched = true;
        writeln!(w, "{}", scene.id)?;
        for b in &scene.beats.beats {
            writeln!(
                w,
                "  {:<16} {:>8.3}s  frame {:>6}{}",
                b.name,
                b.seconds,
                b.frame.0,
                if b.clamped { "  (clamped)" } else { "" }
            )?;
        }
    }
    w.flush()?;
    if let Some(id) = args.scene
        && !matched
    {
        anyhow::bail!("no scene with id '{id}'");
    }
    Ok(())
}

fn cmd_fingerprint(args: RangeArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input.in_path)?;
    let range = frame_range(&project, &args)?;
    let frames = beatframe::eval_frames(&project, range, threading(&args))?;
    let mut w = open_output(args.out.as_deref())?;
    for state in &frames {
        writeln!(
            w,
            "{}\t{:016x}",
            state.frame.0,
            beatframe::fingerprint_frame(state)
        )?;
    }
    w.flush()?;
    Ok(())
}
