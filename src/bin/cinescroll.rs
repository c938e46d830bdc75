use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "cinescroll", version)]
struct Cli {
    /// Log sequencer diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a sequence, then print a summary.
    Validate(ConfigArgs),
    /// Hold one progress value for a while and print the resulting frame as JSON.
    Sample(SampleArgs),
    /// Sweep progress linearly and write one JSON snapshot per line.
    Scrub(ScrubArgs),
    /// Print the built-in cinematic sequence as JSON.
    DumpDefault,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Sequence JSON. Defaults to the built-in cinematic sequence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    source: ConfigArgs,

    /// Scroll progress to hold.
    #[arg(long)]
    progress: f64,

    /// Seconds to hold before sampling, so damped values settle.
    #[arg(long, default_value_t = 2.0)]
    settle_secs: f64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Include per-instance transforms.
    #[arg(long)]
    instances: bool,
}

#[derive(Args, Debug)]
struct ScrubArgs {
    #[command(flatten)]
    source: ConfigArgs,

    #[arg(long, default_value_t = 0.0)]
    from: f64,

    #[arg(long, default_value_t = 1.0)]
    to: f64,

    /// Sweep duration in seconds.
    #[arg(long, default_value_t = 10.0)]
    secs: f64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Emit every Nth frame.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output JSON-lines path. Defaults to stdout unless `--digest` is set.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print a SHA-256 of the emitted stream.
    #[arg(long)]
    digest: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Scrub(args) => cmd_scrub(args),
        Command::DumpDefault => cmd_dump_default(),
    }
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<cinescroll::SequenceConfig> {
    match &args.config {
        Some(path) => cinescroll::SequenceConfig::from_path(path)
            .with_context(|| format!("load sequence '{}'", path.display())),
        None => Ok(cinescroll::SequenceConfig::cinematic()),
    }
}

fn build(args: &ConfigArgs) -> anyhow::Result<cinescroll::Sequencer> {
    let config = load_config(args)?;
    cinescroll::Sequencer::new(&config).with_context(|| "build sequencer")
}

fn frame_dt(fps: f64) -> anyhow::Result<f64> {
    anyhow::ensure!(fps.is_finite() && fps > 0.0, "--fps must be > 0, got {fps}");
    Ok(1.0 / fps)
}

fn cmd_validate(args: ConfigArgs) -> anyhow::Result<()> {
    let seq = build(&args)?;
    let instances: usize = seq.fields().iter().map(|f| f.len()).sum();
    println!(
        "ok: {} phases, {} lights, {} fields, {} instances",
        seq.table().len(),
        seq.lights().len(),
        seq.fields().len(),
        instances
    );
    for phase in seq.table().phases() {
        println!("  {:<12} [{:.3}, {:.3}]", phase.name(), phase.start(), phase.end());
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let dt = frame_dt(args.fps)?;
    anyhow::ensure!(
        args.settle_secs.is_finite() && args.settle_secs >= 0.0,
        "--settle-secs must be >= 0"
    );
    let mut seq = build(&args.source)?;
    let frames = ((args.settle_secs * args.fps).ceil() as u64).max(1);
    for _ in 0..frames {
        seq.tick(args.progress, dt);
    }
    let json = serde_json::to_string_pretty(&seq.snapshot(args.instances))
        .with_context(|| "encode snapshot JSON")?;
    println!("{json}");
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    let dt = frame_dt(args.fps)?;
    anyhow::ensure!(args.secs.is_finite() && args.secs > 0.0, "--secs must be > 0");
    anyhow::ensure!(args.every >= 1, "--every must be >= 1");
    let mut seq = build(&args.source)?;

    let mut sink: Option<Box<dyn Write>> = match (&args.out, args.digest) {
        (Some(path), _) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Some(Box::new(BufWriter::new(f)) as Box<dyn Write>)
        }
        (None, false) => Some(Box::new(BufWriter::new(std::io::stdout().lock())) as Box<dyn Write>),
        (None, true) => None,
    };
    let mut hasher = sha2::Sha256::new();

    let frames = ((args.secs * args.fps).ceil() as u64).max(1);
    for i in 0..=frames {
        let u = i as f64 / frames as f64;
        seq.tick(args.from + (args.to - args.from) * u, dt);
        if i % args.every != 0 {
            continue;
        }
        let mut line =
            serde_json::to_vec(&seq.snapshot(false)).with_context(|| "encode snapshot JSON")?;
        line.push(b'\n');
        hasher.update(&line);
        if let Some(w) = sink.as_mut() {
            w.write_all(&line).with_context(|| "write snapshot")?;
        }
    }
    if let Some(mut w) = sink {
        w.flush().with_context(|| "flush output")?;
    }

    if args.digest {
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        println!("sha256 {hex}");
    }
    let stats = seq.stats();
    eprintln!(
        "scrubbed {} frames ({} dt clamps, {} progress clamps)",
        stats.frames, stats.dt_clamped, stats.progress_clamped
    );
    Ok(())
}

fn cmd_dump_default() -> anyhow::Result<()> {
    let json = cinescroll::SequenceConfig::cinematic()
        .to_json_pretty()
        .with_context(|| "encode default sequence")?;
    println!("{json}");
    Ok(())
}
