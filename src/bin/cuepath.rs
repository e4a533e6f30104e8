use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cuepath", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stage state at one instant as JSON.
    Sample(SampleArgs),
    /// Write the stage state per frame as JSON lines.
    Frames(FramesArgs),
    /// Play a scene in real time, with the clock ticker on stderr.
    Play(PlayArgs),
    /// Run the clock ticker alone.
    Clock(ClockArgs),
    /// Print an easing curve as a table.
    Ease(EaseArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Time in seconds.
    #[arg(long)]
    at: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Stop after this many seconds (defaults to the sequence duration).
    #[arg(long)]
    until: Option<f64>,

    /// Output JSON-lines path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame rate of the playback loop.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Playback speed multiplier.
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Press restart after this many seconds (landing scenes only).
    #[arg(long)]
    restart_at: Option<f64>,
}

#[derive(Parser, Debug)]
struct ClockArgs {
    /// Number of ticks before exiting.
    #[arg(long, default_value_t = 5)]
    ticks: u32,

    /// IANA time zone to display (`Europe/Berlin`); defaults to the host zone.
    #[arg(long)]
    zone: Option<String>,

    /// Label printed instead of the zone abbreviation.
    #[arg(long)]
    label: Option<String>,

    /// Start from a fixed RFC 3339 instant and advance without sleeping.
    #[arg(long)]
    at: Option<String>,
}

#[derive(Parser, Debug)]
struct EaseArgs {
    /// Curve name (`power2.in`, `elastic.out(1, 0.5)`, `slow(0.3, 0.7, false)`, ...).
    name: String,

    /// Number of intervals in the table.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Play(args) => cmd_play(args),
        Command::Clock(args) => cmd_clock(args),
        Command::Ease(args) => cmd_ease(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_scene(path: &Path) -> anyhow::Result<cuepath::Scene> {
    cuepath::Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Ok(Box::new(BufWriter::new(f)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let mut seq = scene
        .sequencer(cuepath::RecordedNavigation::default())
        .context("build sequencer")?;
    seq.play();
    seq.advance_to(args.at);

    let doc = serde_json::json!({
        "time": args.at,
        "navigations": seq.navigator().destinations(),
        "state": seq.stage().state(),
    });
    let mut out = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut out, &doc).context("write sample JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fps = cuepath::Fps::new(args.fps, 1)?;
    let mut seq = scene
        .sequencer(cuepath::RecordedNavigation::default())
        .context("build sequencer")?;
    let until = args.until.unwrap_or_else(|| seq.duration());
    let frames = fps.frames_covering(until);

    let mut out = open_output(args.out.as_deref())?;
    seq.play();
    for f in 0..=frames {
        let time = fps.frame_to_secs(cuepath::FrameIndex(f)).min(until);
        seq.advance_to(time);
        let line = serde_json::json!({
            "frame": f,
            "time": time,
            "state": seq.stage().state(),
        });
        serde_json::to_writer(&mut out, &line).context("write frame JSON")?;
        writeln!(out)?;
    }
    out.flush()?;

    for destination in seq.navigator().destinations() {
        eprintln!("navigate -> {destination}");
    }
    Ok(())
}

/// Ticker field printing every write to stderr.
struct StderrField(&'static str);

impl cuepath::DisplayField for StderrField {
    fn write(&mut self, text: &str) {
        eprintln!("{:>7}: {text}", self.0);
    }
}

/// Log surface printing appended lines to stderr.
struct StderrLog;

impl cuepath::LogSurface for StderrLog {
    fn append_line(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

fn stderr_ticker<C: cuepath::Clock>(
    clock: C,
    opts: cuepath::TickerOpts,
) -> cuepath::CuepathResult<cuepath::Ticker<C, StderrField, StderrLog>> {
    cuepath::Ticker::new(
        clock,
        StderrField("clock"),
        StderrField("uptime"),
        StderrLog,
        opts,
    )
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let fps = cuepath::Fps::new(args.fps, 1)?;
    let dt = fps.frame_duration_secs();
    let frame = Duration::from_secs_f64(dt);
    let mut ticker = stderr_ticker(
        cuepath::SystemClock::new(),
        cuepath::TickerOpts::default(),
    )?;

    if scene.is_landing() {
        let mut page = scene
            .landing_page(cuepath::RecordedNavigation::default())
            .context("build landing page")?;
        page.start();
        let mut elapsed = 0.0;
        let mut restart_at = args.restart_at;
        while !page.is_finished() {
            std::thread::sleep(frame);
            elapsed += dt;
            if restart_at.is_some_and(|at| elapsed >= at) {
                restart_at = None;
                page.press_restart();
                ticker.refresh("restart pressed");
            }
            page.tick(dt * args.speed);
            ticker.advance(dt);
        }
        report_navigation(page.navigator().destinations());
    } else {
        let mut seq = scene
            .sequencer(cuepath::RecordedNavigation::default())
            .context("build sequencer")?;
        seq.set_time_scale(args.speed)?;
        seq.play();
        while !seq.is_finished() {
            std::thread::sleep(frame);
            seq.tick(dt);
            ticker.advance(dt);
        }
        report_navigation(seq.navigator().destinations());
    }
    ticker.refresh("playback finished");
    Ok(())
}

fn report_navigation(destinations: &[String]) {
    for destination in destinations {
        println!("navigate -> {destination}");
    }
}

fn cmd_clock(args: ClockArgs) -> anyhow::Result<()> {
    let zone = args
        .zone
        .as_deref()
        .map(|name| {
            name.parse::<cuepath::Tz>()
                .map_err(|e| anyhow::anyhow!("unknown time zone '{name}': {e}"))
        })
        .transpose()?;
    let opts = cuepath::TickerOpts {
        zone_label: args.label,
        ..cuepath::TickerOpts::default()
    };
    match args.at {
        Some(at) => {
            // Without --zone a fixed instant renders in UTC, independent of the host.
            let zone = zone.unwrap_or(cuepath::Tz::UTC);
            let clock = cuepath::FixedClock::parse_in(&at, zone)
                .with_context(|| format!("parse instant '{at}'"))?;
            let mut ticker = stderr_ticker(clock, opts)?;
            for _ in 1..args.ticks {
                ticker.clock_mut().advance(chrono::TimeDelta::seconds(1));
                ticker.advance(1.0);
            }
            ticker.refresh("done");
        }
        None => {
            let clock = cuepath::SystemClock::in_zone(zone.unwrap_or_else(cuepath::host_zone));
            let mut ticker = stderr_ticker(clock, opts)?;
            for _ in 1..args.ticks {
                std::thread::sleep(Duration::from_secs(1));
                ticker.advance(1.0);
            }
            ticker.refresh("done");
        }
    }
    Ok(())
}

fn cmd_ease(args: EaseArgs) -> anyhow::Result<()> {
    let ease: cuepath::Ease = args
        .name
        .parse()
        .with_context(|| format!("parse easing '{}'", args.name))?;
    anyhow::ensure!(args.steps > 0, "--steps must be > 0");
    println!("# {ease}");
    let mut out = std::io::stdout().lock();
    for i in 0..=args.steps {
        let t = f64::from(i) / f64::from(args.steps);
        writeln!(out, "{t:.3}\t{:.6}", ease.apply(t))?;
    }
    Ok(())
}
