use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use tile_link::{frame_view, Anchor, FrameReport, HintSession, TileLinkConfig};

#[derive(Parser)]
#[command(
    name = "tile-link",
    version,
    about = "Find removable tile pairs in puzzle screenshots"
)]
struct Cli {
    /// Log verbosity on stderr. With the `tracing` feature a set `RUST_LOG`
    /// takes precedence.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Screenshot to analyze.
    #[arg(long)]
    frame: PathBuf,
    /// Template directory; overrides the config's `templates_dir`.
    #[arg(long)]
    templates: Option<PathBuf>,
    /// JSON config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the anchor cell and print the calibration as JSON.
    Calibrate {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Discover the board and report removable pairs as JSON.
    Analyze {
        #[command(flatten)]
        session: SessionArgs,
        /// Pixel position `X,Y` of the anchor cell; skips calibration.
        #[arg(long, value_parser = parse_point)]
        anchor: Option<(i32, i32)>,
        /// Report path; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Report every removable pair, not only the first.
        #[arg(long)]
        all_pairs: bool,
    },
}

fn parse_point(raw: &str) -> Result<(i32, i32), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{raw}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: LogLevel) {
    if let Err(err) = tile_link::core::init_with_level(level.into()) {
        eprintln!("failed to install logger: {err}");
    }
}

/// `level` is the filter unless `RUST_LOG` is set.
#[cfg(feature = "tracing")]
fn init_logging(level: LogLevel) {
    if let Err(err) = tile_link::core::init_tracing(false, level.into()) {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

fn open_session(args: &SessionArgs) -> Result<HintSession, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => TileLinkConfig::load_json(path)?,
        None => TileLinkConfig::default(),
    };
    if let Some(dir) = &args.templates {
        config.templates_dir = dir.to_string_lossy().into_owned();
    }
    Ok(HintSession::from_config(&config)?)
}

fn load_frame(path: &Path) -> Result<image::RgbImage, Box<dyn std::error::Error>> {
    Ok(image::open(path)?.to_rgb8())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Calibrate { session } => {
            let mut hints = open_session(&session)?;
            let frame = load_frame(&session.frame)?;
            let calibration = hints.calibrate(frame_view(&frame))?;
            println!("{}", serde_json::to_string_pretty(calibration)?);
        }
        Commands::Analyze {
            session,
            anchor,
            output,
            all_pairs,
        } => {
            let mut hints = open_session(&session)?;
            let frame = load_frame(&session.frame)?;
            if let Some((x, y)) = anchor {
                hints.set_anchor(Anchor::at(x, y, &hints.pitch()));
            }
            hints.process(frame_view(&frame))?;

            let Some(anchor) = hints.anchor() else {
                return Err("no anchor after processing the frame".into());
            };
            let mut report = FrameReport::new(
                &session.frame,
                (frame.width() as usize, frame.height() as usize),
                hints.pitch(),
                anchor,
                hints.empty_name(),
                hints.board(),
                all_pairs,
            );
            if let Some(cal) = hints.calibration() {
                report.set_calibration(cal.clone());
            }

            match output {
                Some(path) => {
                    report.write_json(&path)?;
                    eprintln!(
                        "{} cells, hint: {}",
                        report.cells.len(),
                        report
                            .hint
                            .as_ref()
                            .map(|h| format!("({}, {}) - ({}, {})", h.a.col, h.a.row, h.b.col, h.b.row))
                            .unwrap_or_else(|| "none".to_owned())
                    );
                }
                None => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }
    Ok(())
}
