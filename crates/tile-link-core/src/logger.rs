//! Process-wide log output for the `tile-link` tools.
//!
//! Library crates only emit `log` records. A binary picks one backend at
//! startup: [`init_with_level`] writes one line per record to stderr, and
//! [`init_tracing`] (feature `tracing`) installs a `tracing` subscriber that
//! also receives the discovery and calibration spans.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Workspace crates log under their own name; only the suffix is printed.
const CRATE_PREFIX: &str = "tile_link_";

/// `tile_link_grid::mapper` is printed as `grid`, the facade as `tile_link`.
fn short_target(target: &str) -> &str {
    let krate = target.split("::").next().unwrap_or(target);
    krate.strip_prefix(CRATE_PREFIX).unwrap_or(krate)
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let millis = self.started.elapsed().as_millis();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "+{millis:>6}ms {:<5} {}: {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Send `log` records at or above `level` to stderr as
/// `+elapsed LEVEL crate: message`.
///
/// The first call wins; later calls keep the installed level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(feature = "tracing")]
fn level_directive(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

/// Install a `tracing` subscriber for the whole process.
///
/// `RUST_LOG`, when set, replaces `default_level` entirely. Human output is
/// compact; JSON output adds one event per closed span with its busy and idle
/// times, for profiling the discovery stages.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(default_level)));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init()
    } else {
        builder.compact().with_target(false).finish().try_init()
    }
}
