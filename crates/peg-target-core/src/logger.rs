//! Diagnostics sink for frame evaluation.
//!
//! The evaluator reports through `log`: the per-frame statistics dump at
//! `debug`, each slot decision of the strip scan at `trace`. The binary
//! installs [`init_frame_logger`], which writes one stderr line per record:
//!
//! ```text
//! [  0.004s DEBUG detector]   max_width=95 max_height=45
//! [  0.004s TRACE select] strip 2 replaces strip 0 in slot A
//! ```
//!
//! The tag is the last segment of the emitting module, so lines from the
//! scan and from the aggregate dump stay apart. With the `tracing` feature,
//! [`init_frame_tracing`] installs a `tracing-subscriber` instead and also
//! reports span timings of each evaluated frame.

use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

struct FrameLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for FrameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let component = record.module_path().unwrap_or(record.target());
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            component,
            record.args(),
        );
        // one write per record so concurrent frames do not interleave mid-line
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// `[elapsed LEVEL tag] message\n`, tagged with the last `::` segment of
/// `component`.
fn format_line(
    elapsed_s: f64,
    level: Level,
    component: &str,
    args: &std::fmt::Arguments,
) -> String {
    let tag = component.rsplit("::").next().unwrap_or(component);
    let mut line = String::with_capacity(64);
    let _ = writeln!(line, "[{elapsed_s:7.3}s {level:>5} {tag}] {args}");
    line
}

static LOGGER: OnceLock<FrameLogger> = OnceLock::new();

/// Install the stderr frame logger at `level`.
///
/// The first call wins; later calls leave the installed logger as is.
pub fn init_frame_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| FrameLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Map a `-v` count onto a level: none shows only warnings such as a
/// missing target, `-v` adds progress, `-vv` the statistics dump and
/// `-vvv` every slot decision of the scan.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Closed spans are reported, which gives the wall time of every
/// `evaluate_frame` call. `json` switches to one JSON object per event.
#[cfg(feature = "tracing")]
pub fn init_frame_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_saturates_at_trace() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn lines_are_tagged_with_the_emitting_module() {
        let line = format_line(
            1.5,
            Level::Debug,
            "peg_target::detector",
            &format_args!("center_x={}", 57),
        );
        assert_eq!(line, "[  1.500s DEBUG detector] center_x=57\n");

        let line = format_line(0.0, Level::Warn, "peg_target_cli", &format_args!("not found"));
        assert_eq!(line, "[  0.000s  WARN peg_target_cli] not found\n");
    }
}
