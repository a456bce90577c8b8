//! Stderr logger for the chessgrid binaries.
//!
//! Each line carries the seconds since startup and the record target, so
//! batch dataset builds show both which stage emitted a message and how
//! far into the run it happened:
//!
//! ```text
//! [  0.412s DEBUG chessgrid_board::orientation] bottom-left cell not dark, ...
//! ```
//!
//! Binaries call [`init_with_level`] once at startup; library crates only
//! use the `log` macros and never install anything.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

// Filtering goes through `log::max_level()`, so the logger itself only
// needs the start instant for the elapsed prefix.
struct UptimeLogger {
    started: Instant,
}

impl Log for UptimeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<UptimeLogger> = OnceLock::new();

/// Install the uptime logger and set the global level filter.
///
/// Repeated calls after a successful install are no-ops and keep the
/// original filter; only a race with a foreign `log::set_logger` call
/// surfaces a `SetLoggerError`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| UptimeLogger {
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// `tracing`-based alternative to [`init_with_level`], gated behind the
/// `tracing` feature. Reads the filter from `RUST_LOG` (default `info`)
/// and emits either human-readable or flattened-JSON lines.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The CLI propagates install failures with `?`, which needs
    // `SetLoggerError: std::error::Error` (the `log/std` feature).
    #[test]
    fn set_logger_error_converts_to_boxed_error() {
        fn boxes<E: std::error::Error + 'static>(_: Option<E>) {}
        boxes::<log::SetLoggerError>(None);
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        init_with_level(LevelFilter::Info).expect("first install");
        init_with_level(LevelFilter::Trace).expect("second install is ignored");
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
