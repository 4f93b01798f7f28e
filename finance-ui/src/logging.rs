//! Process-wide tracing setup for the terminal calculator.
//!
//! Stdout carries the calculator prompt, so log lines go to stderr and, once
//! [`enable_file_logging`] has been called, to a file as well. The level and
//! the stderr output can be changed after [`init_logging`] without
//! rebuilding the subscriber.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, reload};

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

type Reloader = Box<dyn Fn(EnvFilter) -> Result<(), reload::Error> + Send + Sync>;

/// Handles into the installed subscriber.
struct Controls {
    level: Reloader,
    console: Reloader,
    log_file: Arc<Mutex<Option<File>>>,
}

static CONTROLS: OnceLock<Controls> = OnceLock::new();

fn controls() -> Result<&'static Controls> {
    CONTROLS.get().context("logging is not initialized")
}

/// `<time> <LEVEL> <target> <fields>`; dimmed and colored on a terminal.
struct CalculatorFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "1;32",
        Level::DEBUG => "1;34",
        Level::TRACE => "1;35",
    }
}

impl<S, N> FormatEvent<S, N> for CalculatorFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m \x1b[{}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Appends to the configured log file; output is dropped while none is set.
struct LogFile(Arc<Mutex<Option<File>>>);

impl LogFile {
    fn with_file<T>(
        &self,
        op: impl FnOnce(&mut File) -> io::Result<T>,
        idle: T,
    ) -> io::Result<T> {
        match self.0.lock().unwrap_or_else(PoisonError::into_inner).as_mut() {
            Some(file) => op(file),
            None => Ok(idle),
        }
    }
}

impl Write for LogFile {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.with_file(|file| file.write(buf), buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(File::flush, ())
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber. Call first thing in `main` so that
/// configuration errors are logged too; later calls do nothing.
pub fn init_logging() {
    let log_file = Arc::new(Mutex::new(None));
    let (level_filter, level_handle) = reload::Layer::new(default_filter());
    let (console_filter, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console = tracing_subscriber::fmt::layer()
        .event_format(CalculatorFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .with_filter(console_filter);

    let file_target = log_file.clone();
    let file = tracing_subscriber::fmt::layer()
        .event_format(CalculatorFormat)
        .with_ansi(false)
        .with_writer(move || LogFile(file_target.clone()));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console)
        .with(file)
        .try_init();
    if installed.is_err() {
        return;
    }

    let _ = CONTROLS.set(Controls {
        level: Box::new(move |filter: EnvFilter| level_handle.reload(filter)),
        console: Box::new(move |filter: EnvFilter| console_handle.reload(filter)),
        log_file,
    });
}

/// Replaces the level filter. Takes a bare level (`debug`) or any
/// `EnvFilter` directive list.
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directives)
        .with_context(|| format!("invalid log level '{directives}'"))?;
    (controls()?.level)(filter).context("cannot change the log level")
}

/// Turns stderr output on or off. File output is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    let filter = EnvFilter::new(if enabled { "trace" } else { "off" });
    (controls()?.console)(filter).context("cannot switch console logging")
}

/// Starts appending log lines to `path`, replacing any earlier log file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *controls()?
        .log_file
        .lock()
        .unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_discards_until_a_file_is_set() {
        let slot = Arc::new(Mutex::new(None));
        let mut writer = LogFile(slot.clone());

        assert_eq!(writer.write(b"dropped\n").unwrap(), 8);
        writer.flush().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calculator.log");
        *slot.lock().unwrap() = Some(File::create(&path).unwrap());
        writer.write_all(b"kept\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn malformed_level_is_rejected() {
        let err = set_log_level("finance_ui=loud").unwrap_err();

        assert!(err.to_string().contains("finance_ui=loud"));
    }
}
