//! Colored message prefixes and the stderr logger used by the binary.

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;

/// Colors are on unless `NO_COLOR` is set.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "[error]".red().bold().to_string()
    } else {
        "[error]".to_string()
    }
}

pub fn warn_prefix() -> String {
    if colors_enabled() {
        "[warn]".yellow().bold().to_string()
    } else {
        "[warn]".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "[note]".cyan().bold().to_string()
    } else {
        "[note]".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "[info]".blue().bold().to_string()
    } else {
        "[info]".to_string()
    }
}

fn prefix_for(level: Level) -> String {
    match level {
        Level::Error => error_prefix(),
        Level::Warn => warn_prefix(),
        Level::Info => info_prefix(),
        Level::Debug | Level::Trace => note_prefix(),
    }
}

/// Writes log records to stderr with the same prefixes as user messages.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {}", prefix_for(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Install the stderr logger. `verbose` raises the level to debug.
/// Calling it twice keeps the first logger and only updates the level.
pub fn init_logging(verbose: bool) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
}
