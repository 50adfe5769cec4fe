#![cfg(feature = "std")]

use std::env;
use std::io::Write;

use log::{self, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from the `SALVO_LOG` environment variable.
/// Defaults to `info` if the variable is not set or invalid; `fallback` overrides
/// that default.
pub fn init_logging(fallback: Option<LevelFilter>) {
    let level = env::var("SALVO_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .or(fallback)
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
