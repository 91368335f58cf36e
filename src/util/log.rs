/// Log infrastructure.
///
/// There are five APIs for producing log messages:
/// 1. `error!`
/// 2. `warn!`
/// 3. `info!`
/// 4. `debug!`
/// 5. `trace!`
/// which corresponds to five different log levels.
///
/// To give all developers a common sense of "when to use which log level", we give some guidelines
/// and examples here:
///
/// 1. Use `err!` to mark errors, e.g., a context stream whose flags name no known architecture.
///    The codecs return errors; they never log them at `error!` level themselves.
///
/// 2. Use `warn!` to warn about potentially problematic issues, e.g., keeping a context stream
///    uninterpreted because it could not be decoded.
///
/// 3. Use `info!` to show important events (from users' perspective) in normal execution.
///    Decoding a single context is not one of them.
///
/// 4. Use `debug!` to track major events in normal execution, e.g., dropping undefined feature
///    bits or meeting an architecture without a codec.
///
/// 5. Use `trace` to record the most detailed info, e.g., the flags word of every decoded
///    context.
///
/// One of the most important principles for effective logging is "don't log too much or too little".
/// So log messages should be inserted with discretion.
///
/// Note. Encoding runs on the crash-capture path and never logs. Do not add log calls to
/// `encode_into`.
use log::*;

use crate::prelude::*;

pub use log::{max_level, LevelFilter};

/// Initialize the log infrastructure with the given log level.
///
/// Fails if a logger has already been installed in this process.
pub fn init(level: LevelFilter) -> Result<()> {
    static LOGGER: SimpleLogger = SimpleLogger;
    log::set_logger(&LOGGER).map_err(|e| err!(e))?;
    log::set_max_level(level);
    Ok(())
}

/// A simple logger that prints the level and the module of each message to stderr.
struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{:>5}][{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
