//! Logger setup for binaries.
//!
//! The library itself only emits through the `log` facade.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use thiserror::Error;

/// Failure to install the logger.
#[derive(Debug, Error)]
pub enum LogInitError {
    /// The log file could not be opened.
    #[error("failed to create log file: {0}")]
    Io(#[from] std::io::Error),

    /// A global logger was already installed.
    #[error("logger already initialized: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Install the global logger.
///
/// The terminal gets INFO, or DEBUG when `verbose`. When `log_file` is given
/// every DEBUG record is also appended there.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), LogInitError> {
    let config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    let term_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = File::options().create(true).append(true).open(path)?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
    }

    CombinedLogger::init(loggers)?;
    Ok(())
}
