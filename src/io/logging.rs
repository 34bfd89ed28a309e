use std::path::Path;

use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};

const LOG_FILE_BASENAME: &str = "taskpad";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level `{0}` (expected error, warn, info, debug or trace)")]
    UnknownLevel(String),
    #[error("could not start logger: {0}")]
    Backend(#[from] FlexiLoggerError),
}

/// Start the file logger. Without a directory nothing is logged and `None`
/// is returned. The handle must stay alive for the rest of the process.
pub fn init_logging(level: &str, dir: Option<&Path>) -> Result<Option<LoggerHandle>, LoggingError> {
    let level = normalize_level(level)?;
    let Some(dir) = dir else {
        return Ok(None);
    };

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    log::info!(
        "logging started level={} dir={} version={}",
        level,
        dir.display(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(Some(handle))
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" => Ok("error"),
        "warn" => Ok("warn"),
        "info" => Ok("info"),
        "debug" => Ok("debug"),
        "trace" => Ok("trace"),
        _ => Err(LoggingError::UnknownLevel(level.to_string())),
    }
}
