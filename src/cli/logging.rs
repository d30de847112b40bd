use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_CONSOLE_LEVEL: &str = "info";
const DEFAULT_FILE_LEVEL: &str = "debug";
const DEFAULT_LOG_FILE: &str = "./logs/sound-duper.log";

/// Console logging goes to stderr, filtered by `TRACING_LEVEL`. The log file at
/// `LOG_FILE_PATH` is filtered separately by `LOG_FILE_LEVEL` so per-phase timings
/// are kept without cluttering the terminal.
///
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init_logger() -> WorkerGuard {
    let console_level =
        env::var("TRACING_LEVEL").unwrap_or_else(|_| DEFAULT_CONSOLE_LEVEL.to_string());
    let file_level = env::var("LOG_FILE_LEVEL").unwrap_or_else(|_| DEFAULT_FILE_LEVEL.to_string());
    let log_file = env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());

    let (directory, file_name) = split_log_path(Path::new(&log_file));
    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .pretty()
                .with_file(false)
                .with_line_number(false)
                .with_target(false)
                .without_time()
                .with_ansi(true)
                .with_filter(EnvFilter::new(&console_level)),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(EnvFilter::new(&file_level)),
        )
        .init();

    debug!(
        "Logging to stderr at '{}' and to {} at '{}'",
        console_level, log_file, file_level
    );

    guard
}

/// Directory and file name for the appender. A bare file name logs into the
/// working directory.
fn split_log_path(path: &Path) -> (PathBuf, OsString) {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("sound-duper.log"));
    (directory, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path(Path::new("./logs/run.log")),
            (PathBuf::from("./logs"), OsString::from("run.log"))
        );
        assert_eq!(
            split_log_path(Path::new("run.log")),
            (PathBuf::from("."), OsString::from("run.log"))
        );
        assert_eq!(
            split_log_path(Path::new("/")),
            (PathBuf::from("."), OsString::from("sound-duper.log"))
        );
    }
}
