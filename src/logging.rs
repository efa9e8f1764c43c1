//! File-based tracing setup. The terminal is owned by the TUI, so log lines go
//! to `<data_local_dir>/rowstack/logs/rowstack.log` instead of stdout.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

const LOG_FILE_NAME: &str = "rowstack.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("No suitable data directory available for logs")]
    NoDataDir,
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

fn log_directory() -> Result<PathBuf, LoggingError> {
    let data_dir = dirs::data_local_dir().ok_or(LoggingError::NoDataDir)?;
    let path = logs_path(&data_dir);
    fs::create_dir_all(&path).map_err(|source| LoggingError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// whole process or buffered lines are lost.
pub fn init() -> Result<WorkerGuard, LoggingError> {
    let log_dir = log_directory()?;
    let log_path = log_dir.join(LOG_FILE_NAME);
    ensure_file_exists(&log_path)?;

    let file_appender = rolling::never(&log_dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(file_writer);
    let subscriber = Registry::default()
        .with(build_env_filter())
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Logging initialized; log file at {}", log_path.display());
    Ok(guard)
}

fn logs_path(data_dir: &Path) -> PathBuf {
    data_dir.join("rowstack").join("logs")
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::CreateLogFile {
            path: path.to_path_buf(),
            source,
        })
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logs_path_is_app_scoped() {
        let dir = tempdir().unwrap();
        let path = logs_path(dir.path());

        assert_eq!(path, dir.path().join("rowstack").join("logs"));
        assert!(path.join(LOG_FILE_NAME).ends_with("rowstack/logs/rowstack.log"));
    }

    #[test]
    fn test_ensure_file_exists_creates_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);

        ensure_file_exists(&path).unwrap();
        assert!(path.exists());
        // Existing files are left alone.
        fs::write(&path, "kept").unwrap();
        ensure_file_exists(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }

    #[test]
    fn test_ensure_file_exists_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join(LOG_FILE_NAME);

        match ensure_file_exists(&path) {
            Err(LoggingError::CreateLogFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected CreateLogFile error, got {:?}", other),
        }
    }
}
