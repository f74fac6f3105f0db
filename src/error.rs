use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected command-line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum window size must be at least 1x1, got {width}x{height}")]
    MinSize { width: i32, height: i32 },
    #[error("reserved bottom must not be negative, got {0}")]
    ReservedBottom(i32),
    #[error("cell scale must be at least 1x1, got {width}x{height}")]
    CellScale { width: i32, height: i32 },
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
