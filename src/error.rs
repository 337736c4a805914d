//! Error types for the logfind library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for logfind operations
pub type Result<T> = std::result::Result<T, LogFindError>;

/// Errors that can occur while searching or managing configuration
#[derive(Debug, Error)]
pub enum LogFindError {
    /// Search was started without a query
    #[error("Keyword entry is empty")]
    EmptyQuery,
    /// Regex query failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// Search folder does not exist
    #[error("Folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),
    /// Search folder exists but is a file
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// No folder given and none remembered
    #[error("No folder selected")]
    NoFolderSelected,
    /// Could not determine where to keep the config file
    #[error("Could not determine a config directory")]
    ConfigDirNotFound,
    /// Config file could not be parsed or written
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
    /// Directory traversal failed
    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),
    /// Background task panicked or was cancelled
    #[error("Task error: {0}")]
    TaskError(#[from] tokio::task::JoinError),
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
