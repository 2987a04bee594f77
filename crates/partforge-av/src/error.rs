//! Error types for partforge-av.

use std::path::PathBuf;

use crate::split::CutMode;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while probing or segmenting media.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required external tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// ffprobe failed to run or produced output we could not read.
    #[error("probe failed: {message}")]
    ProbeFailed { message: String },

    /// ffmpeg exited unsuccessfully while cutting a part.
    #[error("{mode} cut failed: {message}")]
    CutFailed { mode: CutMode, message: String },

    /// The source duration could not be determined, so there is no
    /// way to know when segmentation is finished.
    #[error("could not determine duration of {}", path.display())]
    UnknownDuration { path: PathBuf },

    /// A size string such as "2G" or "700m" did not parse.
    #[error("invalid size: {input:?}")]
    InvalidSize { input: String },

    /// A bitrate string such as "128k" or "2.5m" did not parse.
    #[error("invalid bitrate: {input:?}")]
    InvalidBitrate { input: String },

    /// The specified file or folder was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a probe failure error.
    pub fn probe_failed(message: impl Into<String>) -> Self {
        Self::ProbeFailed {
            message: message.into(),
        }
    }

    /// Create a cut failure error for the given mode.
    pub fn cut_failed(mode: CutMode, message: impl Into<String>) -> Self {
        Self::CutFailed {
            mode,
            message: message.into(),
        }
    }

    /// Create an unknown duration error.
    pub fn unknown_duration(path: impl Into<PathBuf>) -> Self {
        Self::UnknownDuration { path: path.into() }
    }

    /// Create an invalid size error.
    pub fn invalid_size(input: impl Into<String>) -> Self {
        Self::InvalidSize {
            input: input.into(),
        }
    }

    /// Create an invalid bitrate error.
    pub fn invalid_bitrate(input: impl Into<String>) -> Self {
        Self::InvalidBitrate {
            input: input.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
