//! # partforge-av
//!
//! Adaptive media segmentation over the ffmpeg/ffprobe CLI tools.
//!
//! This crate provides functionality for:
//! - Probing media files for duration and total bitrate (ffprobe JSON)
//! - Parsing human size and bitrate strings and forecasting part counts
//! - Splitting a file into size-bounded parts, losslessly or by
//!   re-encoding, without assuming any byte to duration mapping
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use partforge_av::split::{CutStrategy, FfmpegToolchain, SplitRequest, Splitter};
//! use partforge_av::units::parse_size;
//!
//! let limit = parse_size("2G")?;
//! let request = SplitRequest {
//!     source: "/path/to/video.mkv".into(),
//!     out_dir: "splits".into(),
//!     prefix: "video".into(),
//! };
//! let toolchain = FfmpegToolchain;
//! let report = Splitter::new(&toolchain, request, CutStrategy::stream_copy(limit)).run()?;
//! println!("{} parts written", report.parts.len());
//! # Ok::<(), partforge_av::Error>(())
//! ```

mod error;
pub mod paths;
pub mod probe;
pub mod split;
pub mod tools;
pub mod units;

// Re-exports
pub use error::{Error, Result};
pub use probe::MediaInfo;
pub use split::{
    CutMode, CutStrategy, FfmpegToolchain, Part, SplitReport, SplitRequest, Splitter, Toolchain,
};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo};
