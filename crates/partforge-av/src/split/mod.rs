//! Adaptive segmentation driver.
//!
//! A split never assumes a mapping from bytes to seconds. Each
//! iteration asks the toolchain to write one size-bounded part, then
//! measures how much source time the part actually covered and
//! advances the cut offset by exactly that amount. Every recorded part
//! is longer than [`TAIL_SLACK_SECS`], so the offset strictly grows
//! and the loop terminates.

mod strategy;
mod toolchain;

pub use strategy::{CutMode, CutRequest, CutStrategy};
pub use toolchain::{FfmpegToolchain, Toolchain};

use crate::paths::part_file_name;
use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Slack absorbed at the source tail, in seconds.
///
/// Container timestamp rounding makes the measured sum of parts drift
/// a fraction of a second from the probed source duration. Anything
/// within this band of the end counts as fully consumed, and a final
/// scrap at most this long is discarded instead of kept.
pub const TAIL_SLACK_SECS: f64 = 0.2;

/// One finished part of a split.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// 1-based position in the part sequence.
    pub index: u32,
    /// Where the part was written.
    pub path: PathBuf,
    /// Measured duration in seconds.
    pub duration: f64,
    /// Size on disk in bytes.
    pub size_bytes: u64,
}

/// What a completed split produced.
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Recorded parts in cut order.
    pub parts: Vec<Part>,
    /// Probed duration of the source in seconds.
    pub source_duration: f64,
}

/// Source and destination of one split.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// File to segment.
    pub source: PathBuf,
    /// Directory receiving the parts, created if missing.
    pub out_dir: PathBuf,
    /// Base name for part files.
    pub prefix: String,
}

/// Drives one file's segmentation from first cut to exhaustion.
pub struct Splitter<'a> {
    toolchain: &'a dyn Toolchain,
    request: SplitRequest,
    strategy: CutStrategy,
    on_part: Option<Box<dyn Fn(&Part) + 'a>>,
}

impl<'a> Splitter<'a> {
    /// Create a splitter over the given toolchain.
    pub fn new(toolchain: &'a dyn Toolchain, request: SplitRequest, strategy: CutStrategy) -> Self {
        Self {
            toolchain,
            request,
            strategy,
            on_part: None,
        }
    }

    /// Register a callback invoked as each part is recorded.
    ///
    /// Purely observational; the callback cannot change the outcome of
    /// the split.
    pub fn with_part_callback(mut self, callback: impl Fn(&Part) + 'a) -> Self {
        self.on_part = Some(Box::new(callback));
        self
    }

    /// Run the split to completion.
    ///
    /// Returns the recorded parts once the source is exhausted. Any
    /// probe or cut failure aborts the run and leaves already written
    /// parts on disk.
    pub fn run(&self) -> Result<SplitReport> {
        let source = &self.request.source;
        let info = self.toolchain.probe(source)?;
        if info.duration <= 0.0 {
            return Err(Error::unknown_duration(source));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Splitting {}: {:.2}s at {} bps ({})",
            source.display(),
            info.duration,
            info.bitrate,
            self.strategy.mode()
        );

        fs::create_dir_all(&self.request.out_dir)?;
        let extension = source.extension().and_then(|e| e.to_str());

        let mut parts = Vec::new();
        let mut offset = 0.0_f64;
        let mut index = 1_u32;

        loop {
            let name = part_file_name(&self.request.prefix, index, extension);
            let output = self.request.out_dir.join(name);

            self.toolchain.cut(&CutRequest {
                source,
                output: &output,
                start: offset,
                strategy: self.strategy,
            })?;

            let duration = self.toolchain.duration_of(&output);
            if duration <= TAIL_SLACK_SECS {
                // Nothing meaningful was left past the previous cut.
                fs::remove_file(&output).ok();
                break;
            }

            let size_bytes = fs::metadata(&output)?.len();
            let part = Part {
                index,
                path: output,
                duration,
                size_bytes,
            };
            if let Some(on_part) = &self.on_part {
                on_part(&part);
            }
            parts.push(part);

            offset += duration;
            index += 1;

            if offset + TAIL_SLACK_SECS >= info.duration {
                break;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Split of {} finished with {} parts",
            source.display(),
            parts.len()
        );

        Ok(SplitReport {
            parts,
            source_duration: info.duration,
        })
    }
}
