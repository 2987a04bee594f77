//! The subprocess seam between the split driver and ffmpeg.

use crate::probe::{self, MediaInfo};
use crate::{Error, Result};
use std::path::Path;
use std::process::Command;

use super::strategy::{CutRequest, CutStrategy};

/// External operations the split driver depends on.
///
/// The driver never touches ffmpeg directly; it only talks through
/// this trait, so the loop can be exercised without the tools
/// installed.
pub trait Toolchain {
    /// Probe duration and bitrate before any cutting starts.
    fn probe(&self, path: &Path) -> Result<MediaInfo>;

    /// Write one part according to the request.
    fn cut(&self, request: &CutRequest<'_>) -> Result<()>;

    /// Measure a finished part, returning `0.0` when unknown.
    fn duration_of(&self, path: &Path) -> f64;
}

/// Production toolchain backed by the ffmpeg and ffprobe CLI tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegToolchain;

impl Toolchain for FfmpegToolchain {
    fn probe(&self, path: &Path) -> Result<MediaInfo> {
        probe::probe_media(path)
    }

    fn cut(&self, request: &CutRequest<'_>) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Cutting {} from {:.3}s ({})",
            request.output.display(),
            request.start,
            request.strategy.mode()
        );

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            // Input seeking: decode starts at the offset, not at zero.
            .arg("-ss")
            .arg(request.start.to_string())
            .arg("-i")
            .arg(request.source);

        match request.strategy {
            CutStrategy::StreamCopy { limit_bytes } => {
                // The muxer stops writing once the file hits the limit.
                cmd.args(["-c", "copy", "-fs"]).arg(limit_bytes.to_string());
            }
            CutStrategy::ReEncode {
                video_bps,
                audio_bps,
                part_seconds,
            } => {
                // First video stream plus first audio stream if present.
                cmd.args(["-map", "0:v:0", "-map", "0:a:0?"]);
                cmd.args(["-c:v", "libx264", "-preset", "veryfast"]);
                cmd.arg("-b:v").arg(video_bps.to_string());
                cmd.args(["-c:a", "aac"]);
                cmd.arg("-b:a").arg(audio_bps.to_string());
                cmd.arg("-t").arg(part_seconds.to_string());
            }
        }

        cmd.arg(request.output);

        let result = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffmpeg")
            } else {
                Error::Io(e)
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::cut_failed(
                request.strategy.mode(),
                stderr.trim().to_string(),
            ));
        }

        Ok(())
    }

    fn duration_of(&self, path: &Path) -> f64 {
        probe::probe_duration(path)
    }
}
