//! FFprobe-based media probing.
//!
//! Two entry points with deliberately different failure behavior:
//! [`probe_media`] is strict and used before any work starts, while
//! [`probe_duration`] swallows every failure to `0.0` so that a
//! post-cut duration check can never abort an otherwise healthy run.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;

/// What segmentation needs to know about a media file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediaInfo {
    /// Container duration in seconds. `0.0` means unknown.
    pub duration: f64,
    /// Total bitrate in bits per second. `0` means unknown.
    pub bitrate: u64,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    bit_rate: Option<String>,
}

/// Probe a media file using ffprobe.
///
/// The total bitrate is the sum of the per-stream rates; muxers that
/// omit stream rates (mkv commonly does) fall back to the container
/// rate. Either field may still come back 0 when the file carries no
/// rate information at all.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] when ffprobe is not installed and
/// [`Error::ProbeFailed`] when it exits unsuccessfully or prints JSON
/// we cannot read.
pub fn probe_media(path: &Path) -> Result<MediaInfo> {
    #[cfg(feature = "tracing")]
    tracing::debug!("Probing {}", path.display());

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::tool_not_found("ffprobe")
            } else {
                Error::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::probe_failed(stderr.trim().to_string()));
    }

    let ff_output: FfprobeOutput = serde_json::from_slice(&output.stdout)
        .map_err(|e| Error::probe_failed(format!("unreadable ffprobe output: {e}")))?;

    Ok(media_info_from(ff_output))
}

/// Probe only the duration of a file, treating any failure as unknown.
///
/// Used to measure parts right after they are written; a transient
/// probe hiccup here must not abort the split, it just ends it early
/// through the degenerate-part rule.
pub fn probe_duration(path: &Path) -> f64 {
    probe_media(path).map(|info| info.duration).unwrap_or(0.0)
}

fn media_info_from(output: FfprobeOutput) -> MediaInfo {
    let duration = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let stream_sum: u64 = output
        .streams
        .iter()
        .filter_map(|s| s.bit_rate.as_deref())
        .filter_map(|s| s.parse::<u64>().ok())
        .sum();

    let bitrate = if stream_sum > 0 {
        stream_sum
    } else {
        output
            .format
            .bit_rate
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0)
    };

    MediaInfo { duration, bitrate }
}
