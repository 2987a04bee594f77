//! Cut planning: how each part is asked from ffmpeg.

use std::fmt;
use std::path::Path;

/// Which kind of cut a split uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMode {
    /// Lossless stream copy, bounded by output size.
    StreamCopy,
    /// Re-encode at fixed bitrates, bounded by time.
    ReEncode,
}

impl fmt::Display for CutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutMode::StreamCopy => write!(f, "stream copy"),
            CutMode::ReEncode => write!(f, "re-encode"),
        }
    }
}

/// How every part of one split is produced.
///
/// Chosen once per source file; only the start offset changes from cut
/// to cut. Stream copy cannot know a part's duration in advance (the
/// byte limit decides where the muxer stops), so the driver measures
/// each part after it is written. Re-encoding at fixed bitrates makes
/// output size proportional to time, which gives a usable fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutStrategy {
    /// Copy streams verbatim until the output reaches the byte limit.
    StreamCopy {
        /// Maximum bytes per part, best effort.
        limit_bytes: u64,
    },
    /// Re-encode a fixed time window at fixed bitrates.
    ReEncode {
        /// Target video bitrate in bits per second.
        video_bps: u64,
        /// Target audio bitrate in bits per second.
        audio_bps: u64,
        /// Window length per part in whole seconds, at least 1.
        part_seconds: u64,
    },
}

impl CutStrategy {
    /// Plan a lossless size-bounded split.
    pub fn stream_copy(limit_bytes: u64) -> Self {
        CutStrategy::StreamCopy { limit_bytes }
    }

    /// Plan a re-encoding split, sizing the time window so each part
    /// lands near `limit_bytes` at the combined target bitrate.
    pub fn re_encode(limit_bytes: u64, video_bps: u64, audio_bps: u64) -> Self {
        // Guards keep the window at least one second and survive a
        // zero combined bitrate.
        let total_bps = (video_bps + audio_bps).max(1);
        let part_seconds = (limit_bytes.saturating_mul(8) / total_bps).max(1);
        CutStrategy::ReEncode {
            video_bps,
            audio_bps,
            part_seconds,
        }
    }

    /// Which mode this strategy cuts in.
    pub fn mode(&self) -> CutMode {
        match self {
            CutStrategy::StreamCopy { .. } => CutMode::StreamCopy,
            CutStrategy::ReEncode { .. } => CutMode::ReEncode,
        }
    }
}

/// One cut of one part, handed to a [`Toolchain`](super::Toolchain).
#[derive(Debug, Clone, Copy)]
pub struct CutRequest<'a> {
    /// File being split.
    pub source: &'a Path,
    /// Where this part must be written.
    pub output: &'a Path,
    /// Start offset into the source in seconds.
    pub start: f64,
    /// Strategy shared by every cut of the split.
    pub strategy: CutStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(CutMode::StreamCopy.to_string(), "stream copy");
        assert_eq!(CutMode::ReEncode.to_string(), "re-encode");
    }

    #[test]
    fn test_re_encode_window_arithmetic() {
        // 2 GiB at 2.5 Mbps video + 128 kbps audio.
        let strategy = CutStrategy::re_encode(2 * 1024u64.pow(3), 2_500_000, 128_000);
        match strategy {
            CutStrategy::ReEncode { part_seconds, .. } => {
                assert_eq!(part_seconds, 2 * 1024u64.pow(3) * 8 / 2_628_000);
            }
            _ => panic!("expected re-encode strategy"),
        }
    }

    #[test]
    fn test_re_encode_window_never_below_one_second() {
        let strategy = CutStrategy::re_encode(1024, 2_500_000, 128_000);
        assert!(matches!(
            strategy,
            CutStrategy::ReEncode { part_seconds: 1, .. }
        ));
        // Degenerate zero bitrates must not divide by zero.
        let strategy = CutStrategy::re_encode(1024, 0, 0);
        assert!(matches!(strategy, CutStrategy::ReEncode { .. }));
    }

    #[test]
    fn test_mode_accessor() {
        assert_eq!(CutStrategy::stream_copy(1).mode(), CutMode::StreamCopy);
        assert_eq!(CutStrategy::re_encode(1, 1, 1).mode(), CutMode::ReEncode);
    }
}
