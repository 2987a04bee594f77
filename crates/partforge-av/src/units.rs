//! Size and bitrate parsing plus segmentation estimates.
//!
//! Everything in this module is pure arithmetic on user input and probe
//! results. Estimates are forecasts only; the split driver never trusts
//! them and always measures real part durations after each cut.

use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

fn size_re() -> &'static Regex {
    static SIZE_RE: OnceLock<Regex> = OnceLock::new();
    SIZE_RE.get_or_init(|| {
        Regex::new(r"^([0-9]*\.?[0-9]+)\s*([kmgt]?b?)?$").expect("valid size regex")
    })
}

/// Parse a human size string into bytes.
///
/// Accepts an optional unit suffix (`k`, `m`, `g`, `t`, each with an
/// optional trailing `b`), case-insensitive, using binary multiples.
/// A bare number or a `b` suffix means bytes. Zero is rejected since a
/// size limit must be positive.
///
/// # Examples
///
/// ```
/// use partforge_av::units::parse_size;
///
/// assert_eq!(parse_size("2G").unwrap(), 2 * 1024 * 1024 * 1024);
/// assert_eq!(parse_size("1.5m").unwrap(), 1_572_864);
/// assert_eq!(parse_size("512").unwrap(), 512);
/// assert!(parse_size("bogus").is_err());
/// ```
pub fn parse_size(text: &str) -> Result<u64> {
    let normalized = text.trim().to_lowercase().replace(' ', "");
    let caps = size_re()
        .captures(&normalized)
        .ok_or_else(|| Error::invalid_size(text))?;
    let value: f64 = caps[1].parse().map_err(|_| Error::invalid_size(text))?;
    let multiplier: u64 = match caps.get(2).map(|m| m.as_str()).unwrap_or("") {
        "" | "b" => 1,
        "k" | "kb" => 1 << 10,
        "m" | "mb" => 1 << 20,
        "g" | "gb" => 1 << 30,
        "t" | "tb" => 1 << 40,
        _ => return Err(Error::invalid_size(text)),
    };
    let bytes = (value * multiplier as f64) as u64;
    if bytes == 0 {
        return Err(Error::invalid_size(text));
    }
    Ok(bytes)
}

/// Parse a bitrate string into bits per second.
///
/// A trailing `k` multiplies by 1000 and a trailing `m` by 1,000,000
/// (decimal multiples, matching how encoders advertise rates). Decimal
/// coefficients are allowed before a suffix; a bare value must be a
/// whole number of bits per second.
///
/// # Examples
///
/// ```
/// use partforge_av::units::parse_bitrate;
///
/// assert_eq!(parse_bitrate("128k").unwrap(), 128_000);
/// assert_eq!(parse_bitrate("2.5m").unwrap(), 2_500_000);
/// assert_eq!(parse_bitrate("64000").unwrap(), 64_000);
/// ```
pub fn parse_bitrate(text: &str) -> Result<u64> {
    let normalized = text.trim().to_lowercase();
    if let Some(rest) = normalized.strip_suffix('k') {
        let value: f64 = rest.parse().map_err(|_| Error::invalid_bitrate(text))?;
        return Ok((value * 1_000.0) as u64);
    }
    if let Some(rest) = normalized.strip_suffix('m') {
        let value: f64 = rest.parse().map_err(|_| Error::invalid_bitrate(text))?;
        return Ok((value * 1_000_000.0) as u64);
    }
    normalized
        .parse()
        .map_err(|_| Error::invalid_bitrate(text))
}

/// Estimate the total output size in bytes for a stream of the given
/// duration and bitrate.
///
/// Returns 0 when either input is unknown (non-positive); an unknown
/// estimate is not an error, it only disables forecasting.
pub fn estimate_size(duration_secs: f64, bitrate_bps: u64) -> u64 {
    if duration_secs <= 0.0 || bitrate_bps == 0 {
        return 0;
    }
    (duration_secs * bitrate_bps as f64 / 8.0) as u64
}

/// Forecast how many parts a split will produce, rounding up.
///
/// Always at least 1. Only meaningful when `estimated_size` is known
/// to be non-zero.
pub fn estimated_part_count(estimated_size: u64, limit_bytes: u64) -> u64 {
    estimated_size.div_ceil(limit_bytes.max(1)).max(1)
}

/// Format a byte count for display, e.g. `1.50 GB`.
///
/// # Examples
///
/// ```
/// use partforge_av::units::format_bytes;
///
/// assert_eq!(format_bytes(512), "512.00 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}
