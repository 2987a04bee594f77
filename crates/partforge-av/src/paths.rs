//! Path utilities: video detection by extension and part file naming.

use std::path::Path;

/// List of video file extensions considered for batch splitting.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "m4v", "mkv", "avi", "wmv", "webm", "ts", "m2ts", "flv", "mpg", "mpeg",
];

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use partforge_av::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.mp4")));
/// assert!(!is_video_file(Path::new("notes.txt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Build the file name for a part: `{prefix}_part{NN}.{ext}`.
///
/// Indices are 1-based and zero-padded to two digits, so parts sort
/// correctly in directory listings. The extension keeps whatever case
/// the source file had.
///
/// # Examples
///
/// ```
/// use partforge_av::paths::part_file_name;
///
/// assert_eq!(part_file_name("movie", 1, Some("mkv")), "movie_part01.mkv");
/// assert_eq!(part_file_name("movie", 12, Some("mp4")), "movie_part12.mp4");
/// assert_eq!(part_file_name("raw", 3, None), "raw_part03");
/// ```
pub fn part_file_name(prefix: &str, index: u32, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{prefix}_part{index:02}.{ext}"),
        None => format!("{prefix}_part{index:02}"),
    }
}
