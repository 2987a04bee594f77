//! Terminal progress: spinner styles, scoped spinner guards, and the
//! toolchain decorator that animates long external calls.
//!
//! Spinners draw to stderr through a shared [`MultiProgress`] and hide
//! themselves when stderr is not a terminal. Result lines are ordinary
//! stdout output and never pass through indicatif, so piping stdout
//! stays clean. Progress is cosmetic only; nothing here can change the
//! outcome of a split.

use clap::ValueEnum;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use partforge_av::split::CutRequest;
use partforge_av::units::format_bytes;
use partforge_av::{MediaInfo, Part, Result, Toolchain};
use std::path::Path;
use std::time::Duration;

/// Spinner styles selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AnimStyle {
    /// Braille dots spinner.
    Dots,
    /// Classic rotating line.
    Line,
    /// Moon phases.
    Moon,
    /// No animation at all.
    None,
}

impl AnimStyle {
    fn tick_chars(self) -> Option<&'static str> {
        // Last char of each set is the resting frame.
        match self {
            AnimStyle::Dots => Some("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
            AnimStyle::Line => Some("|/-\\ "),
            AnimStyle::Moon => Some("🌑🌒🌓🌔🌕🌖🌗🌘 "),
            AnimStyle::None => None,
        }
    }
}

/// Shared handle for starting spinners.
///
/// Cheap to clone; all clones draw through the same [`MultiProgress`]
/// so concurrent workers never corrupt each other's lines.
#[derive(Clone)]
pub struct Reporter {
    multi: MultiProgress,
    style: AnimStyle,
}

impl Reporter {
    /// Create a reporter drawing in the given style.
    pub fn new(style: AnimStyle) -> Self {
        Self {
            multi: MultiProgress::new(),
            style,
        }
    }

    /// Start a spinner labelled `message`, running until the returned
    /// guard drops.
    pub fn start(&self, message: impl Into<String>) -> SpinnerGuard {
        let Some(tick_chars) = self.style.tick_chars() else {
            return SpinnerGuard { bar: None };
        };
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("valid spinner template")
                .tick_chars(tick_chars),
        );
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        SpinnerGuard { bar: Some(bar) }
    }
}

/// Clears its spinner when dropped, on success and failure alike.
pub struct SpinnerGuard {
    bar: Option<ProgressBar>,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Toolchain decorator holding a spinner across each cut.
///
/// Probing is fast and stays silent; cuts are where ffmpeg can sit for
/// minutes. Results pass through untouched.
pub struct AnimatedToolchain<T> {
    inner: T,
    reporter: Reporter,
}

impl<T> AnimatedToolchain<T> {
    /// Wrap a toolchain so its cuts animate through `reporter`.
    pub fn new(inner: T, reporter: Reporter) -> Self {
        Self { inner, reporter }
    }
}

impl<T: Toolchain> Toolchain for AnimatedToolchain<T> {
    fn probe(&self, path: &Path) -> Result<MediaInfo> {
        self.inner.probe(path)
    }

    fn cut(&self, request: &CutRequest<'_>) -> Result<()> {
        let _spinner = self
            .reporter
            .start(format!("cutting {}", display_name(request.output)));
        self.inner.cut(request)
    }

    fn duration_of(&self, path: &Path) -> f64 {
        self.inner.duration_of(path)
    }
}

/// Result line for one recorded part.
pub fn created_line(part: &Part) -> String {
    format!(
        "Created: {} ({} ≈ {:.2}s)",
        display_name(&part.path),
        format_bytes(part.size_bytes),
        part.duration
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
