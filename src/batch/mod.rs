//! Batch splitting across a directory tree.
//!
//! Discovery walks the source folder for known video extensions,
//! planning mirrors each file's relative location under the output
//! root, and [`run_batch`] runs one whole-file split per worker.
//! Files are independent: one failure never stops the rest.

mod pool;

pub use pool::{run_batch, WorkerEvent};

use partforge_av::paths::{is_video_file, part_file_name};
use partforge_av::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file scheduled for splitting.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// File to split.
    pub source: PathBuf,
    /// Source path relative to the scanned root.
    pub rel_path: PathBuf,
    /// Directory receiving this file's parts.
    pub out_dir: PathBuf,
    /// Part name prefix, taken from the source file stem.
    pub prefix: String,
    /// Position in the job lifecycle.
    pub status: JobStatus,
}

/// Lifecycle of a batch job. Transitions only move forward, from
/// `Pending` into exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Planned and waiting for a worker.
    Pending,
    /// First part already existed, nothing was scheduled.
    Skipped,
    /// Split ran to exhaustion.
    Done,
    /// Split aborted; the error text is in the outcome.
    Failed,
}

/// Final report for one job.
#[derive(Debug)]
pub struct BatchOutcome {
    /// The job, with its status advanced to a terminal state.
    pub job: BatchJob,
    /// Parts recorded before the job finished.
    pub parts: usize,
    /// Why the job failed, when it did.
    pub error: Option<String>,
}

/// Find video files under `root`, sorted for a stable processing
/// order.
///
/// Non-recursive scans only look at the folder's direct children.
/// Unreadable directory entries are silently skipped, like any walk
/// over a live filesystem has to.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::file_not_found(root));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_video_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Plan jobs for discovered files.
///
/// Each job's output directory mirrors the source path relative to
/// `root`, rooted at `outroot`. With `skip_existing`, a job whose
/// first part is already on disk is marked [`JobStatus::Skipped`]
/// before any work is scheduled. The check is an existence probe on
/// `{prefix}_part01{ext}` only; it does not verify that an earlier
/// run completed.
pub fn plan(files: &[PathBuf], root: &Path, outroot: &Path, skip_existing: bool) -> Vec<BatchJob> {
    files
        .iter()
        .map(|source| {
            let rel_path = source.strip_prefix(root).unwrap_or(source).to_path_buf();
            let out_dir = match rel_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => outroot.join(parent),
                _ => outroot.to_path_buf(),
            };
            let prefix = source
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();

            let status = if skip_existing && first_part_exists(source, &out_dir, &prefix) {
                JobStatus::Skipped
            } else {
                JobStatus::Pending
            };

            BatchJob {
                source: source.clone(),
                rel_path,
                out_dir,
                prefix,
                status,
            }
        })
        .collect()
}

fn first_part_exists(source: &Path, out_dir: &Path, prefix: &str) -> bool {
    let extension = source.extension().and_then(|e| e.to_str());
    out_dir.join(part_file_name(prefix, 1, extension)).exists()
}
