//! Partforge - split large media files into size-bounded parts
//!
//! This library crate exposes batch orchestration and progress
//! reporting for integration testing; the segmentation engine itself
//! lives in `partforge-av`.

pub mod batch;
pub mod progress;
