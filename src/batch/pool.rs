//! Bounded worker pool for batch jobs.

use super::{BatchJob, BatchOutcome, JobStatus};
use crate::progress::created_line;
use crossbeam_channel::{bounded, unbounded, Sender};
use partforge_av::split::{CutStrategy, SplitRequest, Splitter, Toolchain};
use partforge_av::Part;
use std::cell::Cell;
use std::path::PathBuf;
use std::thread;

/// What workers report back while a batch runs.
#[derive(Debug)]
pub enum WorkerEvent {
    /// A job left the queue and started cutting.
    Started {
        /// Source file of the job.
        source: PathBuf,
    },
    /// One part of a running job was recorded.
    PartDone {
        /// The finished part.
        part: Part,
    },
    /// A job reached a terminal state.
    Finished(BatchOutcome),
}

/// Run planned jobs on a bounded worker pool, printing status lines
/// as results arrive.
///
/// Jobs already marked skipped report immediately without touching
/// any external tool. The calling thread is the only one that prints;
/// workers funnel everything through one event channel, so concurrent
/// jobs never interleave partial lines. Outcomes arrive in completion
/// order, which with a single worker equals submission order. One
/// job's failure never cancels the others, and every job yields
/// exactly one outcome.
pub fn run_batch(
    jobs: Vec<BatchJob>,
    workers: usize,
    strategy: CutStrategy,
    toolchain: &(dyn Toolchain + Sync),
) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(jobs.len());
    let mut pending = Vec::new();

    for job in jobs {
        if job.status == JobStatus::Skipped {
            println!("Skip (exists): {}", job.source.display());
            outcomes.push(BatchOutcome {
                job,
                parts: 0,
                error: None,
            });
        } else {
            pending.push(job);
        }
    }

    if pending.is_empty() {
        return outcomes;
    }

    let workers = workers.clamp(1, pending.len());
    tracing::debug!("Running {} jobs on {} workers", pending.len(), workers);

    let (job_tx, job_rx) = bounded::<BatchJob>(pending.len());
    let (event_tx, event_rx) = unbounded::<WorkerEvent>();

    for job in pending {
        // Queue capacity covers every job, so this never blocks.
        job_tx.send(job).ok();
    }
    drop(job_tx);

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let event_tx = event_tx.clone();
            scope.spawn(move || {
                for job in job_rx.iter() {
                    run_job(job, strategy, toolchain, &event_tx);
                }
            });
        }
        drop(job_rx);
        drop(event_tx);

        // Sole consumer: the loop ends once every worker has hung up.
        for event in event_rx.iter() {
            match event {
                WorkerEvent::Started { source } => {
                    println!("Processing: {}", source.display());
                }
                WorkerEvent::PartDone { part } => {
                    println!("{}", created_line(&part));
                }
                WorkerEvent::Finished(outcome) => {
                    if let Some(error) = &outcome.error {
                        println!("Failed: {} ({})", outcome.job.source.display(), error);
                    }
                    outcomes.push(outcome);
                }
            }
        }
    });

    outcomes
}

/// One unit of work: a whole file split end to end.
fn run_job(
    mut job: BatchJob,
    strategy: CutStrategy,
    toolchain: &(dyn Toolchain + Sync),
    events: &Sender<WorkerEvent>,
) {
    events
        .send(WorkerEvent::Started {
            source: job.source.clone(),
        })
        .ok();

    let request = SplitRequest {
        source: job.source.clone(),
        out_dir: job.out_dir.clone(),
        prefix: job.prefix.clone(),
    };
    // An aborted split loses its report, so count parts as they land;
    // the parts written before a failure stay on disk.
    let parts_done = Cell::new(0usize);
    let splitter = Splitter::new(toolchain, request, strategy).with_part_callback(|part| {
        parts_done.set(parts_done.get() + 1);
        events
            .send(WorkerEvent::PartDone { part: part.clone() })
            .ok();
    });

    let outcome = match splitter.run() {
        Ok(report) => {
            job.status = JobStatus::Done;
            BatchOutcome {
                job,
                parts: report.parts.len(),
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!("Split failed for {}: {}", job.source.display(), err);
            job.status = JobStatus::Failed;
            BatchOutcome {
                job,
                parts: parts_done.get(),
                error: Some(err.to_string()),
            }
        }
    };
    events.send(WorkerEvent::Finished(outcome)).ok();
}
