use super::{remap, segment};
use crate::engine::error::EngineError;
use crate::engine::outcome::{FileReport, FileStage, Outcome, SkipReason};
use crate::engine::plan::SegmentPlan;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::remap::RemapConfig;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct SegmentJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Plan for this file, or the reason none could be found for it.
    pub plan: Result<SegmentPlan, EngineError>,
}

#[derive(Debug, Clone)]
pub struct RemapJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    fn count(&self, label: &str) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.label() == label)
            .count()
    }

    pub fn rewritten(&self) -> usize {
        self.count("rewritten")
    }

    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.outcome.is_failure())
    }
}

/// Runs the segment workflow over every job. Jobs are independent; a failed
/// job is recorded and the rest still run.
#[instrument(skip_all, name = "segment_batch", fields(jobs = jobs.len()))]
pub fn run_segment_batch(jobs: Vec<SegmentJob>, reporter: &ProgressReporter) -> BatchSummary {
    drive(jobs, reporter, |job| {
        let outcome = match job.plan {
            Ok(plan) => segment::run(&job.input, &job.output, &plan),
            Err(_) if job.output.exists() => {
                Outcome::Skipped(SkipReason::OutputExists(job.output.clone()))
            }
            Err(error) => Outcome::Failed {
                stage: FileStage::Unprocessed,
                error,
            },
        };
        FileReport {
            input: job.input,
            output: job.output,
            outcome,
        }
    })
}

#[instrument(skip_all, name = "remap_batch", fields(jobs = jobs.len()))]
pub fn run_remap_batch(
    jobs: Vec<RemapJob>,
    config: &RemapConfig,
    reporter: &ProgressReporter,
) -> BatchSummary {
    drive(jobs, reporter, |job| {
        let outcome = remap::run(&job.input, &job.output, config);
        FileReport {
            input: job.input,
            output: job.output,
            outcome,
        }
    })
}

fn drive<J, F>(jobs: Vec<J>, reporter: &ProgressReporter, run_one: F) -> BatchSummary
where
    J: Send,
    F: Fn(J) -> FileReport + Send + Sync,
{
    reporter.report(Progress::PhaseStart { name: "Relabeling" });
    reporter.report(Progress::TaskStart {
        total_steps: jobs.len() as u64,
    });

    let reports: Vec<FileReport> = jobs
        .into_par_iter()
        .map(|job| {
            let report = run_one(job);
            if report.outcome.is_failure() {
                reporter.report(Progress::Message(report.to_string()));
            }
            reporter.report(Progress::TaskIncrement);
            report
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let summary = BatchSummary { reports };
    info!(
        "Batch finished: {} rewritten, {} skipped, {} failed",
        summary.rewritten(),
        summary.skipped(),
        summary.failed()
    );
    summary
}
