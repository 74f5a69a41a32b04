//! Sequential tag-wrap pipeline.
//!
//! One run walks `Validate → Probe → Transcode → Concatenate`; the
//! per-run scratch directory is removed as a finalizer on success and
//! failure alike.

mod errors;
mod runner;
mod step;
pub mod steps;
mod types;
mod workdir;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use runner::{Pipeline, RunSummary};
pub use step::PipelineStep;
pub use types::{
    ConcatOutput, Context, JobState, ProbeOutput, ProgressCallback, ProgressEvent,
    TranscodeOutput, ValidationOutput,
};
pub use workdir::WorkDir;

use std::path::{Path, PathBuf};

use crate::config::Config;

/// The standard stage sequence.
pub fn standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(Box::new(steps::ValidateStep::new()))
        .with_step(Box::new(steps::ProbeStep::new()))
        .with_step(Box::new(steps::TranscodeStep::new()))
        .with_step(Box::new(steps::ConcatStep::new()))
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub output_path: PathBuf,
    pub steps_completed: usize,
}

/// Run one tag-wrap job end to end.
///
/// Creates the scratch directory, drives the standard pipeline over
/// it, and removes the scratch directory again regardless of the
/// outcome.
pub fn run_job(config: &Config, progress: Option<ProgressCallback>) -> PipelineResult<JobReport> {
    let work = WorkDir::create(&config.temp_root).map_err(|e| {
        PipelineError::setup_failed(format!("could not create work directory: {e}"))
    })?;
    tracing::debug!("Work directory: {}", work.path().display());

    let mut ctx = Context::new(config.clone(), work.path().to_path_buf());
    if let Some(callback) = progress {
        ctx = ctx.with_progress(callback);
    }
    let mut state = JobState::new(job_name_for(&config.output));

    let result = standard_pipeline().run(&ctx, &mut state);

    if let Err(e) = work.cleanup() {
        tracing::warn!(
            "Could not remove work directory {}: {}",
            work.path().display(),
            e
        );
    }
    if let Ok(json) = serde_json::to_string(&state) {
        tracing::debug!("Job state: {json}");
    }

    let summary = result?;
    let output_path = state
        .concat
        .as_ref()
        .map(|concat| concat.output_path.clone())
        .unwrap_or_else(|| config.output.clone());
    Ok(JobReport {
        output_path,
        steps_completed: summary.steps_completed,
    })
}

fn job_name_for(output: &Path) -> String {
    output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("job")
        .to_string()
}
