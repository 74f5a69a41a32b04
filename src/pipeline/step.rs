//! Step abstraction for the sequential pipeline.

use super::errors::StepResult;
use super::types::{Context, JobState};

/// One stage of a run.
///
/// The runner drives each step through three phases: input validation,
/// execution, and output validation. A step records its results on the
/// shared [`JobState`] for later stages to consume.
pub trait PipelineStep: Send + Sync {
    /// Stage name used in progress events and error context.
    fn name(&self) -> &str;

    /// Check that everything this step consumes is present.
    fn validate_input(&self, ctx: &Context, state: &JobState) -> StepResult<()>;

    /// Do the work and record outputs on `state`.
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()>;

    /// Check that the recorded outputs are usable.
    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()>;
}
