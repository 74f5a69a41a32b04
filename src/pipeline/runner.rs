//! Sequential pipeline runner.

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, JobState, ProgressEvent};

/// Ordered collection of steps executed one after another. Each step
/// must finish (its external invocation included) before the next
/// starts.
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order. The first failure ends the run and is
    /// returned wrapped with the failing stage name.
    pub fn run(&self, ctx: &Context, state: &mut JobState) -> PipelineResult<RunSummary> {
        let total = self.steps.len();

        for (index, step) in self.steps.iter().enumerate() {
            let stage = step.name();
            tracing::info!("Stage {}/{}: {}", index + 1, total, stage);
            ctx.emit(ProgressEvent::StageStarted {
                stage: stage.to_string(),
                index: index + 1,
                total,
            });

            step.validate_input(ctx, state)
                .map_err(|e| PipelineError::step_failed(stage, e))?;
            step.execute(ctx, state)
                .map_err(|e| PipelineError::step_failed(stage, e))?;
            step.validate_output(ctx, state)
                .map_err(|e| PipelineError::step_failed(stage, e))?;

            tracing::debug!("Stage {} completed", stage);
        }

        ctx.emit(ProgressEvent::Finished);
        Ok(RunSummary {
            steps_completed: total,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// What a finished run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub steps_completed: usize,
}
