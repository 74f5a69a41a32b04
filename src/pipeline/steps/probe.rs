//! Metadata probing stage.

use crate::media;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, ProbeOutput};

/// Confirms both inputs carry an audio stream and captures their
/// durations for later progress reporting.
#[derive(Debug, Default)]
pub struct ProbeStep;

impl ProbeStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for ProbeStep {
    fn name(&self) -> &str {
        "Probe"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.validation.is_none() {
            return Err(StepError::invalid_input("file formats not validated"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let main = media::probe_audio(&ctx.config.main_audio)?;
        let tag = media::probe_audio(&ctx.config.tag_audio)?;

        if let (Some(main_secs), Some(tag_secs)) = (main.duration_secs, tag.duration_secs) {
            tracing::debug!("Durations: main {:.2}s, tag {:.2}s", main_secs, tag_secs);
        }
        state.probe = Some(ProbeOutput { main, tag });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.probe {
            Some(probe) if probe.main.has_audio() && probe.tag.has_audio() => Ok(()),
            Some(_) => Err(StepError::invalid_output(
                "probe results are missing an audio stream",
            )),
            None => Err(StepError::invalid_output("probe results not recorded")),
        }
    }
}
