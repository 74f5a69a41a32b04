//! Extension validation stage.

use std::path::Path;

use crate::models::AudioFileRef;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, ValidationOutput};

/// Checks that both inputs exist and that every path carries a
/// supported extension. Runs before any external tool is touched.
#[derive(Debug, Default)]
pub struct ValidateStep;

impl ValidateStep {
    pub fn new() -> Self {
        Self
    }
}

fn file_ref(path: &Path) -> StepResult<AudioFileRef> {
    AudioFileRef::from_path(path).ok_or_else(|| {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        StepError::unsupported_format(path, extension)
    })
}

impl PipelineStep for ValidateStep {
    fn name(&self) -> &str {
        "Validate"
    }

    fn validate_input(&self, ctx: &Context, _state: &JobState) -> StepResult<()> {
        for path in [&ctx.config.main_audio, &ctx.config.tag_audio] {
            if !path.exists() {
                return Err(StepError::file_not_found(path));
            }
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let main = file_ref(&ctx.config.main_audio)?;
        let tag = file_ref(&ctx.config.tag_audio)?;
        let output = file_ref(&ctx.config.output)?;

        tracing::debug!(
            "Formats: main={}, tag={}, output={}",
            main.format,
            tag.format,
            output.format
        );
        state.validation = Some(ValidationOutput { main, tag, output });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.validation.is_none() {
            return Err(StepError::invalid_output("validation results not recorded"));
        }
        Ok(())
    }
}
