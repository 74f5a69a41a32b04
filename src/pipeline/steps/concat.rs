//! Concatenation stage.

use std::fs;

use crate::media::{self, ConcatRequest};
use crate::models::Playlist;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{ConcatOutput, Context, JobState, ProgressEvent};

/// File name of the concat manifest inside the work dir.
pub const MANIFEST_NAME: &str = "playlist.txt";

/// Writes the tag/main/tag manifest, prepares the output directory,
/// and drives the final encode while forwarding progress percentages.
#[derive(Debug, Default)]
pub struct ConcatStep;

impl ConcatStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for ConcatStep {
    fn name(&self) -> &str {
        "Concatenate"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.validation.is_none() {
            return Err(StepError::invalid_input("file formats not validated"));
        }
        match &state.transcode {
            None => Err(StepError::invalid_input("intermediates not available")),
            Some(output) => {
                for path in [&output.main_path, &output.tag_path] {
                    if !path.exists() {
                        return Err(StepError::file_not_found(path));
                    }
                }
                Ok(())
            }
        }
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let (output_path, output_format) = match &state.validation {
            Some(validation) => (
                validation.output.path.clone(),
                validation.output.format,
            ),
            None => return Err(StepError::invalid_input("file formats not validated")),
        };
        let (main_path, tag_path) = match &state.transcode {
            Some(transcode) => (transcode.main_path.clone(), transcode.tag_path.clone()),
            None => return Err(StepError::invalid_input("intermediates not available")),
        };

        let playlist = Playlist::wrap(&tag_path, &main_path);
        let manifest_path = ctx.work_dir.join(MANIFEST_NAME);
        fs::write(&manifest_path, playlist.render())
            .map_err(|e| StepError::io("writing concat manifest", e))?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StepError::io("creating output directory", e))?;
            }
        }

        let expected = state
            .probe
            .as_ref()
            .and_then(|probe| probe.expected_duration_secs());
        let request = ConcatRequest {
            manifest: &manifest_path,
            output: &output_path,
            format: output_format,
            expected_duration_secs: expected,
        };
        media::run_concat(&request, |percent| {
            ctx.emit(ProgressEvent::Encoding { percent });
        })?;

        state.concat = Some(ConcatOutput {
            output_path,
            manifest_path,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.concat {
            None => Err(StepError::invalid_output(
                "concatenation result not recorded",
            )),
            Some(output) => match fs::metadata(&output.output_path) {
                Err(_) => Err(StepError::file_not_found(&output.output_path)),
                Ok(meta) if meta.len() == 0 => {
                    Err(StepError::invalid_output("output file is empty"))
                }
                Ok(_) => Ok(()),
            },
        }
    }
}
