//! Transcoding stage.

use crate::media;
use crate::pipeline::errors::{StepError, StepResult};
use crate::pipeline::step::PipelineStep;
use crate::pipeline::types::{Context, JobState, TranscodeOutput};

/// File name of the normalized main segment inside the work dir.
pub const MAIN_INTERMEDIATE: &str = "main.wav";
/// File name of the normalized tag segment inside the work dir.
pub const TAG_INTERMEDIATE: &str = "tag.wav";

/// Produces the two normalized PCM intermediates, one external
/// invocation after the other.
#[derive(Debug, Default)]
pub struct TranscodeStep;

impl TranscodeStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for TranscodeStep {
    fn name(&self) -> &str {
        "Transcode"
    }

    fn validate_input(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.probe.is_none() {
            return Err(StepError::invalid_input("inputs not probed"));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let main_path = ctx.work_dir.join(MAIN_INTERMEDIATE);
        let tag_path = ctx.work_dir.join(TAG_INTERMEDIATE);

        media::to_intermediate(&ctx.config.main_audio, &main_path)?;
        media::to_intermediate(&ctx.config.tag_audio, &tag_path)?;

        state.transcode = Some(TranscodeOutput {
            main_path,
            tag_path,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        match &state.transcode {
            None => Err(StepError::invalid_output("intermediates not recorded")),
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::path::PathBuf;

    fn test_context() -> Context {
        Context::new(Config::for_tests(), PathBuf::from("/tmp/work"))
    }

    #[test]
    fn requires_probe_results() {
        let err = TranscodeStep::new()
            .validate_input(&test_context(), &JobState::new("test"))
            .unwrap_err();
        assert!(matches!(err, StepError::InvalidInput(_)));
    }

    #[test]
    fn output_validation_checks_both_intermediates() {
        let dir = tempfile::tempdir().unwrap();
        let main_path = dir.path().join(MAIN_INTERMEDIATE);
        let tag_path = dir.path().join(TAG_INTERMEDIATE);
        fs::write(&main_path, b"riff").unwrap();

        let mut state = JobState::new("test");
        state.transcode = Some(TranscodeOutput {
            main_path,
            tag_path: tag_path.clone(),
        });

        let err = TranscodeStep::new()
            .validate_output(&test_context(), &state)
            .unwrap_err();
        assert!(matches!(
            err,
            StepError::FileNotFound { ref path } if *path == tag_path
        ));
    }

    #[test]
    fn output_validation_passes_when_files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let main_path = dir.path().join(MAIN_INTERMEDIATE);
        let tag_path = dir.path().join(TAG_INTERMEDIATE);
        fs::write(&main_path, b"riff").unwrap();
        fs::write(&tag_path, b"riff").unwrap();

        let mut state = JobState::new("test");
        state.transcode = Some(TranscodeOutput {
            main_path,
            tag_path,
        });

        TranscodeStep::new()
            .validate_output(&test_context(), &state)
            .unwrap();
    }
}
