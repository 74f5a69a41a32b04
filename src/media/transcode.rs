//! Normalization to the PCM intermediate representation.

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use super::{stderr_tail, ERROR_TAIL_LINES, FFMPEG, TARGET_CHANNELS, TARGET_SAMPLE_RATE};

/// Errors from the transcoding stage.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("{0} not found on PATH")]
    ToolNotFound(String),

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },
}

/// Convert `input` to the canonical intermediate representation at
/// `output`: uncompressed PCM in a WAV container, 44100 Hz, stereo,
/// regardless of the source format. On failure, no partial output is
/// guaranteed cleaned; the caller still owns cleanup.
pub fn to_intermediate(input: &Path, output: &Path) -> Result<(), TranscodeError> {
    let args = build_args(input, output);
    tracing::debug!("Running {} {}", FFMPEG, args.join(" "));

    let out = Command::new(FFMPEG)
        .args(&args)
        .output()
        .map_err(spawn_error)?;

    if !out.status.success() {
        return Err(TranscodeError::CommandFailed {
            tool: FFMPEG.to_string(),
            exit_code: out.status.code().unwrap_or(-1),
            message: stderr_tail(&out.stderr, ERROR_TAIL_LINES),
        });
    }
    Ok(())
}

fn spawn_error(source: io::Error) -> TranscodeError {
    if source.kind() == io::ErrorKind::NotFound {
        TranscodeError::ToolNotFound(FFMPEG.to_string())
    } else {
        TranscodeError::Spawn {
            tool: FFMPEG.to_string(),
            source,
        }
    }
}

fn build_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-i".to_string(),
        input.to_string_lossy().into_owned(),
        "-vn".to_string(),
        "-ar".to_string(),
        TARGET_SAMPLE_RATE.to_string(),
        "-ac".to_string(),
        TARGET_CHANNELS.to_string(),
        "-f".to_string(),
        "wav".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}
