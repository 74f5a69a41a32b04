//! Metadata probing via ffprobe.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{ProbeResult, StreamInfo};

use super::{stderr_tail, ERROR_TAIL_LINES, FFPROBE};

/// Errors from the metadata probing stage.
#[derive(Debug, Error)]
pub enum ProbeError {
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

    #[error("unreadable probe output for {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("no audio stream found in {}", .0.display())]
    NoAudioStream(PathBuf),
}

/// Run ffprobe on `path` and parse its JSON document.
pub fn probe_file(path: &Path) -> Result<ProbeResult, ProbeError> {
    tracing::debug!("Probing {}", path.display());

    let output = Command::new(FFPROBE)
        .args(["-v", "error", "-show_streams", "-show_format", "-of", "json"])
        .arg(path)
        .output()
        .map_err(spawn_error)?;

    if !output.status.success() {
        return Err(ProbeError::CommandFailed {
            tool: FFPROBE.to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            message: stderr_tail(&output.stderr, ERROR_TAIL_LINES),
        });
    }

    parse_probe_output(path, &output.stdout)
}

/// Probe `path` and require at least one audio stream.
pub fn probe_audio(path: &Path) -> Result<ProbeResult, ProbeError> {
    let probe = probe_file(path)?;
    if !probe.has_audio() {
        return Err(ProbeError::NoAudioStream(path.to_path_buf()));
    }
    Ok(probe)
}

fn spawn_error(source: io::Error) -> ProbeError {
    if source.kind() == io::ErrorKind::NotFound {
        ProbeError::ToolNotFound(FFPROBE.to_string())
    } else {
        ProbeError::Spawn {
            tool: FFPROBE.to_string(),
            source,
        }
    }
}

fn parse_probe_output(path: &Path, json: &[u8]) -> Result<ProbeResult, ProbeError> {
    let doc: FfprobeDocument = serde_json::from_slice(json).map_err(|e| ProbeError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let streams = doc
        .streams
        .into_iter()
        .map(|raw| {
            let mut info = StreamInfo::new(
                raw.codec_type.unwrap_or_default(),
                raw.codec_name.unwrap_or_default(),
            );
            // ffprobe reports sample_rate as a string
            if let Some(rate) = raw.sample_rate.as_deref().and_then(|r| r.parse().ok()) {
                info = info.with_sample_rate(rate);
            }
            if let Some(channels) = raw.channels {
                info = info.with_channels(channels);
            }
            info
        })
        .collect();

    let format = doc.format.unwrap_or_default();
    Ok(ProbeResult {
        path: path.to_path_buf(),
        format_name: format.format_name,
        duration_secs: format
            .duration
            .as_deref()
            .and_then(|d| d.trim().parse().ok()),
        streams,
    })
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDocument {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}
