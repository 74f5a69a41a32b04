//! Shared pipeline context, accumulated job state, and progress events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{AudioFileRef, ProbeResult};

/// Progress notifications emitted while a job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A pipeline stage is about to execute.
    StageStarted {
        stage: String,
        index: usize,
        total: usize,
    },
    /// Encoding position within the concatenation stage, 0..=100.
    Encoding { percent: u32 },
    /// The run reached its terminal state.
    Finished,
}

pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Read-only inputs shared by every step.
pub struct Context {
    pub config: Config,
    /// Per-run scratch directory holding the intermediates and manifest.
    pub work_dir: PathBuf,
    progress: Option<ProgressCallback>,
}

impl Context {
    pub fn new(config: Config, work_dir: PathBuf) -> Self {
        Self {
            config,
            work_dir,
            progress: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Emit a progress event if a callback is attached.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.progress {
            callback(event);
        }
    }
}

/// Accumulated outputs of completed steps, dumped as JSON at debug
/// level when a run ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobState {
    pub job_name: String,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe: Option<ProbeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcode: Option<TranscodeOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concat: Option<ConcatOutput>,
}

impl JobState {
    pub fn new(job_name: impl Into<String>) -> Self {
        Self {
            job_name: job_name.into(),
            started_at: chrono::Local::now().to_rfc3339(),
            validation: None,
            probe: None,
            transcode: None,
            concat: None,
        }
    }
}

/// File references resolved by the validation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutput {
    pub main: AudioFileRef,
    pub tag: AudioFileRef,
    pub output: AudioFileRef,
}

/// Metadata gathered by the probing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutput {
    pub main: ProbeResult,
    pub tag: ProbeResult,
}

impl ProbeOutput {
    /// Expected output duration: the main segment plus the tag played
    /// on both sides. `None` when either duration is unknown.
    pub fn expected_duration_secs(&self) -> Option<f64> {
        match (self.main.duration_secs, self.tag.duration_secs) {
            (Some(main), Some(tag)) => Some(main + 2.0 * tag),
            _ => None,
        }
    }
}

/// Intermediates produced by the transcoding stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeOutput {
    pub main_path: PathBuf,
    pub tag_path: PathBuf,
}

/// Result of the concatenation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcatOutput {
    pub output_path: PathBuf,
    pub manifest_path: PathBuf,
}
