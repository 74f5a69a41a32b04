//! Error taxonomy for pipeline runs.
//!
//! Two levels: [`StepError`] for failures inside a single step, and
//! [`PipelineError`] wrapping them with the failing stage name. The
//! media-layer errors convert into `StepError` via `From`, so step code
//! can use `?` on probe/transcode/concat calls directly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::media::{ConcatError, ProbeError, TranscodeError};

/// Errors produced by individual pipeline steps.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported file extension {extension:?} for {}: expected mp3 or wav", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    #[error(transparent)]
    Concat(#[from] ConcatError),

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid step input: {0}")]
    InvalidInput(String),

    #[error("invalid step output: {0}")]
    InvalidOutput(String),
}

impl StepError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn unsupported_format(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.into(),
            extension: extension.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}

/// Errors surfaced by a whole pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("setup failed: {message}")]
    SetupFailed { message: String },

    #[error("step '{stage}' failed: {source}")]
    StepFailed {
        stage: String,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    pub fn setup_failed(message: impl Into<String>) -> Self {
        Self::SetupFailed {
            message: message.into(),
        }
    }

    pub fn step_failed(stage: impl Into<String>, source: StepError) -> Self {
        Self::StepFailed {
            stage: stage.into(),
            source,
        }
    }
}

pub type StepResult<T> = Result<T, StepError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
