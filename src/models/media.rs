//! Probed media metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Properties of a single stream reported by the external prober.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Stream kind as reported by the tool ("audio", "video", ...).
    pub codec_type: String,
    /// Codec identifier ("pcm_s16le", "mp3", ...).
    pub codec_name: String,
    pub sample_rate: Option<u32>,
    pub channels: Option<u32>,
}

impl StreamInfo {
    pub fn new(codec_type: impl Into<String>, codec_name: impl Into<String>) -> Self {
        Self {
            codec_type: codec_type.into(),
            codec_name: codec_name.into(),
            sample_rate: None,
            channels: None,
        }
    }

    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn with_channels(mut self, channels: u32) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn is_audio(&self) -> bool {
        self.codec_type == "audio"
    }
}

/// Metadata for one probed file.
///
/// Consumed for validation (an input must carry at least one audio
/// stream) and for deriving the expected output duration used by
/// progress reporting. Nothing here outlives the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub path: PathBuf,
    /// Container format name, when reported.
    pub format_name: Option<String>,
    /// Container duration in seconds, when reported.
    pub duration_secs: Option<f64>,
    pub streams: Vec<StreamInfo>,
}

impl ProbeResult {
    pub fn has_audio(&self) -> bool {
        self.streams.iter().any(StreamInfo::is_audio)
    }

    /// First audio stream, if any.
    pub fn first_audio(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.is_audio())
    }
}
