//! Data models for the tag-wrap pipeline.
//!
//! Everything here is transient, living for exactly one run:
//! - Format tags and file references (extension-derived)
//! - Probed stream metadata
//! - The playback-ordered playlist fed to the concatenation step

mod format;
mod media;
mod playlist;

pub use format::{AudioFileRef, AudioFormat};
pub use media::{ProbeResult, StreamInfo};
pub use playlist::Playlist;
