//! tagwrap - wrap an audio file with a station tag
//!
//! Concatenates `tag + main + tag` into a single mp3 or wav file by
//! normalizing both inputs to a common PCM intermediate and driving
//! FFmpeg's concat demuxer over them. All media work happens through
//! the external `ffmpeg` and `ffprobe` binaries.

pub mod cli;
pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod pipeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
