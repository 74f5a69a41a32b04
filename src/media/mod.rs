//! External tool invocation (FFmpeg).
//!
//! All decoding, resampling, encoding, and muxing is delegated to the
//! `ffmpeg` and `ffprobe` binaries. These modules own the command
//! syntax and output parsing for each call:
//!
//! - **Probe**: stream/metadata inspection via ffprobe JSON output
//! - **Transcode**: normalization to the PCM intermediate
//! - **Concat**: concat-demuxer stitch plus final encode, with
//!   progress reporting

mod concat;
mod probe;
mod transcode;

pub use concat::{run_concat, ConcatError, ConcatRequest};
pub use probe::{probe_audio, probe_file, ProbeError};
pub use transcode::{to_intermediate, TranscodeError};

/// External binaries this crate drives.
pub const FFMPEG: &str = "ffmpeg";
pub const FFPROBE: &str = "ffprobe";

/// Sample rate every intermediate and output carries.
pub const TARGET_SAMPLE_RATE: u32 = 44_100;
/// Channel count every intermediate and output carries.
pub const TARGET_CHANNELS: u32 = 2;

/// Lines of tool stderr kept in error messages.
pub(crate) const ERROR_TAIL_LINES: usize = 20;

/// Last `lines` non-empty lines of a tool's stderr.
pub(crate) fn stderr_tail(stderr: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let kept: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let start = kept.len().saturating_sub(lines);
    kept[start..].join("\n")
}
