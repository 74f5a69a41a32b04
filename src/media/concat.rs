//! Concatenation and final encode via the concat demuxer.

use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::models::AudioFormat;

use super::{stderr_tail, ERROR_TAIL_LINES, FFMPEG, TARGET_CHANNELS, TARGET_SAMPLE_RATE};

/// Fixed VBR quality preset applied to mp3 output.
const MP3_QUALITY: &str = "2";

/// Errors from the concatenation stage.
#[derive(Debug, Error)]
pub enum ConcatError {
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

    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

/// One concatenation request: a rendered manifest, the output target,
/// and the expected total duration used for progress percentages.
#[derive(Debug)]
pub struct ConcatRequest<'a> {
    pub manifest: &'a Path,
    pub output: &'a Path,
    pub format: AudioFormat,
    /// `None` disables percentage reporting.
    pub expected_duration_secs: Option<f64>,
}

/// Stitch the manifest's segments into `output`, re-encoding per the
/// target format. Progress percentages (0..=100) derived from the
/// tool's own progress stream are passed to `on_progress` as encoding
/// advances.
pub fn run_concat(
    req: &ConcatRequest<'_>,
    mut on_progress: impl FnMut(u32),
) -> Result<(), ConcatError> {
    let args = build_args(req);
    tracing::debug!("Running {} {}", FFMPEG, args.join(" "));

    let mut child = Command::new(FFMPEG)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;

    // Drain stderr on the side so a chatty tool cannot fill the pipe
    // while this thread is blocked on the progress stream.
    let stderr_handle = drain_stderr(&mut child);

    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line.map_err(|e| ConcatError::Io {
                operation: "reading progress stream".to_string(),
                source: e,
            })?;
            match parse_progress_line(&line) {
                Some(ProgressLine::OutTime(us)) => {
                    if let Some(total) = req.expected_duration_secs {
                        on_progress(percent_of(us, total));
                    }
                }
                Some(ProgressLine::End) => {
                    if req.expected_duration_secs.is_some() {
                        on_progress(100);
                    }
                }
                None => {}
            }
        }
    }

    let status = child.wait().map_err(|e| ConcatError::Io {
        operation: "waiting for ffmpeg".to_string(),
        source: e,
    })?;
    let stderr = stderr_handle.join().unwrap_or_default();

    if !status.success() {
        return Err(ConcatError::CommandFailed {
            tool: FFMPEG.to_string(),
            exit_code: status.code().unwrap_or(-1),
            message: stderr_tail(&stderr, ERROR_TAIL_LINES),
        });
    }
    Ok(())
}

fn drain_stderr(child: &mut Child) -> thread::JoinHandle<Vec<u8>> {
    let stderr = child.stderr.take();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn spawn_error(source: io::Error) -> ConcatError {
    if source.kind() == io::ErrorKind::NotFound {
        ConcatError::ToolNotFound(FFMPEG.to_string())
    } else {
        ConcatError::Spawn {
            tool: FFMPEG.to_string(),
            source,
        }
    }
}

fn build_args(req: &ConcatRequest<'_>) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-y".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-nostats".to_string(),
        "-progress".to_string(),
        "pipe:1".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        req.manifest.to_string_lossy().into_owned(),
        "-ar".to_string(),
        TARGET_SAMPLE_RATE.to_string(),
        "-ac".to_string(),
        TARGET_CHANNELS.to_string(),
    ];
    args.extend(encoder_args(req.format));
    args.push(req.output.to_string_lossy().into_owned());
    args
}

fn encoder_args(format: AudioFormat) -> Vec<String> {
    match format {
        AudioFormat::Wav => vec!["-c:a".to_string(), "pcm_s16le".to_string()],
        AudioFormat::Mp3 => vec![
            "-c:a".to_string(),
            "libmp3lame".to_string(),
            "-q:a".to_string(),
            MP3_QUALITY.to_string(),
        ],
    }
}

/// One parsed line of the tool's `key=value` progress stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressLine {
    /// Encoded position in microseconds.
    OutTime(u64),
    /// Terminal `progress=end` marker.
    End,
}

fn parse_progress_line(line: &str) -> Option<ProgressLine> {
    let (key, value) = line.split_once('=')?;
    match key.trim() {
        // out_time_ms carries microseconds despite the name
        "out_time_us" | "out_time_ms" => value.trim().parse().ok().map(ProgressLine::OutTime),
        "progress" if value.trim() == "end" => Some(ProgressLine::End),
        _ => None,
    }
}

fn percent_of(position_us: u64, total_secs: f64) -> u32 {
    if total_secs <= 0.0 {
        return 0;
    }
    let percent = (position_us as f64 / 1_000_000.0) / total_secs * 100.0;
    percent.min(100.0) as u32
}
