use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

/// Generate a small single-channel WAV file for testing.
///
/// Fixtures are produced on the fly as a PCM RIFF header followed by
/// sine-wave samples, so the repository carries no binary assets.
fn write_test_tone<P: AsRef<Path>>(
    path: P,
    duration_ms: u64,
    frequency: f32,
) -> Result<(), Box<dyn Error>> {
    let sample_rate = 8_000u32;
    let total_samples = (u64::from(sample_rate) * duration_ms).div_ceil(1_000);
    let mut samples = Vec::with_capacity(total_samples as usize * 2);

    for n in 0..total_samples {
        let theta = (n as f32 / sample_rate as f32) * 2.0 * std::f32::consts::PI * frequency;
        let sample = (theta.sin() * f32::from(i16::MAX)) as i16;
        samples.extend_from_slice(&sample.to_le_bytes());
    }

    let mut file = File::create(path)?;
    let data_len = samples.len() as u32;
    let chunk_size = 36u32 + data_len;
    file.write_all(b"RIFF")?;
    file.write_all(&chunk_size.to_le_bytes())?;
    file.write_all(b"WAVE")?;
    file.write_all(b"fmt ")?;
    file.write_all(&16u32.to_le_bytes())?; // PCM header size
    file.write_all(&1u16.to_le_bytes())?; // audio format = PCM
    file.write_all(&1u16.to_le_bytes())?; // channels
    file.write_all(&sample_rate.to_le_bytes())?;
    let byte_rate = sample_rate * 2;
    file.write_all(&byte_rate.to_le_bytes())?;
    file.write_all(&2u16.to_le_bytes())?; // block align
    file.write_all(&16u16.to_le_bytes())?; // bits per sample
    file.write_all(b"data")?;
    file.write_all(&data_len.to_le_bytes())?;
    file.write_all(&samples)?;
    Ok(())
}

/// A `tagwrap` invocation with the configuration environment scrubbed,
/// so ambient variables cannot leak into assertions.
fn tagwrap_cmd() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("tagwrap")?;
    cmd.env_remove("TAGWRAP_MAIN_AUDIO")
        .env_remove("TAGWRAP_TAG_AUDIO")
        .env_remove("TAGWRAP_OUTPUT")
        .env_remove("TAGWRAP_TEMP_DIR")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

fn tool_responds(tool: &str) -> bool {
    std::process::Command::new(tool)
        .arg("-version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn ffmpeg_available() -> bool {
    tool_responds("ffmpeg") && tool_responds("ffprobe")
}

fn mp3_encoder_available() -> bool {
    std::process::Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains("libmp3lame"))
        .unwrap_or(false)
}

fn probe_duration_secs(path: &Path) -> Result<f64, Box<dyn Error>> {
    let output = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .output()?;
    Ok(String::from_utf8(output.stdout)?.trim().parse()?)
}

fn probe_stream_summary(path: &Path) -> Result<String, Box<dyn Error>> {
    let output = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "a:0",
            "-show_entries",
            "stream=codec_name,sample_rate,channels",
            "-of",
            "default=noprint_wrappers=1",
        ])
        .arg(path)
        .output()?;
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn cli_reports_missing_configuration() -> Result<(), Box<dyn Error>> {
    tagwrap_cmd()?
        .assert()
        .failure()
        .code(1)
        .stderr(contains("TAGWRAP_MAIN_AUDIO"));
    Ok(())
}

#[test]
fn cli_rejects_unsupported_extensions() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let main_path = dir.path().join("show.flac");
    let tag_path = dir.path().join("ident.wav");
    write_test_tone(&main_path, 200, 440.0)?;
    write_test_tone(&tag_path, 200, 440.0)?;

    tagwrap_cmd()?
        .arg("--main")
        .arg(&main_path)
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(dir.path().join("final.wav"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unsupported file extension"))
        .stderr(contains("expected mp3 or wav"));

    dir.close()?;
    Ok(())
}

#[test]
fn cli_reports_missing_input_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let tag_path = dir.path().join("ident.wav");
    write_test_tone(&tag_path, 200, 440.0)?;

    tagwrap_cmd()?
        .arg("--main")
        .arg(dir.path().join("nowhere.wav"))
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(dir.path().join("final.wav"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("file not found"));

    dir.close()?;
    Ok(())
}

#[test]
fn cli_cleans_scratch_space_after_a_failed_run() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let scratch = dir.path().join("scratch");
    let tag_path = dir.path().join("ident.wav");
    write_test_tone(&tag_path, 200, 440.0)?;

    tagwrap_cmd()?
        .arg("--main")
        .arg(dir.path().join("nowhere.wav"))
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(dir.path().join("final.wav"))
        .arg("--temp-dir")
        .arg(&scratch)
        .assert()
        .failure()
        .code(1);

    let mut leftovers = fs::read_dir(&scratch)?;
    assert!(
        leftovers.next().is_none(),
        "scratch directory should be empty after a failure"
    );

    dir.close()?;
    Ok(())
}

#[test]
fn cli_wraps_wav_end_to_end() -> Result<(), Box<dyn Error>> {
    if !ffmpeg_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return Ok(());
    }

    let dir = tempdir()?;
    let main_path = dir.path().join("show.wav");
    let tag_path = dir.path().join("ident.wav");
    let output_path = dir.path().join("final.wav");
    let scratch = dir.path().join("scratch");
    write_test_tone(&main_path, 1_000, 440.0)?;
    write_test_tone(&tag_path, 300, 880.0)?;

    tagwrap_cmd()?
        .arg("--quiet")
        .arg("--main")
        .arg(&main_path)
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(&output_path)
        .arg("--temp-dir")
        .arg(&scratch)
        .assert()
        .success()
        .stdout(contains("Wrote"));

    // tag + main + tag is 0.3 + 1.0 + 0.3 seconds.
    let duration = probe_duration_secs(&output_path)?;
    assert!(
        (duration - 1.6).abs() < 0.25,
        "unexpected duration {duration}"
    );

    let summary = probe_stream_summary(&output_path)?;
    assert!(summary.contains("sample_rate=44100"), "got {summary}");
    assert!(summary.contains("channels=2"), "got {summary}");

    let mut leftovers = fs::read_dir(&scratch)?;
    assert!(
        leftovers.next().is_none(),
        "scratch directory should be empty after success"
    );

    dir.close()?;
    Ok(())
}

#[test]
fn cli_creates_missing_output_directories() -> Result<(), Box<dyn Error>> {
    if !ffmpeg_available() {
        eprintln!("skipping: ffmpeg/ffprobe not on PATH");
        return Ok(());
    }

    let dir = tempdir()?;
    let main_path = dir.path().join("show.wav");
    let tag_path = dir.path().join("ident.wav");
    let output_path = dir.path().join("nested").join("out").join("final.wav");
    write_test_tone(&main_path, 500, 440.0)?;
    write_test_tone(&tag_path, 200, 880.0)?;

    tagwrap_cmd()?
        .arg("--quiet")
        .arg("--main")
        .arg(&main_path)
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.is_file());

    dir.close()?;
    Ok(())
}

#[test]
fn cli_writes_mp3_output() -> Result<(), Box<dyn Error>> {
    if !ffmpeg_available() || !mp3_encoder_available() {
        eprintln!("skipping: ffmpeg with libmp3lame not available");
        return Ok(());
    }

    let dir = tempdir()?;
    let main_path = dir.path().join("show.wav");
    let tag_path = dir.path().join("ident.wav");
    let output_path = dir.path().join("final.mp3");
    write_test_tone(&main_path, 500, 440.0)?;
    write_test_tone(&tag_path, 200, 880.0)?;

    tagwrap_cmd()?
        .arg("--quiet")
        .arg("--main")
        .arg(&main_path)
        .arg("--tag")
        .arg(&tag_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let summary = probe_stream_summary(&output_path)?;
    assert!(summary.contains("codec_name=mp3"), "got {summary}");

    dir.close()?;
    Ok(())
}
