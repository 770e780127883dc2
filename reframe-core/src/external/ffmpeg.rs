//! FFmpeg argument building and execution for the crop encode.
//!
//! Writing a cropped clip takes two ffmpeg runs:
//!
//! 1. the audio pass encodes the first audio stream into a temporary file
//!    (skipped when the source has no audio);
//! 2. the video pass crops and encodes the picture and muxes the temporary
//!    audio in with a stream copy.
//!
//! The temporary audio file is removed after the video pass on every path.

use std::path::Path;

use crate::config::CropConfig;
use crate::error::{CoreResult, command_failed_error};
use crate::external::{FfmpegInvocation, FfmpegProcess, FfmpegSpawner};
use crate::media::clip::CroppedClip;
use crate::processing::crop::CropRect;
use crate::progress::FfmpegProgressHandler;
use crate::temp_files::TempAudioFile;

/// Builds the audio pass: first audio stream to `temp_audio`.
#[must_use]
pub fn build_audio_invocation(
    source: &Path,
    temp_audio: &Path,
    config: &CropConfig,
) -> FfmpegInvocation {
    let mut inv = FfmpegInvocation::new("audio pass");
    inv.arg("-y")
        .input(source)
        .arg("-vn")
        .args(["-map", "0:a:0"])
        .args(["-c:a", config.audio_codec.as_str()])
        .args(["-ar".to_string(), config.audio_sample_rate.to_string()])
        .output(temp_audio);
    inv
}

/// Builds the video pass: crop, encode, and mux `temp_audio` if present.
#[must_use]
pub fn build_video_invocation(
    source: &Path,
    rect: CropRect,
    temp_audio: Option<&Path>,
    output: &Path,
    config: &CropConfig,
) -> FfmpegInvocation {
    let mut inv = FfmpegInvocation::new("video pass");
    inv.arg("-y").input(source);
    if let Some(audio) = temp_audio {
        inv.input(audio);
    }

    inv.args(["-map", "0:v:0"]);
    if temp_audio.is_some() {
        inv.args(["-map", "1:a:0"]);
    }

    // 4:2:0 needs even dimensions; odd crops are encoded as 4:4:4.
    let (filter, pix_fmt) = if rect.has_even_size() {
        (rect.ffmpeg_filter(), "yuv420p")
    } else {
        (format!("format=yuv444p,{}", rect.ffmpeg_filter()), "yuv444p")
    };
    inv.arg("-vf").arg(filter);

    inv.args(["-c:v", config.video_codec.as_str()])
        .args(["-preset", config.video_preset.as_str()])
        .args(["-pix_fmt", pix_fmt]);

    if temp_audio.is_some() {
        inv.args(["-c:a", "copy"]);
    } else {
        inv.arg("-an");
    }

    inv.output(output);
    inv
}

/// Runs one invocation to completion.
///
/// The process is owned for the whole call, so an error while reading its
/// events stops the child before returning.
pub fn run_invocation<S: FfmpegSpawner>(
    spawner: &S,
    invocation: &FfmpegInvocation,
    duration_secs: Option<f64>,
    show_progress: bool,
) -> CoreResult<()> {
    log::debug!("FFmpeg command ({}): {}", invocation.label(), invocation.command_line());

    let mut process = spawner.spawn(invocation)?;
    let mut handler = FfmpegProgressHandler::new(invocation.label(), duration_secs, show_progress);
    process.handle_events(|event| handler.handle_event(event))?;
    let status = process.wait()?;
    handler.finish();

    if status.success() {
        log::debug!("{} finished successfully", invocation.label());
        Ok(())
    } else {
        let stderr = handler.stderr_buffer().trim().to_string();
        log::error!("{} failed with {status}", invocation.label());
        Err(command_failed_error(
            format!("ffmpeg ({})", invocation.label()),
            status,
            stderr,
        ))
    }
}

/// Encodes `clip` to `output`.
pub fn write_cropped<S: FfmpegSpawner>(
    spawner: &S,
    clip: &CroppedClip<'_>,
    output: &Path,
    config: &CropConfig,
) -> CoreResult<()> {
    let source = clip.source();

    let temp_audio = if source.has_audio() {
        let guard = TempAudioFile::beside(output, &config.temp_audio_filename)?;
        let inv = build_audio_invocation(&source.path, guard.path(), config);
        run_invocation(spawner, &inv, source.duration_secs, false)?;
        Some(guard)
    } else {
        log::info!("No audio stream in {}; writing video only", source.path.display());
        None
    };

    let inv = build_video_invocation(
        &source.path,
        clip.rect(),
        temp_audio.as_ref().map(TempAudioFile::path),
        output,
        config,
    );
    let result = run_invocation(spawner, &inv, source.duration_secs, true);
    if let Some(guard) = temp_audio {
        guard.close();
    }
    result
}
