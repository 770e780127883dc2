//! Opening clips through ffprobe.

use std::path::Path;
use std::process::Command;

use ffprobe::{FfProbe, FfProbeError, ffprobe};
use serde_json::Value;

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::media::clip::{AudioTrack, VideoClip};

/// Something that can open a video file and report its properties.
pub trait MediaProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoClip>;
}

/// `MediaProber` backed by the ffprobe binary via the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoClip> {
        log::debug!("Running ffprobe (via crate) on: {}", path.display());
        let metadata = ffprobe(path).map_err(|err| {
            log::error!("ffprobe failed for {}: {:?}", path.display(), err);
            map_ffprobe_error(err, path)
        })?;
        let rotation = probe_rotation(path)?;
        clip_from_metadata(path, &metadata, rotation)
    }
}

/// Reads the display rotation of the first video stream, in degrees.
///
/// The `ffprobe` crate does not expose display-matrix side data, so this
/// runs a second, narrow ffprobe query.
fn probe_rotation(path: &Path) -> CoreResult<i32> {
    let output = Command::new("ffprobe")
        .args(["-v", "error", "-select_streams", "v:0", "-show_entries"])
        .arg("stream_side_data=rotation:stream_tags=rotate")
        .args(["-of", "json"])
        .arg(path)
        .output()
        .map_err(|e| command_start_error("ffprobe", e))?;

    if !output.status.success() {
        return Err(command_failed_error(
            format!("ffprobe rotation ({})", path.display()),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let rotation = parse_rotation(&String::from_utf8_lossy(&output.stdout))?;
    if rotation != 0 {
        log::debug!("Video stream of {} is rotated {rotation} degrees", path.display());
    }
    Ok(rotation)
}

/// Extracts the rotation from ffprobe's JSON output.
///
/// Display-matrix side data wins over the legacy `rotate` tag. Missing
/// values mean no rotation.
fn parse_rotation(json: &str) -> CoreResult<i32> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| CoreError::JsonParseError(format!("ffprobe rotation output: {e}")))?;
    let Some(stream) = value.get("streams").and_then(|s| s.get(0)) else {
        return Ok(0);
    };

    let from_side_data = stream
        .get("side_data_list")
        .and_then(Value::as_array)
        .and_then(|list| list.iter().find_map(|d| d.get("rotation").and_then(degrees)));
    let from_tag = stream
        .get("tags")
        .and_then(|t| t.get("rotate"))
        .and_then(degrees);

    Ok(from_side_data.or(from_tag).unwrap_or(0))
}

fn degrees(value: &Value) -> Option<i32> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    raw.is_finite().then(|| raw.round() as i32)
}

/// Converts coded dimensions to the size the frames have after rotation.
fn display_size(path: &Path, width: i64, height: i64, rotation: i32) -> CoreResult<(u32, u32)> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(CoreError::VideoInfoError(format!(
                "Invalid dimensions found in {}: width={width}, height={height}",
                path.display()
            )));
        }
    };
    if rotation.rem_euclid(180) == 90 {
        Ok((h, w))
    } else {
        Ok((w, h))
    }
}

fn clip_from_metadata(path: &Path, metadata: &FfProbe, rotation: i32) -> CoreResult<VideoClip> {
    if metadata.streams.is_empty() {
        return Err(CoreError::NoStreamsFound(path.display().to_string()));
    }

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::VideoInfoError(format!("No video stream found in {}", path.display()))
        })?;

    let width = video_stream.width.ok_or_else(|| {
        CoreError::VideoInfoError(format!("Video stream missing width in {}", path.display()))
    })?;
    let height = video_stream.height.ok_or_else(|| {
        CoreError::VideoInfoError(format!("Video stream missing height in {}", path.display()))
    })?;

    let (width, height) = display_size(path, width, height, rotation)?;

    let duration_secs = metadata
        .format
        .duration
        .as_deref()
        .and_then(parse_seconds)
        .or_else(|| video_stream.duration.as_deref().and_then(parse_seconds));

    let audio = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioTrack {
            codec: s.codec_name.clone(),
            channels: s.channels.and_then(|c| u32::try_from(c).ok()),
            sample_rate: s.sample_rate.as_deref().and_then(|r| r.parse().ok()),
        });

    if audio.is_none() {
        log::debug!("No audio stream found in {}", path.display());
    }

    Ok(VideoClip {
        path: path.to_path_buf(),
        width,
        height,
        rotation,
        duration_secs,
        frame_rate: parse_frame_rate(&video_stream.r_frame_rate),
        video_codec: video_stream.codec_name.clone(),
        audio,
    })
}

/// Parses a positive, finite seconds value as reported by ffprobe.
fn parse_seconds(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d > 0.0)
}

/// Parses an ffprobe frame rate such as `"30000/1001"` or `"25"`.
fn parse_frame_rate(raw: &str) -> Option<f64> {
    let rate = match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.trim().parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

fn map_ffprobe_error(err: FfProbeError, path: &Path) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            command_failed_error(
                format!("ffprobe ({})", path.display()),
                output.status,
                stderr,
            )
        }
        FfProbeError::Deserialize(err) => {
            CoreError::JsonParseError(format!("ffprobe output deserialization: {err}"))
        }
        other => CoreError::FfprobeParse(format!(
            "Unknown ffprobe error for {}: {other:?}",
            path.display()
        )),
    }
}
