//! The opened clip handle and its lazily cropped view.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CropConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::FfmpegSpawner;
use crate::external::ffmpeg::write_cropped;
use crate::processing::crop::CropRect;

/// Properties of the first audio stream of a clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioTrack {
    pub codec: Option<String>,
    pub channels: Option<u32>,
    pub sample_rate: Option<u32>,
}

/// A probed video file.
///
/// Holds what ffprobe reported about the source; frames are never decoded in
/// process. Dropping the handle releases it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoClip {
    pub path: PathBuf,
    /// Displayed width, after any 90/270 degree rotation is applied.
    pub width: u32,
    /// Displayed height, after any 90/270 degree rotation is applied.
    pub height: u32,
    /// Rotation reported for the video stream, in degrees.
    pub rotation: i32,
    pub duration_secs: Option<f64>,
    pub frame_rate: Option<f64>,
    pub video_codec: Option<String>,
    pub audio: Option<AudioTrack>,
}

impl VideoClip {
    /// `(width, height)` of the video stream.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Names of the public attributes of this handle, sorted.
    ///
    /// Names starting with an underscore are treated as private and skipped.
    pub fn attribute_names(&self) -> CoreResult<Vec<String>> {
        let value = serde_json::to_value(self)
            .map_err(|e| CoreError::JsonParseError(format!("clip attributes: {e}")))?;
        let mut names: Vec<String> = value
            .as_object()
            .map(|fields| {
                fields
                    .keys()
                    .filter(|name| !name.starts_with('_'))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    /// Returns a view of this clip restricted to `rect`.
    ///
    /// No work happens until the view is written. Fails if the rectangle
    /// reaches outside the frame or is empty.
    pub fn cropped(&self, rect: CropRect) -> CoreResult<CroppedClip<'_>> {
        if rect.x1 >= rect.x2 || rect.y1 >= rect.y2 || rect.x2 > self.width || rect.y2 > self.height {
            return Err(CoreError::OperationFailed(format!(
                "Crop {rect} does not fit inside {}x{} frame of {}",
                self.width,
                self.height,
                self.path.display()
            )));
        }
        Ok(CroppedClip { source: self, rect })
    }
}

impl Drop for VideoClip {
    fn drop(&mut self) {
        log::debug!("Released clip handle for {}", self.path.display());
    }
}

/// A clip paired with the region to keep.
#[derive(Debug, Clone, Copy)]
pub struct CroppedClip<'a> {
    source: &'a VideoClip,
    rect: CropRect,
}

impl CroppedClip<'_> {
    #[must_use]
    pub fn source(&self) -> &VideoClip {
        self.source
    }

    #[must_use]
    pub fn rect(&self) -> CropRect {
        self.rect
    }

    /// Encodes the cropped clip to `output_path`, overwriting any existing file.
    pub fn write_videofile<S: FfmpegSpawner>(
        &self,
        spawner: &S,
        output_path: &Path,
        config: &CropConfig,
    ) -> CoreResult<()> {
        write_cropped(spawner, self, output_path, config)
    }
}
