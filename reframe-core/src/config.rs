//! Configuration for a crop run.
//!
//! `CropConfig` collects the fixed choices the cropper makes: the target
//! aspect ratio, the output name suffix, and the codecs handed to ffmpeg.
//! The defaults reproduce the behavior of the tool; callers only override
//! them in tests or when embedding the library.

use crate::processing::crop::AspectRatio;

/// Suffix inserted between the file stem and extension of the output.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_9x16_crop";

/// Video encoder passed to ffmpeg.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// x264 speed/quality preset.
pub const DEFAULT_VIDEO_PRESET: &str = "medium";

/// Audio encoder used for the intermediate audio file.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Sample rate of the intermediate audio file.
pub const DEFAULT_AUDIO_SAMPLE_RATE: u32 = 44_100;

/// Fixed name of the intermediate audio file, created in the output directory.
pub const DEFAULT_TEMP_AUDIO_FILENAME: &str = "temp-audio.m4a";

/// Settings for a single crop and re-encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropConfig {
    pub target_ratio: AspectRatio,
    pub output_suffix: String,
    pub video_codec: String,
    pub video_preset: String,
    pub audio_codec: String,
    pub audio_sample_rate: u32,
    pub temp_audio_filename: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            target_ratio: AspectRatio::VERTICAL_9_16,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            video_preset: DEFAULT_VIDEO_PRESET.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_sample_rate: DEFAULT_AUDIO_SAMPLE_RATE,
            temp_audio_filename: DEFAULT_TEMP_AUDIO_FILENAME.to_string(),
        }
    }
}
