//! Core library for center-cropping videos to a vertical 9:16 frame.
//!
//! The heavy lifting is delegated to the `ffprobe` and `ffmpeg` binaries.
//! This crate probes the source, computes the crop rectangle, derives the
//! output name, and drives ffmpeg through the audio and video passes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use reframe_core::{CropConfig, SilentReporter, crop_to_vertical, sanitize_input_path};
//!
//! let input = sanitize_input_path("  '/videos/holiday.mov'  ");
//! let outcome = crop_to_vertical(&input, &CropConfig::default(), &SilentReporter).unwrap();
//! println!("Cropped video saved to: {}", outcome.output_path.display());
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod media;
pub mod processing;
pub mod progress;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::CropConfig;
pub use error::{CoreError, CoreResult, Stage, StageContext};
pub use external::ensure_dependencies;
pub use media::{AudioTrack, CroppedClip, FfprobeProber, MediaProber, VideoClip};
pub use processing::crop::{AspectRatio, CropRect, compute_crop};
pub use processing::output::{derive_output_path, sanitize_input_path};
pub use processing::{
    CropOutcome, CropReporter, SilentReporter, crop_to_vertical, crop_with, open_clip,
};
pub use utils::{format_bytes, format_duration, parse_ffmpeg_time};
