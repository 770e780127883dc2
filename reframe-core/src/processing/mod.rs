//! Crop run orchestration.
//!
//! A run is three stages, each tagged on failure:
//!
//! - **open**: probe the source clip;
//! - **crop**: compute the centered rectangle and build the cropped view;
//! - **encode**: derive the output path and write the result with ffmpeg.
//!
//! The clip handle and every ffmpeg child are owned by this call and
//! released before it returns, whether it succeeds or not.

pub mod crop;
pub mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::CropConfig;
use crate::error::{CoreResult, Stage, StageContext};
use crate::external::{FfmpegSpawner, SidecarSpawner, ensure_dependencies};
use crate::media::VideoClip;
use crate::media::probe::{FfprobeProber, MediaProber};
use crop::{CropRect, compute_crop};
use output::derive_output_path;

/// Summary of a finished crop run.
#[derive(Debug, Clone)]
pub struct CropOutcome {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub source_size: (u32, u32),
    pub rect: CropRect,
    pub elapsed: Duration,
    /// Size of the written file, if it could be read back.
    pub output_size: Option<u64>,
}

/// Receives milestones of a crop run. All methods default to doing nothing.
pub trait CropReporter {
    fn clip_opened(&self, _clip: &VideoClip) {}
    fn crop_planned(&self, _rect: &CropRect) {}
    fn export_started(&self, _output: &Path) {}
    fn export_finished(&self, _outcome: &CropOutcome) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl CropReporter for SilentReporter {}

/// Opens `path` with ffprobe after checking that ffmpeg and ffprobe exist.
pub fn open_clip(path: &Path) -> CoreResult<VideoClip> {
    ensure_dependencies().at_stage(Stage::Open)?;
    FfprobeProber::new().probe(path).at_stage(Stage::Open)
}

/// Crops `input` to the configured ratio using the ffmpeg and ffprobe binaries.
pub fn crop_to_vertical(
    input: &Path,
    config: &CropConfig,
    reporter: &dyn CropReporter,
) -> CoreResult<CropOutcome> {
    ensure_dependencies().at_stage(Stage::Open)?;
    crop_with(&FfprobeProber::new(), &SidecarSpawner, input, config, reporter)
}

/// Crops `input` using the given prober and spawner.
pub fn crop_with<P, S>(
    prober: &P,
    spawner: &S,
    input: &Path,
    config: &CropConfig,
    reporter: &dyn CropReporter,
) -> CoreResult<CropOutcome>
where
    P: MediaProber,
    S: FfmpegSpawner,
{
    let start = Instant::now();

    let clip = prober.probe(input).at_stage(Stage::Open)?;
    log::debug!("Opened {}: {:?}", input.display(), clip);
    reporter.clip_opened(&clip);

    let rect = compute_crop(clip.width, clip.height, config.target_ratio).at_stage(Stage::Crop)?;
    reporter.crop_planned(&rect);
    let cropped = clip.cropped(rect).at_stage(Stage::Crop)?;

    let output_path = derive_output_path(input, &config.output_suffix).at_stage(Stage::Encode)?;
    reporter.export_started(&output_path);
    cropped
        .write_videofile(spawner, &output_path, config)
        .at_stage(Stage::Encode)?;

    let outcome = CropOutcome {
        input_path: input.to_path_buf(),
        output_size: fs::metadata(&output_path).map(|m| m.len()).ok(),
        output_path,
        source_size: clip.size(),
        rect,
        elapsed: start.elapsed(),
    };
    reporter.export_finished(&outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::mocks::{MockProber, RecordingSpawner, clip_fixture};
    use std::cell::RefCell;

    #[derive(Default)]
    struct EventLog(RefCell<Vec<String>>);

    impl CropReporter for EventLog {
        fn clip_opened(&self, clip: &VideoClip) {
            self.0
                .borrow_mut()
                .push(format!("opened {}x{}", clip.width, clip.height));
        }
        fn crop_planned(&self, rect: &CropRect) {
            self.0.borrow_mut().push(format!("crop {rect}"));
        }
        fn export_started(&self, _output: &Path) {
            self.0.borrow_mut().push("export".to_string());
        }
        fn export_finished(&self, _outcome: &CropOutcome) {
            self.0.borrow_mut().push("done".to_string());
        }
    }

    #[test]
    fn crop_run_writes_output_beside_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("video.mov");
        let prober = MockProber::default().with_clip(clip_fixture(input.clone(), 1920, 1080, true));
        let spawner = RecordingSpawner::new();
        let events = EventLog::default();

        let outcome = crop_with(&prober, &spawner, &input, &CropConfig::default(), &events).unwrap();

        assert_eq!(outcome.output_path, dir.path().join("video_9x16_crop.mov"));
        assert_eq!(outcome.source_size, (1920, 1080));
        assert_eq!((outcome.rect.x1, outcome.rect.x2), (656, 1263));
        assert_eq!(outcome.output_size, Some(b"mock output".len() as u64));
        assert_eq!(
            *events.0.borrow(),
            vec![
                "opened 1920x1080",
                "crop x1=656, y1=0, x2=1263, y2=1080",
                "export",
                "done"
            ]
        );
    }

    #[test]
    fn missing_input_fails_in_open_stage_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.mov");
        let spawner = RecordingSpawner::new();

        let err = crop_with(
            &MockProber::default(),
            &spawner,
            &input,
            &CropConfig::default(),
            &SilentReporter,
        )
        .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Open));
        assert!(spawner.calls().is_empty());
        assert!(!dir.path().join("missing_9x16_crop.mov").exists());
    }

    #[test]
    fn zero_sized_clip_fails_in_crop_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.mp4");
        let prober = MockProber::default().with_clip(clip_fixture(input.clone(), 0, 0, false));

        let err = crop_with(
            &prober,
            &RecordingSpawner::new(),
            &input,
            &CropConfig::default(),
            &SilentReporter,
        )
        .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Crop));
        assert!(matches!(
            err,
            CoreError::Stage { ref source, .. } if matches!(**source, CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn encoder_failure_is_tagged_encode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        let prober = MockProber::default().with_clip(clip_fixture(input.clone(), 400, 300, true));
        let spawner = RecordingSpawner::new().failing_on("audio pass");

        let err = crop_with(&prober, &spawner, &input, &CropConfig::default(), &SilentReporter)
            .unwrap_err();

        assert_eq!(err.stage(), Some(Stage::Encode));
        assert_eq!(spawner.calls().len(), 1);
        assert!(!dir.path().join("temp-audio.m4a").exists());
    }
}
