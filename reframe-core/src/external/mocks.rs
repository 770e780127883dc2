// reframe-core/src/external/mocks.rs
//
// Test doubles for the ffmpeg and ffprobe seams.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use super::{FfmpegInvocation, FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult};
use crate::media::clip::{AudioTrack, VideoClip};
use crate::media::probe::MediaProber;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Builds a probed clip without touching ffprobe.
pub(crate) fn clip_fixture(path: PathBuf, width: u32, height: u32, with_audio: bool) -> VideoClip {
    VideoClip {
        path,
        width,
        height,
        rotation: 0,
        duration_secs: Some(4.0),
        frame_rate: Some(30.0),
        video_codec: Some("h264".to_string()),
        audio: with_audio.then(|| AudioTrack {
            codec: Some("aac".to_string()),
            channels: Some(2),
            sample_rate: Some(48_000),
        }),
    }
}

/// Process that replays canned events, then writes its output on success.
pub(crate) struct MockProcess {
    events: Vec<FfmpegEvent>,
    output: Option<PathBuf>,
    exit_code: i32,
}

impl FfmpegProcess for MockProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events.drain(..) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        if self.exit_code == 0 {
            if let Some(output) = &self.output {
                std::fs::write(output, b"mock output")?;
            }
        }
        Ok(exit_status(self.exit_code))
    }
}

/// Spawner that records every invocation and fails the one with a given label.
#[derive(Default)]
pub(crate) struct RecordingSpawner {
    calls: RefCell<Vec<FfmpegInvocation>>,
    failing_label: Option<String>,
}

impl RecordingSpawner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(mut self, label: &str) -> Self {
        self.failing_label = Some(label.to_string());
        self
    }

    pub(crate) fn calls(&self) -> Vec<FfmpegInvocation> {
        self.calls.borrow().clone()
    }
}

impl FfmpegSpawner for RecordingSpawner {
    type Process = MockProcess;

    fn spawn(&self, invocation: &FfmpegInvocation) -> CoreResult<Self::Process> {
        self.calls.borrow_mut().push(invocation.clone());

        let fails = self.failing_label.as_deref() == Some(invocation.label());
        let process = if fails {
            MockProcess {
                events: vec![
                    FfmpegEvent::Log(LogLevel::Info, "Stream mapping:".to_string()),
                    FfmpegEvent::Error("simulated encoder failure".to_string()),
                ],
                output: None,
                exit_code: 1,
            }
        } else {
            MockProcess {
                events: Vec::new(),
                output: invocation.output_path().map(PathBuf::from),
                exit_code: 0,
            }
        };
        Ok(process)
    }
}

/// Prober answering from a fixed table of clips.
#[derive(Default)]
pub(crate) struct MockProber {
    clips: HashMap<PathBuf, VideoClip>,
}

impl MockProber {
    pub(crate) fn with_clip(mut self, clip: VideoClip) -> Self {
        self.clips.insert(clip.path.clone(), clip);
        self
    }
}

impl MediaProber for MockProber {
    fn probe(&self, path: &Path) -> CoreResult<VideoClip> {
        self.clips.get(path).cloned().ok_or_else(|| {
            CoreError::VideoInfoError(format!("No such clip: {}", path.display()))
        })
    }
}
