//! `FFmpeg` progress handler
//!
//! Consumes the event stream of one ffmpeg run: log lines are forwarded to
//! the `log` facade, error lines are buffered for the failure message, and
//! progress updates drive an `indicatif` bar when the clip duration is known.

use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::CoreResult;
use crate::utils::parse_ffmpeg_time;

const BAR_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {percent:>3}% ({elapsed_precise}, eta {eta})";

/// Handler for the events of a single ffmpeg run.
pub struct FfmpegProgressHandler {
    duration: Option<f64>,
    bar: Option<ProgressBar>,
    stderr_buffer: String,
}

impl FfmpegProgressHandler {
    /// Creates a handler. A bar is shown only if `show_bar` is set and the
    /// duration is known and positive.
    #[must_use]
    pub fn new(label: &str, duration: Option<f64>, show_bar: bool) -> Self {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        let bar = match duration {
            Some(total) if show_bar => Some(make_bar(label, total)),
            _ => None,
        };
        Self {
            duration,
            bar,
            stderr_buffer: String::new(),
        }
    }

    /// Handles an `FFmpeg` event
    pub fn handle_event(&mut self, event: FfmpegEvent) -> CoreResult<()> {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            _ => {}
        }
        Ok(())
    }

    /// Error output collected so far, one line per message.
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    /// Removes the progress bar from the terminal.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        if let (Some(bar), Some(total)) = (&self.bar, self.duration) {
            let position = (current_secs.min(total) * 1000.0) as u64;
            bar.set_position(position);
        } else {
            log::trace!("ffmpeg progress: {current_secs:.2}s");
        }
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        match level {
            FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => {
                log::debug!(target: "ffmpeg_log", "{message}");
                self.push_stderr(message);
            }
            FfmpegLogLevel::Warning => log::debug!(target: "ffmpeg_log", "warning: {message}"),
            _ => log::trace!(target: "ffmpeg_log", "{message}"),
        }
    }

    fn handle_error(&mut self, error: &str) {
        log::debug!("ffmpeg stderr error: {error}");
        self.push_stderr(error);
    }

    fn push_stderr(&mut self, line: &str) {
        self.stderr_buffer.push_str(line);
        self.stderr_buffer.push('\n');
    }
}

impl Drop for FfmpegProgressHandler {
    fn drop(&mut self) {
        self.finish();
    }
}

fn make_bar(label: &str, total_secs: f64) -> ProgressBar {
    let bar = ProgressBar::new((total_secs * 1000.0) as u64);
    if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message(label.to_string());
    bar
}
