// ============================================================================
// reframe-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// KEY COMPONENTS:
// - FfmpegInvocation: the argument list for one ffmpeg run
// - FfmpegProcess: trait representing an active ffmpeg process
// - FfmpegSpawner: trait for starting new ffmpeg processes
// - SidecarSpawner / SidecarProcess: implementation on ffmpeg-sidecar
//
// A SidecarProcess owns its child. If it is dropped before `wait` returned,
// the child is killed and reaped so no encoder outlives the run.

use std::path::Path;
use std::process::ExitStatus;

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};

/// Arguments for a single ffmpeg run, without the program name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfmpegInvocation {
    label: String,
    args: Vec<String>,
}

impl FfmpegInvocation {
    /// Starts an empty invocation. `label` names the run in logs and errors.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds `-i <path>`.
    pub fn input(&mut self, path: &Path) -> &mut Self {
        self.arg("-i").arg(path.to_string_lossy())
    }

    /// Appends the output path. Must be the last argument added.
    pub fn output(&mut self, path: &Path) -> &mut Self {
        self.arg(path.to_string_lossy())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// The output path, taken from the last argument.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Renders the invocation as a shell-like command line for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = String::from("ffmpeg");
        for arg in &self.args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

// --- FFmpeg Execution Abstraction ---

/// An active ffmpeg process.
pub trait FfmpegProcess {
    /// Feeds every event from the running command to `handler`.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Something that can start an `FfmpegProcess`.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    fn spawn(&self, invocation: &FfmpegInvocation) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Owned ffmpeg-sidecar child, killed on drop if still running.
pub struct SidecarProcess {
    child: FfmpegChild,
    label: String,
    finished: bool,
}

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.child.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {e}");
            CoreError::OperationFailed(format!(
                "{}: failed to read ffmpeg output: {e}",
                self.label
            ))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error(self.label.clone(), e))?;
        self.finished = true;
        Ok(status)
    }
}

impl Drop for SidecarProcess {
    fn drop(&mut self) {
        if self.finished {
            log::debug!("Released ffmpeg process for {}", self.label);
            return;
        }
        log::debug!("Stopping unfinished ffmpeg process for {}", self.label);
        if let Err(e) = self.child.kill() {
            log::debug!("Kill of ffmpeg process for {} failed: {e}", self.label);
        }
        let _ = self.child.wait();
    }
}

/// `FfmpegSpawner` that runs the ffmpeg binary through ffmpeg-sidecar.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, invocation: &FfmpegInvocation) -> CoreResult<Self::Process> {
        let mut cmd = FfmpegCommand::new();
        cmd.args(invocation.get_args());
        log::debug!("Spawning: {}", invocation.command_line());
        cmd.spawn()
            .map(|child| SidecarProcess {
                child,
                label: invocation.label().to_string(),
                finished: false,
            })
            .map_err(|e| command_start_error(format!("ffmpeg ({})", invocation.label()), e))
    }
}
