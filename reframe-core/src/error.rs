// ============================================================================
// reframe-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the Reframe core library
//
// Every failure that crosses a collaborator boundary (opening the clip,
// computing the crop, encoding the result) is wrapped in `CoreError::Stage`
// so the caller sees a single tagged error naming where it came from.

use std::fmt;
use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// The step of a crop run an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking dependencies and probing the source clip.
    Open,
    /// Computing the crop rectangle from the source dimensions.
    Crop,
    /// Running ffmpeg to write the cropped output.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::Crop => "crop",
            Stage::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Required dependency '{0}' was not found in PATH")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(String),

    #[error("Video info error: {0}")]
    VideoInfoError(String),

    #[error("No streams found in {0}")]
    NoStreamsFound(String),

    #[error("Invalid source dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Crop of {width}x{height} source to {ratio} leaves an empty frame")]
    DegenerateCrop {
        width: u32,
        height: u32,
        ratio: String,
    },

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("{stage} stage failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Returns the stage this error was tagged with, if any.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CoreError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Tags a failed result with the stage it came from.
pub trait StageContext<T> {
    fn at_stage(self, stage: Stage) -> CoreResult<T>;
}

impl<T> StageContext<T> for CoreResult<T> {
    fn at_stage(self, stage: Stage) -> CoreResult<T> {
        self.map_err(|e| match e {
            // Keep the innermost stage if a helper already tagged it.
            tagged @ CoreError::Stage { .. } => tagged,
            other => CoreError::Stage {
                stage,
                source: Box::new(other),
            },
        })
    }
}

pub(crate) fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

pub(crate) fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

pub(crate) fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
