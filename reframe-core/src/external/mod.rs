// ============================================================================
// reframe-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg and ffprobe binaries
//
// This module wraps the external command-line tools the cropper delegates
// all media work to. Spawning goes through the `FfmpegSpawner` trait so
// tests can substitute a recording spawner for the real ffmpeg-sidecar one.
//
// KEY COMPONENTS:
// - Dependency checking for ffmpeg and ffprobe
// - FfmpegInvocation / FfmpegSpawner / FfmpegProcess abstractions
// - Argument building for the audio and video passes

use std::io;
use std::process::{Command, Stdio};

use crate::error::{CoreError, CoreResult};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Argument building and execution of the audio and video encode passes
pub mod ffmpeg;

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

#[cfg(test)]
pub(crate) mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_executor::{
    FfmpegInvocation, FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd_name` can be started with `-version`.
pub(crate) fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Verifies that both ffprobe and ffmpeg are available.
pub fn ensure_dependencies() -> CoreResult<()> {
    check_dependency("ffprobe")?;
    check_dependency("ffmpeg")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_is_reported_by_name() {
        let err = check_dependency("reframe-definitely-not-installed").unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name == "reframe-definitely-not-installed"));
    }
}
