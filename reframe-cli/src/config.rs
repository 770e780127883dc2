// reframe-cli/src/config.rs
//
// Default constants for the `reframe` and `reframe-inspect` binaries.

/// Prompt shown when `reframe` is started without a path argument.
pub const PATH_PROMPT: &str = "Enter the filepath of the video file (.mov, ignore single quotes): ";

/// Clip opened by `reframe-inspect` when no path is given.
pub const DEFAULT_INSPECT_PATH: &str = "Recordings/Movie_001.mp4";
