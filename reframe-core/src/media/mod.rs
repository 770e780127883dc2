//! Media handles and probing.
//!
//! `VideoClip` is what opening a file yields; `MediaProber` is the seam used
//! to open one, with `FfprobeProber` as the real implementation.

pub mod clip;
pub mod probe;

pub use clip::{AudioTrack, CroppedClip, VideoClip};
pub use probe::{FfprobeProber, MediaProber};
