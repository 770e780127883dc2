//! Command implementations for the CLI.
//!
//! Each submodule backs one binary.

/// Crops a video to 9:16 (`reframe`).
pub mod crop;

/// Lists the attributes of an opened clip (`reframe-inspect`).
pub mod inspect;
