// reframe-cli/src/lib.rs
//
// Library portion of the Reframe CLI application.
// Contains argument definitions and command logic shared by both binaries.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binaries or integration tests
pub use cli::{CropArgs, InspectArgs};
pub use commands::crop::run_crop;
pub use commands::inspect::run_inspect;
