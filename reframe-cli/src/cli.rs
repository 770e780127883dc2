// reframe-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "reframe",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Reframe: center-crop a video to 9:16",
    long_about = "Center-crops a video to a 9:16 (width:height) frame and re-encodes it \
                  with H.264/AAC beside the original as <name>_9x16_crop<ext>."
)]
pub struct CropArgs {
    /// Video file to crop. Prompted for on standard input when omitted.
    /// Surrounding whitespace and single quotes are ignored.
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Enable debug logging (RUST_LOG overrides this).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "reframe-inspect",
    author,
    version,
    about = "Reframe inspector: list the attributes of an opened clip"
)]
pub struct InspectArgs {
    /// Video file to open (defaults to the bundled recording path).
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Enable debug logging (RUST_LOG overrides this).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
