// reframe-cli/src/main.rs
//
// Entry point of the `reframe` binary: parse arguments, set up logging,
// run the crop, and map any failure to an `Error:` line and exit status 1.

use clap::Parser;
use reframe_cli::logging::init_logging;
use reframe_cli::terminal::print_error;
use reframe_cli::{CropArgs, run_crop};
use std::process;

fn main() {
    let args = CropArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run_crop(args) {
        log::debug!("Crop failed: {e:?}");
        print_error(&e);
        process::exit(1);
    }
}
