// reframe-cli/src/bin/reframe-inspect.rs
//
// Entry point of the `reframe-inspect` diagnostic binary.

use clap::Parser;
use reframe_cli::logging::init_logging;
use reframe_cli::terminal::print_error;
use reframe_cli::{InspectArgs, run_inspect};
use std::process;

fn main() {
    let args = InspectArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run_inspect(args) {
        print_error(&e);
        process::exit(1);
    }
}
