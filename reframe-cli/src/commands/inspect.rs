//! Implementation of the `reframe-inspect` command.
//!
//! Opens a clip and lists the attribute names of the handle. This is a
//! debugging aid for looking at what probing reports.

use reframe_core::{open_clip, sanitize_input_path};

use crate::cli::InspectArgs;
use crate::config::DEFAULT_INSPECT_PATH;
use crate::error::CliResult;
use crate::terminal::print_attribute_list;

pub fn run_inspect(args: InspectArgs) -> CliResult<()> {
    let path = sanitize_input_path(args.path.as_deref().unwrap_or(DEFAULT_INSPECT_PATH));

    let clip = open_clip(&path)?;
    println!("Successfully loaded clip");
    print_attribute_list(&clip.attribute_names()?);
    Ok(())
}
