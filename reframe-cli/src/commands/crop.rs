//! Implementation of the `reframe` command.
//!
//! Resolves the input path (argument or prompt), then hands the run to
//! `reframe_core::crop_to_vertical` with console reporting.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use reframe_core::{CropConfig, crop_to_vertical, sanitize_input_path};

use crate::cli::CropArgs;
use crate::config::PATH_PROMPT;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::ConsoleReporter;

/// Writes the prompt to `output` and reads one line from `input`.
///
/// End of input before any character is an error.
pub fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> CliResult<String> {
    output
        .write_all(PATH_PROMPT.as_bytes())
        .and_then(|()| output.flush())
        .cli_context("Failed to write prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .cli_context("Failed to read path from standard input")?;
    (read > 0).then_some(line).cli_context("No path entered")
}

/// Runs a crop for the parsed arguments.
pub fn run_crop(args: CropArgs) -> CliResult<()> {
    let raw = match args.path {
        Some(path) => path,
        None => prompt_for_path(io::stdin().lock(), io::stdout())?,
    };
    let input = sanitize_input_path(&raw);
    debug!("Sanitized input path: {}", input.display());

    let outcome = crop_to_vertical(&input, &CropConfig::default(), &ConsoleReporter)?;
    info!(
        "Cropped {} ({}x{}) to {}x{}",
        outcome.input_path.display(),
        outcome.source_size.0,
        outcome.source_size.1,
        outcome.rect.width(),
        outcome.rect.height()
    );
    Ok(())
}
