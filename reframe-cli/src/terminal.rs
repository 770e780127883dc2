// reframe-cli/src/terminal.rs
//
// Console output for the CLI: run milestones on stdout, errors on stderr.

use std::path::Path;

use console::style;
use reframe_core::{CropOutcome, CropRect, CropReporter, VideoClip, format_bytes, format_duration};

/// Prints the progress of a crop run to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl CropReporter for ConsoleReporter {
    fn clip_opened(&self, clip: &VideoClip) {
        println!(
            "{} {}x{}",
            style("Original video dimensions:").bold(),
            clip.width,
            clip.height
        );
    }

    fn crop_planned(&self, rect: &CropRect) {
        println!(
            "{} {}x{}",
            style("Cropping to:").bold(),
            rect.width(),
            rect.height()
        );
        println!("{} {rect}", style("Crop coordinates:").bold());
    }

    fn export_started(&self, _output: &Path) {
        println!("{}", style("Exporting cropped video...").cyan());
    }

    fn export_finished(&self, outcome: &CropOutcome) {
        println!(
            "{} {}",
            style("Cropped video saved to:").green().bold(),
            outcome.output_path.display()
        );
        let size = outcome
            .output_size
            .map_or_else(|| "unknown".to_string(), format_bytes);
        println!(
            "  Encode time: {}",
            style(format_duration(outcome.elapsed)).bold()
        );
        println!("  Output size: {}", style(size).bold());
    }
}

/// Prints the inspector listing.
pub fn print_attribute_list(names: &[String]) {
    println!("{}", style("Available methods and attributes:").bold());
    for name in names {
        println!("{name}");
    }
}

/// Prints a fatal error to stderr.
pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {err}", style("Error:").red().bold());
}
