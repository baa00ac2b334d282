//! # find-image-dupes CLI
//!
//! Command-line interface for the image duplicate finder.
//!
//! ## Usage
//! ```bash
//! find-image-dupes ~/Pictures --threshold 10
//! find-image-dupes ~/Pictures --verbose --output json
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
