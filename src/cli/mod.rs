//! # CLI Module
//!
//! Command-line interface for the image duplicate finder.
//!
//! ## Usage
//! ```bash
//! # Scan a directory for possible duplicates
//! find-image-dupes ~/Pictures
//!
//! # Looser threshold, only JPEGs
//! find-image-dupes ~/Pictures --threshold 15 --extensions jpg,jpeg
//!
//! # JSON output
//! find-image-dupes ~/Pictures --output json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use image_dupe_finder::core::comparator::MatchThreshold;
use image_dupe_finder::core::pipeline::{Pipeline, PipelineResult};
use image_dupe_finder::core::scanner::{parse_extensions, DEFAULT_EXTENSIONS};
use image_dupe_finder::error::Result;
use image_dupe_finder::events::{
    CompareEvent, Event, EventChannel, FingerprintEvent, PipelineEvent, ScanEvent,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;

/// Find visually similar images by comparing perceptual fingerprints
#[derive(Parser, Debug)]
#[command(name = "find-image-dupes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories or files to scan, in order
    paths: Vec<PathBuf>,

    /// Maximum difference between fingerprints, as a percentage of 256 bits
    #[arg(short, long, default_value_t = MatchThreshold::DEFAULT_PERCENT)]
    threshold: f64,

    /// Comma-separated file extensions to consider
    #[arg(short, long, default_value_t = DEFAULT_EXTENSIONS.join(","))]
    extensions: String,

    /// Skip files and directories whose names start with a dot
    #[arg(long)]
    exclude_hidden: bool,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Fingerprint and compare on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One "Possible matches:" block per cluster
    Plain,
    /// Human-readable output with colors and a progress bar
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    image_dupe_finder::init_tracing(cli.verbose);

    if cli.paths.is_empty() {
        return Ok(());
    }

    let threshold = MatchThreshold::from_percent(cli.threshold)?;
    let extensions = parse_extensions(&cli.extensions)?;

    let pipeline = Pipeline::builder()
        .paths(cli.paths.clone())
        .threshold(threshold)
        .extensions(extensions)
        .include_hidden(!cli.exclude_hidden)
        .follow_symlinks(cli.follow_symlinks)
        .parallel(!cli.single_threaded)
        .build();

    let term = Term::stderr();
    if cli.output == OutputFormat::Pretty {
        term.write_line(&format!(
            "{} {}",
            style("Image Dupe Finder").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = (cli.output == OutputFormat::Pretty).then(|| {
        let pb = ProgressBar::new(0);
        if let Ok(bar_style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        pb
    });

    let verbose = cli.verbose;

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress else {
            // Drain so the channel never backs up
            for _ in receiver.iter() {}
            return;
        };

        for event in receiver.iter() {
            match event {
                Event::Pipeline(PipelineEvent::PhaseChanged { phase }) => {
                    pb.set_message(phase.to_string());
                }
                Event::Scan(ScanEvent::Completed { total_files }) => {
                    pb.set_length(total_files as u64);
                }
                Event::Fingerprint(FingerprintEvent::Progress(p)) => {
                    pb.set_position(p.completed as u64);
                    if verbose {
                        pb.set_message(
                            p.current_path
                                .file_name()
                                .unwrap_or_default()
                                .to_string_lossy()
                                .into_owned(),
                        );
                    }
                }
                Event::Fingerprint(FingerprintEvent::Error { path, message }) if verbose => {
                    pb.println(format!("{} {}: {}", style("!").yellow(), path.display(), message));
                }
                Event::Compare(CompareEvent::PairsFound { total_pairs }) => {
                    pb.set_message(format!("{} matching pairs", total_pairs));
                }
                Event::Pipeline(PipelineEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = pipeline.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    let result = result?;

    match cli.output {
        OutputFormat::Plain => print_plain_results(&result),
        OutputFormat::Pretty => print_pretty_results(&term, &result, cli.verbose),
        OutputFormat::Json => print_json_results(&result, threshold),
    }

    Ok(())
}

fn print_plain_results(result: &PipelineResult) {
    print!("{}", format_plain(result));
}

/// One block per cluster: a header, member paths, then a blank line
fn format_plain(result: &PipelineResult) -> String {
    let mut out = String::new();
    for group in &result.groups {
        out.push_str("Possible matches:\n");
        for photo in &group.photos {
            out.push_str(&photo.display().to_string());
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn print_pretty_results(term: &Term, result: &PipelineResult, verbose: bool) {
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images fingerprinted of {} found in {:.1}s",
        style(result.fingerprinted()).cyan(),
        style(result.total_files).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    term.write_line(&format!(
        "  {} groups of possible duplicates",
        style(result.groups.len()).cyan()
    ))
    .ok();

    if !result.errors.is_empty() {
        term.write_line(&format!(
            "  {} files skipped",
            style(result.errors.len()).yellow()
        ))
        .ok();
        if verbose {
            for error in &result.errors {
                term.write_line(&format!("    {}", style(error).dim())).ok();
            }
        }
    }

    term.write_line("").ok();

    if result.groups.is_empty() {
        term.write_line(&format!("  {}", style("No possible duplicates found").green()))
            .ok();
        return;
    }

    for (i, group) in result.groups.iter().enumerate() {
        term.write_line(&format!(
            "  {} {} ({} images, closest {} bits)",
            style(format!("Group {}:", i + 1)).bold(),
            style(group.match_type).yellow(),
            group.len(),
            group.closest_distance
        ))
        .ok();

        for photo in &group.photos {
            term.write_line(&format!("    {} {}", style("○").dim(), photo.display()))
                .ok();
        }

        if verbose {
            term.write_line(&format!(
                "    {} {:.1} bits",
                style("Average distance:").dim(),
                group.average_distance
            ))
            .ok();
        }

        term.write_line("").ok();
    }
}

fn print_json_results(result: &PipelineResult, threshold: MatchThreshold) {
    let output = serde_json::json!({
        "total_files": result.total_files,
        "fingerprinted": result.fingerprinted(),
        "threshold_percent": threshold.percent(),
        "threshold_bits": threshold.bits(),
        "duration_ms": result.duration_ms,
        "errors": result.errors,
        "groups": result.groups.iter().map(|g| {
            serde_json::json!({
                "match_type": g.match_type.to_string(),
                "closest_distance": g.closest_distance,
                "average_distance": g.average_distance,
                "photos": g.photos,
                "fingerprints": g.indices
                    .iter()
                    .map(|&i| result.records[i].fingerprint.to_string())
                    .collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    });

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("failed to serialize results: {}", e),
    }
}
