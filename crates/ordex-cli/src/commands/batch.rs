//! Batch processing command for multiple purchase-order PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use ordex_core::{DocumentSource, OrderParser, PdfExtractor};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Pretty-print the JSON outputs
    #[arg(short, long)]
    pretty: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = OrderParser::with_config(config);
    let mut succeeded = 0usize;
    let mut empty = 0usize;
    let mut failures: Vec<(PathBuf, String)> = Vec::new();

    for path in files {
        match process_file(&path, &parser, &args) {
            Ok(true) => succeeded += 1,
            Ok(false) => {
                debug!("No records recognized in {}", path.display());
                succeeded += 1;
                empty += 1;
            }
            Err(e) => {
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), e);
                    failures.push((path, e.to_string()));
                } else {
                    return Err(e.context(format!("Processing failed: {}", path.display())));
                }
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        succeeded + failures.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} empty), {} failed",
        style(succeeded).green(),
        empty,
        style(failures.len()).red()
    );

    if !failures.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, error) in &failures {
            println!("  - {}: {}", path.display(), error);
        }
    }

    Ok(())
}

/// Process one file; `Ok(true)` means at least one record came out.
fn process_file(path: &Path, parser: &OrderParser, args: &BatchArgs) -> anyhow::Result<bool> {
    let data = fs::read(path)?;
    let doc = PdfExtractor::load(&data)?;
    debug!("{}: {} pages", path.display(), doc.page_count());

    let result = parser.process(&doc)?;

    let output = result.to_json(args.pretty)?;
    if let Some(output_dir) = &args.output_dir {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("order");
        let output_path = output_dir.join(format!("{}.json", stem));
        fs::write(&output_path, output)?;
        debug!("Wrote output to {}", output_path.display());
    } else {
        println!("{}", output);
    }

    Ok(!result.is_empty())
}
