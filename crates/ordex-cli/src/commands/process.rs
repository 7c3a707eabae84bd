//! Process command - extract data from a single purchase-order PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ordex_core::{DocumentSource, OrderParser, PdfExtractor};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let doc = PdfExtractor::load(&data)?;
    debug!("PDF has {} pages", doc.page_count());

    let result = OrderParser::with_config(config).process(&doc)?;

    for warning in &result.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }
    if result.is_empty() {
        eprintln!(
            "{} No records recognized in the document",
            style("ℹ").blue()
        );
    }

    let output = result.to_json(args.pretty)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
        println!(
            "{} {} records extracted in {}ms",
            style("✓").green(),
            result.records.len(),
            result.processing_time_ms
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
