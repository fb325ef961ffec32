use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cardstmt_extract::{process_dir, ParseOutcome, ParserConfig, StatementPipeline};
use cardstmt_pdf::{default_pdf_source, FallbackSource, LopdfSource, PdfExtractSource};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod display;

const DEMO_TEXT: &str = "
    HDFC Bank Credit Card Statement
    Card Number: ****1234
    Statement Period: 01-Sep-2024 to 30-Sep-2024
    Total Amount Due: ₹45,230.50
    Payment Due Date: 25-10-2024
    Credit Limit: ₹200000
    ";

#[derive(Parser, Debug)]
#[command(
    name = "cardstmt",
    version,
    about = "Extract key fields from Indian credit card statements"
)]
struct Cli {
    /// TOML settings file (uses built-in defaults when absent)
    #[arg(long, global = true, default_value = "cardstmt.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one statement: a PDF, or any other file read as plain text
    Parse {
        file: PathBuf,

        /// Print the raw JSON result instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Parse statement text read from stdin
    Text {
        #[arg(long)]
        json: bool,
    },

    /// Parse every PDF in a folder and write the results file there
    Batch { dir: PathBuf },

    /// Run the parser over a built-in HDFC sample
    Demo,

    /// List the supported issuers
    Banks,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

type PdfPipeline = StatementPipeline<FallbackSource<PdfExtractSource, LopdfSource>>;

/// Returns whether the command succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config = ParserConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let pipeline: PdfPipeline =
        StatementPipeline::new(default_pdf_source(config.min_text_chars), config);

    match cli.command {
        Command::Parse { file, json } => {
            let outcome = parse_path(&pipeline, &file);
            emit(&outcome, json)
        }

        Command::Text { json } => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading statement text from stdin")?;
            emit(&pipeline.parse_text(&text), json)
        }

        Command::Batch { dir } => {
            let report = process_dir(&pipeline, &dir)?;
            for entry in &report.entries {
                let status = match &entry.result {
                    ParseOutcome::Parsed(r) => format!("ok ({})", r.bank),
                    ParseOutcome::Failed(f) => format!("failed: {}", f.message),
                };
                println!("{}: {status}", entry.file);
            }
            match &report.output_path {
                Some(path) => println!(
                    "\nProcessed {} file(s), {} failed. Results saved to {}",
                    report.entries.len(),
                    report.failed_count(),
                    path.display()
                ),
                None => println!("No PDF files found in {}", dir.display()),
            }
            Ok(true)
        }

        Command::Demo => {
            println!("Sample HDFC statement text:{DEMO_TEXT}");
            emit(&pipeline.parse_text(DEMO_TEXT), false)
        }

        Command::Banks => {
            println!("{}", display::render_banks());
            Ok(true)
        }
    }
}

fn parse_path(pipeline: &PdfPipeline, path: &Path) -> ParseOutcome {
    if cardstmt_extract::pipeline::is_pdf(path) {
        pipeline.process_file(path)
    } else {
        pipeline.process_text_file(path)
    }
}

fn emit(outcome: &ParseOutcome, json: bool) -> Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", display::render(outcome));
    }
    Ok(outcome.is_parsed())
}
