//! cnpunct CLI - Chinese punctuation normalization tool

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use cnpunct::{
    normalize_text, Cnpunct, JsonFormat, JsonStore, NormalizeReport, RunFallback, StoreRegistry,
};

#[derive(Parser)]
#[command(name = "cnpunct")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Normalize Chinese punctuation in rich-text documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a document and save the result
    Fix {
        /// Input document
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output document
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Process paragraphs on a single thread
        #[arg(long, env = "CNPUNCT_SEQUENTIAL")]
        sequential: bool,

        /// Do not re-pair quote marks
        #[arg(long)]
        no_quotes: bool,

        /// Leave table cells untouched
        #[arg(long)]
        skip_tables: bool,

        /// Put length-changed text into the first run (old behavior)
        #[arg(long)]
        legacy_fallback: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List paragraphs that would change, without writing anything
    Check {
        /// Input document
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Leave table cells out of the check
        #[arg(long)]
        skip_tables: bool,
    },

    /// Normalize a piece of text (reads stdin if TEXT is omitted)
    Text {
        /// Text to normalize
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Fix {
            input,
            output,
            sequential,
            no_quotes,
            skip_tables,
            legacy_fallback,
            compact,
        }) => {
            let mut builder = Cnpunct::new();
            if sequential {
                builder = builder.sequential();
            }
            if no_quotes {
                builder = builder.without_quotes();
            }
            if skip_tables {
                builder = builder.skip_tables();
            }
            if legacy_fallback {
                builder = builder.with_run_fallback(RunFallback::FirstRun);
            }
            if compact {
                let mut registry = StoreRegistry::new();
                registry.register(Arc::new(JsonStore::new().with_format(JsonFormat::Compact)));
                builder = builder.with_registry(registry);
            }
            cmd_fix(&builder, &input, &output)
        }
        Some(Commands::Check { input, skip_tables }) => {
            let mut builder = Cnpunct::new();
            if skip_tables {
                builder = builder.skip_tables();
            }
            cmd_check(&builder, &input)
        }
        Some(Commands::Text { text }) => cmd_text(text),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: cnpunct <COMMAND>".yellow());
            println!("       cnpunct --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_fix(builder: &Cnpunct, input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let report = builder.process_file(input, output)?;

    print_summary(&report);
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn cmd_check(builder: &Cnpunct, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let report = builder.check_file(input)?;

    if report.is_unchanged() {
        println!("{}", "Nothing to change.".green());
        return Ok(());
    }

    for change in &report.changes {
        println!("{}", change.location.to_string().cyan().bold());
        println!("  {} {}", "-".red(), change.before);
        println!("  {} {}", "+".green(), change.after);
    }
    println!();
    print_summary(&report);

    Ok(())
}

fn cmd_text(text: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let text = match text {
        Some(text) => text,
        None => {
            log::debug!("Reading text from stdin");
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    // Each input line is its own paragraph.
    let normalized: Vec<String> = text.lines().map(normalize_text).collect();
    println!("{}", normalized.join("\n"));

    Ok(())
}

fn print_summary(report: &NormalizeReport) {
    println!("{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs changed".bold(), report.paragraphs_changed);
    println!("{}: {}", "Table cells changed".bold(), report.table_cells_changed);
    println!("{}: {}", "Runs rewritten".bold(), report.runs_rewritten);
    println!("{}: {}", "Quote fixes".bold(), report.quote_paragraphs);
    if report.fallback_redistributions > 0 {
        println!(
            "{}: {}",
            "Run fallbacks".yellow().bold(),
            report.fallback_redistributions
        );
    }
}

fn cmd_version() {
    println!("{} {}", "cnpunct".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chinese punctuation normalization tool");
    println!();
    println!("License: MIT");
}
