//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DEFAULT_OUTPUT_PATH, ITEM_TAG_ENV, SOURCE_URL_ENV};
use crate::converter::convert_feed;
use crate::error::{ConvertError, Result};
use crate::output::save_csv;

/// xml2csv - Convert XML feeds to CSV with automatic schema inference.
#[derive(Parser)]
#[command(name = "xml2csv")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download an XML feed and convert it to CSV.
    Convert {
        /// Source URL of the XML feed (default: $SOURCE_URL)
        #[arg(short, long)]
        url: Option<String>,

        /// Output CSV path
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        out: PathBuf,

        /// Repeated item tag to force instead of automatic detection
        /// (default: $ITEM_TAG)
        #[arg(short = 't', long)]
        item_tag: Option<String>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { url, out, item_tag } => {
            convert_command(url.as_deref(), &out, item_tag.as_deref())
        }
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Execute the convert command.
fn convert_command(url: Option<&str>, out: &Path, item_tag: Option<&str>) -> Result<()> {
    let url = url
        .map(String::from)
        .or_else(|| env_non_empty(SOURCE_URL_ENV))
        .ok_or(ConvertError::MissingSourceUrl)?;
    let forced_tag = item_tag
        .map(String::from)
        .or_else(|| env_non_empty(ITEM_TAG_ENV));

    println!(
        "{} {}",
        style("Converting").bold(),
        style(&url).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Downloading feed...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let conversion = match convert_feed(&url, forced_tag.as_deref()) {
        Ok(conversion) => conversion,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing CSV...");

    let output_path = match save_csv(&conversion.rows, out) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Item tag: {}", style(&conversion.item_tag).green());
    println!("  Records: {}", conversion.rows.len());
    if !conversion.warnings.is_empty() {
        println!(
            "  Warnings: {}",
            style(conversion.warnings.len()).yellow().bold()
        );
        for warning in &conversion.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
