use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Client for the company-page scraping, page summary, and OCR server.
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(version)]
#[command(about = "Batch LinkedIn company scraper client with CSV and clipboard export")]
pub struct Cli {
    /// Config file (RON). Defaults to ./scout.ron when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL, e.g. http://127.0.0.1:5002
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Client-side request deadline in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Directory for CSV exports
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Where log output goes
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape employee counts for company URLs, one per line.
    Scrape {
        /// File with one URL per line; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the results table as CSV into the output directory
        #[arg(long)]
        csv: bool,

        /// Copy the results table to the clipboard as tab-separated text
        #[arg(long)]
        copy: bool,
    },
    /// Summarize one page: title, content, links, and images.
    Gather {
        url: String,

        /// Copy the extracted content to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Extract text from an image file.
    Ocr {
        image: PathBuf,

        /// Copy the extracted text to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}
