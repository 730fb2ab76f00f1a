use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "reader")]
#[command(about = "Decide whether a saved page is worth reading aloud and print its text")]
#[command(version)]
pub struct Cli {
    /// Saved HTML page to inspect
    #[arg(value_name = "FILE")]
    pub page: PathBuf,

    /// Location the page was captured at (full URL or path)
    #[arg(short, long)]
    pub location: String,

    /// Charset reported alongside the page, if any
    #[arg(long, value_name = "LABEL")]
    pub charset: Option<String>,

    /// RON file overriding markers and thresholds
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Print structured content and the extraction report as JSON
    #[arg(long)]
    pub json: bool,

    /// Re-check ticks to run after the first verdict
    #[arg(long, default_value = "2")]
    pub polls: u32,

    /// Also write log records to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
