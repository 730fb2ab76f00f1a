mod cli;
mod runner;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use reader_engine::{decode_html, HtmlDocument, ReaderSettings};
use reader_logging::{reader_info, reader_warn};

use crate::cli::Cli;
use crate::runner::PageRunner;

/// Exit status when the page has nothing worth reading.
const EXIT_NO_CONTENT: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    reader_logging::initialize(cli.log_level(), cli.log_file.as_deref());

    let settings = match cli.settings.as_deref() {
        Some(path) => load_settings(path)?,
        None => ReaderSettings::default(),
    };

    let bytes = fs::read(&cli.page)
        .with_context(|| format!("failed to read page {}", cli.page.display()))?;
    let decoded = decode_html(&bytes, cli.charset.as_deref())
        .with_context(|| format!("failed to decode page {}", cli.page.display()))?;
    reader_info!(
        "loaded {} ({} bytes, {})",
        cli.page.display(),
        bytes.len(),
        decoded.encoding_label
    );

    let document = HtmlDocument::parse(&decoded.html, cli.location.as_str());
    let outcome = PageRunner::new(document, settings, cli.polls).run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Some(text) = outcome.offered.as_ref().and_then(|content| content.readable_text()) {
        println!("{text}");
    } else if let Some(verdict) = outcome.verdicts.last() {
        reader_warn!("no reader offered: {:?}", verdict.signal);
    }

    if outcome.offered.is_some() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_NO_CONTENT))
    }
}

fn load_settings(path: &Path) -> Result<ReaderSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    ReaderSettings::from_ron(&text)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_file_overrides_thresholds() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reader.ron");
        fs::write(&path, "(thresholds: (thread_min_items: 3))").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.thresholds.thread_min_items, 3);
        assert_eq!(settings.thresholds.single_item_chars, 280);
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_settings(&dir.path().join("absent.ron")).unwrap_err();
        assert!(err.to_string().contains("failed to read settings"));
    }

    #[test]
    fn cli_parses_location_and_flags() {
        let cli = Cli::try_parse_from([
            "reader",
            "page.html",
            "--location",
            "/alice/status/1",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.location, "/alice/status/1");
        assert!(cli.json);
        assert_eq!(cli.polls, 2);
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }
}
