//! Command-line interface definitions for the Mars scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the Mars scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape into the default ./out directory
/// mars_scraper
///
/// # Scrape into a custom directory with a visible browser window
/// mars_scraper -j ./json --headful
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON result file
    #[arg(short, long, default_value = "./out")]
    pub json_output_dir: String,

    /// Run Chromium with a visible window instead of headless
    #[arg(long)]
    pub headful: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["mars_scraper"]);

        assert_eq!(cli.json_output_dir, "./out");
        assert!(!cli.headful);
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "mars_scraper",
            "--json-output-dir",
            "./json",
            "--headful",
        ]);

        assert_eq!(cli.json_output_dir, "./json");
        assert!(cli.headful);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["mars_scraper", "-j", "/tmp/json"]);

        assert_eq!(cli.json_output_dir, "/tmp/json");
    }
}
