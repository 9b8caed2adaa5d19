//! # Mars Scraper
//!
//! Scrapes current Mars content from four mirror sites into a single JSON
//! record: the latest news article, the featured space image, a Mars/Earth
//! facts table, and full-resolution hemisphere imagery.
//!
//! ## Features
//!
//! - Latest article title and teaser from the Mars news mirror
//! - Full-size featured image URL, revealed by driving the page's lightbox
//! - Mars/Earth comparison table, re-serialized as a clean HTML fragment
//! - Title and full-resolution image URL for each hemisphere
//! - Sections degrade independently: a failed site leaves its field absent
//!   instead of failing the run
//!
//! ## Usage
//!
//! ```sh
//! mars_scraper -j ./out
//! ```
//!
//! ## Architecture
//!
//! One run is a fixed pipeline:
//! 1. **Launch**: start a Chromium session over CDP
//! 2. **Scrape**: visit the four sites sequentially, sharing the session
//! 3. **Output**: stamp the assembled record and write `{out_dir}/{date}.json`

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod browser;
mod cli;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::json;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("mars_scraper starting up");

    let args = Cli::parse();
    debug!(?args.json_output_dir, headful = args.headful, "Parsed CLI arguments");

    // Early check: ensure the JSON output dir is writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let result = scrapers::scrape_all(args.headful).await?;
    info!(
        sections = result.populated_sections(),
        news = result.news_title.is_some(),
        featured_image = result.featured_image.is_some(),
        facts = result.facts.is_some(),
        hemispheres = result.hemispheres.len(),
        "Scrape run finished"
    );

    if let Err(e) = json::write_result(&result, &args.json_output_dir).await {
        error!(error = %e, "Failed to write final JSON");
        return Err(e);
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
