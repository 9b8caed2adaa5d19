//! JSON output generation.
//!
//! Serializes a finished [`ScrapeResult`] to one file per run date, named
//! after the record's `last_modified` date. A rerun on the same day
//! overwrites that day's file with the fresher record.

use crate::models::ScrapeResult;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`ScrapeResult`] to `{json_output_dir}/{date}.json`.
///
/// Creates the output directory if it does not exist yet.
///
/// # Arguments
///
/// * `result` - The assembled scrape record to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization, directory creation,
/// or file writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_result(
    result: &ScrapeResult,
    json_output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(result)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!(
        "{}/{}.json",
        json_output_dir,
        result.last_modified.date_naive()
    );

    info!(path = %output_json_filename, "Writing JSON");
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, "Wrote scrape result");

    Ok(())
}
