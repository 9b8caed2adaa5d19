//! Mars facts table scraper.
//!
//! The facts mirror serves a static Mars/Earth comparison table as the first
//! `<table>` on the page, so no browser session is involved: the page is
//! fetched over plain HTTP and the table is re-serialized as a standalone
//! HTML fragment with fixed column names, ready to embed in other documents.

use crate::utils::element_text;
use reqwest::get;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{info, instrument, warn};

/// Production facts page URL.
pub const FACTS_URL: &str = "https://galaxyfacts-mars.com";

/// Column names the re-serialized fragment always carries. The source
/// table's own header row is dropped in favor of these.
const COLUMNS: [&str; 3] = ["description", "Mars", "Earth"];

/// Scrape the Mars/Earth comparison table as an HTML fragment.
///
/// Any failure (request error, non-success status, missing or malformed
/// table) logs a warning and degrades to `None`.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn scrape(url: &str) -> Option<String> {
    match fetch_table(url).await {
        Ok(Some(table)) => {
            info!(bytes = table.len(), "Scraped Mars facts table");
            Some(table)
        }
        Ok(None) => {
            warn!("Facts page carried no usable comparison table");
            None
        }
        Err(e) => {
            warn!(error = %e, "Facts page fetch failed");
            None
        }
    }
}

async fn fetch_table(url: &str) -> Result<Option<String>, Box<dyn Error>> {
    let body = get(url).await?.error_for_status()?.text().await?;
    Ok(parse_comparison_table(&body))
}

/// Re-serialize the first `<table>` in `html` with fixed column names.
///
/// Rows are read as `th`/`td` cell text. The first row is treated as the
/// source header: it must have exactly three cells (otherwise the rename is
/// meaningless and the result is `None`) and is then replaced by
/// [`COLUMNS`]. Data rows are padded or truncated to three cells; the first
/// cell becomes a `<th>` row label, the rest `<td>` values.
pub fn parse_comparison_table(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let table = document.select(&table_selector).next()?;
    let mut rows = table.select(&row_selector).map(|row| {
        row.select(&cell_selector)
            .map(|cell| element_text(&cell))
            .collect::<Vec<_>>()
    });

    let header = rows.next()?;
    if header.len() != COLUMNS.len() {
        return None;
    }

    let data: Vec<Vec<String>> = rows
        .map(|mut cells| {
            cells.resize(COLUMNS.len(), String::new());
            cells
        })
        .collect();
    if data.is_empty() {
        return None;
    }

    Some(render_fragment(&data))
}

/// Serialize data rows into the fragment shape downstream consumers expect.
fn render_fragment(rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str("<table border=\"1\" class=\"dataframe\">\n");
    out.push_str("  <thead>\n    <tr>\n");
    for column in COLUMNS {
        out.push_str(&format!("      <th>{column}</th>\n"));
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        out.push_str("    <tr>\n");
        out.push_str(&format!("      <th>{}</th>\n", escape(&row[0])));
        for cell in &row[1..] {
            out.push_str(&format!("      <td>{}</td>\n", escape(cell)));
        }
        out.push_str("    </tr>\n");
    }
    out.push_str("  </tbody>\n</table>");
    out
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
