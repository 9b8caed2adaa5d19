//! Latest-news scraper for the Red Planet Science mirror.
//!
//! The site renders its article list client-side, so the scraper drives a
//! browser session rather than fetching raw HTML. Each article sits in a
//! `div.list_text` block:
//!
//! ```text
//! <div class="list_text">
//!   <div class="content_title">...headline...</div>
//!   <div class="article_teaser_body">...teaser...</div>
//! </div>
//! ```
//!
//! Only the first block (the most recent item) is extracted.

use crate::browser::BrowserSession;
use crate::utils::{element_text, truncate_for_log};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Production listing URL.
pub const NEWS_URL: &str = "https://redplanetscience.com";

/// How long to give the client-side list to render before parsing anyway.
const LIST_WAIT: Duration = Duration::from_secs(1);

/// Scrape the most recent headline and its teaser.
///
/// Returns the pair together or not at all; any failure along the way is
/// logged and degrades to `None` rather than aborting the run.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn scrape<S: BrowserSession>(session: &mut S, url: &str) -> Option<(String, String)> {
    if let Err(e) = session.navigate(url).await {
        warn!(error = %e, "News page navigation failed");
        return None;
    }

    // Best-effort wait; parse whatever is there afterwards.
    match session.wait_for("div.list_text", LIST_WAIT).await {
        Ok(true) => {}
        Ok(false) => debug!("News list did not appear within the wait"),
        Err(e) => debug!(error = %e, "News list wait failed"),
    }

    let html = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read news page HTML");
            return None;
        }
    };

    let lead = parse_latest(&html);
    match &lead {
        Some((title, teaser)) => info!(
            title = %title,
            teaser = %truncate_for_log(teaser, 120),
            "Scraped latest news item"
        ),
        None => warn!("News page lacked the expected list structure"),
    }
    lead
}

/// Extract the first list item's title and teaser from the listing HTML.
///
/// A list item missing either sub-element yields `None` for the whole
/// pair.
pub fn parse_latest(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);
    let slide_selector = Selector::parse("div.list_text").unwrap();
    let title_selector = Selector::parse("div.content_title").unwrap();
    let teaser_selector = Selector::parse("div.article_teaser_body").unwrap();

    let slide = document.select(&slide_selector).next()?;
    let title = slide.select(&title_selector).next()?;
    let teaser = slide.select(&teaser_selector).next()?;
    Some((element_text(&title), element_text(&teaser)))
}
