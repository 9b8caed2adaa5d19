//! Site scrapers and the run orchestrator for the Mars mirror sites.
//!
//! Each target site gets its own submodule, split into a navigation-level
//! `scrape` operation and pure parse helpers that work on plain HTML
//! strings so they can be tested against inline fixtures.
//!
//! # Target Sites
//!
//! | Site | Module | Method | Yields |
//! |------|--------|--------|--------|
//! | Red Planet Science | [`news`] | browser | latest article title + teaser |
//! | Space Images Mars | [`featured_image`] | browser | full-size featured image URL |
//! | Galaxy Facts Mars | [`facts`] | plain HTTP | Mars/Earth comparison table fragment |
//! | Mars Hemispheres | [`hemispheres`] | browser | title + image URL per hemisphere |
//!
//! # Common Patterns
//!
//! - One fixed production URL per site, overridable through [`ScrapeTargets`]
//! - Graceful degradation: extractor failures are logged and leave the
//!   corresponding record field absent; the run itself never fails
//! - Browser work goes through the [`BrowserSession`] seam so extractors
//!   can run against canned pages in tests

pub mod facts;
pub mod featured_image;
pub mod hemispheres;
pub mod news;

use crate::browser::{BrowserError, BrowserSession, ChromeSession};
use crate::models::ScrapeResult;
use chrono::Local;
use tracing::{info, instrument, warn};

/// The URLs a run scrapes, one per extractor.
#[derive(Debug, Clone)]
pub struct ScrapeTargets {
    pub news: String,
    pub featured_image: String,
    pub facts: String,
    pub hemispheres: String,
}

impl Default for ScrapeTargets {
    fn default() -> Self {
        Self {
            news: news::NEWS_URL.to_string(),
            featured_image: featured_image::SPACE_IMAGES_URL.to_string(),
            facts: facts::FACTS_URL.to_string(),
            hemispheres: hemispheres::HEMISPHERES_URL.to_string(),
        }
    }
}

/// Run one full scrape: launch Chromium, collect every section, close the
/// browser.
///
/// Only the browser launch can fail the run; extractor failures degrade
/// their own sections instead. The session is closed unconditionally once
/// the record is assembled, and a close failure is logged rather than
/// propagated.
#[instrument(level = "info", skip_all)]
pub async fn scrape_all(headful: bool) -> Result<ScrapeResult, BrowserError> {
    let mut session = ChromeSession::launch(headful).await?;
    let result = run_with_session(&mut session, &ScrapeTargets::default()).await;
    if let Err(e) = session.close().await {
        warn!(error = %e, "Browser session did not close cleanly");
    }
    Ok(result)
}

/// Collect every section into a [`ScrapeResult`] using an already-running
/// session.
///
/// Extractors run sequentially in a fixed order, sharing the session; the
/// record is always produced, with failed sections left absent.
#[instrument(level = "info", skip_all)]
pub async fn run_with_session<S: BrowserSession>(
    session: &mut S,
    targets: &ScrapeTargets,
) -> ScrapeResult {
    let (news_title, news_paragraph) = news::scrape(session, &targets.news).await.unzip();
    let featured_image = featured_image::scrape(session, &targets.featured_image).await;
    let facts = facts::scrape(&targets.facts).await;
    let hemispheres = hemispheres::scrape(session, &targets.hemispheres).await;

    let result = ScrapeResult {
        news_title,
        news_paragraph,
        featured_image,
        facts,
        hemispheres,
        last_modified: Local::now(),
    };
    info!(
        sections = result.populated_sections(),
        hemispheres = result.hemispheres.len(),
        "Assembled scrape result"
    );
    result
}
