//! Featured-image scraper for the JPL space images mirror.
//!
//! The full-size image is hidden behind a lightbox: the page's second
//! `<button>` (the "FULL IMAGE" control) injects an overlay containing
//! `<img class="fancybox-image" src="...">` with a site-relative path.
//! The scraper clicks that control, reads the mutated DOM, and composes
//! the absolute URL as `{base}/{src}`.

use crate::browser::BrowserSession;
use scraper::{Html, Selector};
use tracing::{info, instrument, warn};

/// Production page URL, also the base for the composed image URL.
pub const SPACE_IMAGES_URL: &str = "https://spaceimages-mars.com";

/// Which `<button>` on the page reveals the full-size image.
const FULL_IMAGE_BUTTON: usize = 1;

/// Scrape the absolute URL of the currently featured image.
///
/// A missing button, a missing overlay image, or a missing `src`
/// attribute each log a warning and degrade to `None`.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn scrape<S: BrowserSession>(session: &mut S, url: &str) -> Option<String> {
    if let Err(e) = session.navigate(url).await {
        warn!(error = %e, "Space images page navigation failed");
        return None;
    }

    if let Err(e) = session.click("button", FULL_IMAGE_BUTTON).await {
        warn!(error = %e, "Full image button missing or unclickable");
        return None;
    }

    let html = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read space images page HTML");
            return None;
        }
    };

    match parse_full_image(&html) {
        Some(relative) => {
            let absolute = format!("{url}/{relative}");
            info!(img_url = %absolute, "Scraped featured image");
            Some(absolute)
        }
        None => {
            warn!("Featured image element missing after click");
            None
        }
    }
}

/// Extract the overlay image's site-relative `src` from the page HTML.
pub fn parse_full_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let image_selector = Selector::parse("img.fancybox-image").unwrap();

    document
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}
