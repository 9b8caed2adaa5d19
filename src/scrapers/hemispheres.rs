//! Hemisphere image scraper for the USGS astrogeology mirror.
//!
//! The listing page shows one `h3` heading per hemisphere (plus a trailing
//! navigation heading) where each heading sits inside a link to a detail
//! page. Each detail page carries a `Sample` link whose `href` is the
//! site-relative path of the full-resolution image. The scraper walks
//! listing → detail → back for every hemisphere, in listing order.

use crate::browser::BrowserSession;
use crate::models::HemisphereEntry;
use crate::utils::element_text;
use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};

/// Production listing URL. The trailing slash matters: image URLs are
/// composed by appending the detail page's relative `href` directly.
pub const HEMISPHERES_URL: &str = "https://marshemispheres.com/";

/// The fixed visible text of the full-resolution link on detail pages.
const SAMPLE_LINK_TEXT: &str = "Sample";

/// Scrape title and full-resolution image URL for every hemisphere.
///
/// Failures degrade per hemisphere: a failed click or a detail page
/// without a `Sample` link skips that entry, while a failed `go_back`
/// leaves the session in an unknown state and stops the walk. The listing
/// being unreachable yields an empty vector.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn scrape<S: BrowserSession>(session: &mut S, url: &str) -> Vec<HemisphereEntry> {
    if let Err(e) = session.navigate(url).await {
        warn!(error = %e, "Hemisphere listing navigation failed");
        return Vec::new();
    }

    let listing_html = match session.html().await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Could not read hemisphere listing HTML");
            return Vec::new();
        }
    };

    let titles = parse_titles(&listing_html);
    info!(count = titles.len(), "Found hemisphere titles");

    let mut entries = Vec::new();
    for title in titles {
        if let Err(e) = session.click_link_with_text(&title).await {
            // The session is still on the listing, so later titles can
            // proceed without going back.
            warn!(error = %e, %title, "Hemisphere link click failed");
            continue;
        }

        match session.html().await {
            Ok(detail_html) => match parse_sample_link(&detail_html) {
                Some(href) => {
                    let img_url = format!("{url}{href}");
                    debug!(%title, %img_url, "Resolved hemisphere image");
                    entries.push(HemisphereEntry { title, img_url });
                }
                None => warn!(%title, "Detail page has no Sample link"),
            },
            Err(e) => warn!(error = %e, %title, "Could not read hemisphere detail HTML"),
        }

        if let Err(e) = session.go_back().await {
            warn!(error = %e, "Could not return to hemisphere listing");
            break;
        }
    }

    info!(count = entries.len(), "Scraped hemisphere images");
    entries
}

/// Collect hemisphere titles from the listing page.
///
/// Every `h3` heading is a hemisphere title except the last, which is a
/// navigation heading on this site.
pub fn parse_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let heading_selector = Selector::parse("h3").unwrap();

    let mut titles: Vec<String> = document
        .select(&heading_selector)
        .map(|heading| element_text(&heading))
        .collect();
    titles.pop();
    titles
}

/// Extract the `href` of the first anchor whose visible text is exactly
/// `Sample`.
pub fn parse_sample_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a").unwrap();

    document
        .select(&anchor_selector)
        .find(|anchor| element_text(anchor) == SAMPLE_LINK_TEXT)
        .and_then(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;

    const LISTING: &str = r#"
        <div class="collapsible results">
          <div class="item">
            <a class="itemLink product-item" href="cerberus.html">
              <h3>Cerberus Hemisphere Enhanced</h3>
            </a>
          </div>
          <div class="item">
            <a class="itemLink product-item" href="schiaparelli.html">
              <h3>Schiaparelli Hemisphere Enhanced</h3>
            </a>
          </div>
        </div>
        <h3>Back</h3>
    "#;

    const CERBERUS: &str = r#"
        <h2 class="title">Cerberus Hemisphere Enhanced</h2>
        <div class="downloads">
          <ul>
            <li><a target="_blank" href="images/full.jpg">Sample</a></li>
            <li><a href="cerberus_enhanced.tif">Original</a></li>
          </ul>
        </div>
    "#;

    const SCHIAPARELLI: &str = r#"
        <h2 class="title">Schiaparelli Hemisphere Enhanced</h2>
        <div class="downloads">
          <ul>
            <li><a target="_blank" href="images/schiaparelli_enhanced-full.jpg">Sample</a></li>
          </ul>
        </div>
    "#;

    fn hemisphere_site() -> FakeBrowser {
        FakeBrowser::new()
            .with_page("https://hemi.test/", LISTING)
            .with_page("https://hemi.test/cerberus.html", CERBERUS)
            .with_page("https://hemi.test/schiaparelli.html", SCHIAPARELLI)
    }

    #[test]
    fn test_parse_titles_drops_trailing_heading() {
        assert_eq!(
            parse_titles(LISTING),
            vec![
                "Cerberus Hemisphere Enhanced".to_string(),
                "Schiaparelli Hemisphere Enhanced".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_titles_empty_document() {
        assert!(parse_titles("<p>nothing here</p>").is_empty());
    }

    #[test]
    fn test_parse_sample_link_requires_exact_text() {
        let html = r#"
            <a href="wrong.jpg">Sample image</a>
            <a href="images/full.jpg">Sample</a>
        "#;
        assert_eq!(parse_sample_link(html), Some("images/full.jpg".to_string()));
    }

    #[test]
    fn test_parse_sample_link_missing() {
        assert_eq!(parse_sample_link("<a href=\"x.tif\">Original</a>"), None);
    }

    #[tokio::test]
    async fn test_scrape_collects_in_listing_order() {
        let mut session = hemisphere_site();

        let entries = scrape(&mut session, "https://hemi.test/").await;
        assert_eq!(
            entries,
            vec![
                HemisphereEntry {
                    title: "Cerberus Hemisphere Enhanced".to_string(),
                    img_url: "https://hemi.test/images/full.jpg".to_string(),
                },
                HemisphereEntry {
                    title: "Schiaparelli Hemisphere Enhanced".to_string(),
                    img_url: "https://hemi.test/images/schiaparelli_enhanced-full.jpg"
                        .to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_scrape_skips_title_without_link() {
        let listing = r#"
            <a class="itemLink product-item" href="cerberus.html">
              <h3>Cerberus Hemisphere Enhanced</h3>
            </a>
            <h3>Ghost Hemisphere</h3>
            <a class="itemLink product-item" href="schiaparelli.html">
              <h3>Schiaparelli Hemisphere Enhanced</h3>
            </a>
            <h3>Back</h3>
        "#;
        let mut session = FakeBrowser::new()
            .with_page("https://hemi.test/", listing)
            .with_page("https://hemi.test/cerberus.html", CERBERUS)
            .with_page("https://hemi.test/schiaparelli.html", SCHIAPARELLI);

        let entries = scrape(&mut session, "https://hemi.test/").await;
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Cerberus Hemisphere Enhanced",
                "Schiaparelli Hemisphere Enhanced"
            ]
        );
    }

    #[tokio::test]
    async fn test_scrape_detail_without_sample_is_skipped() {
        let mut session = hemisphere_site().with_page(
            "https://hemi.test/cerberus.html",
            "<h2>Cerberus Hemisphere Enhanced</h2><a href=\"x.tif\">Original</a>",
        );

        let entries = scrape(&mut session, "https://hemi.test/").await;
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Schiaparelli Hemisphere Enhanced"]);
    }

    #[tokio::test]
    async fn test_scrape_stops_when_back_navigation_fails() {
        // The first detail page is scraped, then the failed return to the
        // listing stops the walk; the second title is never visited.
        let mut session = hemisphere_site().with_go_back_failure();

        let entries = scrape(&mut session, "https://hemi.test/").await;
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Cerberus Hemisphere Enhanced"]);
    }

    #[tokio::test]
    async fn test_scrape_unreachable_listing_is_empty() {
        let mut session = FakeBrowser::new();
        assert!(scrape(&mut session, "https://hemi.test/").await.is_empty());
    }
}
