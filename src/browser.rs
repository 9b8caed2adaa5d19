//! Browser automation session for the scrape run.
//!
//! The extractors never talk to Chromium directly; they drive a
//! [`BrowserSession`], a small typed surface over the handful of side
//! effects the scrape needs (navigate, read HTML, wait, click, go back).
//! Every method returns a `Result` rather than panicking so callers can
//! degrade a single field instead of aborting the run.
//!
//! # Architecture
//!
//! - [`BrowserSession`]: the trait the extractors are written against
//! - [`ChromeSession`]: production implementation driving Chromium over the
//!   Chrome DevTools Protocol via `chromiumoxide`
//! - `fake::FakeBrowser` (tests only): in-memory implementation over canned
//!   pages
//!
//! # Click semantics
//!
//! `click` activates the nth element matching a CSS selector and is
//! followed by a short settle so in-page scripts can mutate the DOM before
//! the caller reads it back. `click_link_with_text` activates the first
//! anchor in document order whose visible text contains the given needle
//! (when several anchors match, first wins) and waits for the resulting
//! navigation instead.

use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, instrument};
use url::Url;

/// How long to pause after a click so in-page scripts can mutate the DOM.
const CLICK_SETTLE: Duration = Duration::from_millis(500);

/// Polling interval for [`BrowserSession::wait_for`].
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors surfaced by a browser session.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The browser process could not be started.
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// The navigation target is not a parseable URL.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Navigation to a URL failed.
    #[error("navigation to {url:?} failed: {message}")]
    Navigation { url: String, message: String },

    /// No element matched the selector at the requested index.
    #[error("no element matched {selector:?} at index {index}")]
    ElementNotFound { selector: String, index: usize },

    /// No anchor's visible text contained the needle.
    #[error("no link with visible text containing {text:?}")]
    LinkNotFound { text: String },

    /// Any other DevTools Protocol failure.
    #[error("browser command failed: {0}")]
    Cdp(#[from] CdpError),
}

/// The browser side effects the extractors depend on.
///
/// Mutating methods (`navigate`, `click`, `click_link_with_text`,
/// `go_back`) take `&mut self`; reads (`html`, `wait_for`) take `&self`.
pub trait BrowserSession {
    /// Navigate to an absolute URL and wait for the page to load.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Return the serialized HTML of the current page.
    async fn html(&self) -> Result<String, BrowserError>;

    /// Wait for at least one element matching `selector` to be present.
    ///
    /// Returns `Ok(true)` as soon as a match appears, `Ok(false)` if the
    /// timeout elapses first. Best-effort: callers treat `false` the same
    /// as `true` and let the subsequent parse decide.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool, BrowserError>;

    /// Click the nth element (0-based) matching a CSS selector.
    async fn click(&mut self, selector: &str, index: usize) -> Result<(), BrowserError>;

    /// Click the first anchor whose visible text contains `text`, then wait
    /// for the resulting navigation.
    async fn click_link_with_text(&mut self, text: &str) -> Result<(), BrowserError>;

    /// Navigate one step back in session history.
    ///
    /// Only meaningful after a navigation; the extractors call it solely to
    /// return from a detail page to its listing.
    async fn go_back(&mut self) -> Result<(), BrowserError>;
}

/// Production [`BrowserSession`] backed by a Chromium process.
///
/// Owns the browser, a single page, and the background task that pumps
/// DevTools Protocol events. Dropping without [`ChromeSession::close`]
/// leaves process reaping to `chromiumoxide`'s drop handling; the
/// orchestrator always closes explicitly.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    /// Launch Chromium and open a blank page.
    ///
    /// # Arguments
    ///
    /// * `headful` - run with a visible window instead of headless
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Launch`] if the configuration is rejected and
    /// [`BrowserError::Cdp`] if the process or the initial page cannot be
    /// started. This is the only failure in the whole run that is fatal.
    pub async fn launch(headful: bool) -> Result<Self, BrowserError> {
        let mut builder = BrowserConfig::builder();
        if headful {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        // If the initial page cannot be opened the process is already
        // running, so shut it down before surfacing the error.
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler_task.abort();
                return Err(e.into());
            }
        };
        info!(headful, "Browser session started");

        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Shut the browser down and reap the event-handler task.
    pub async fn close(mut self) -> Result<(), BrowserError> {
        let closed = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        closed?;
        info!("Browser session closed");
        Ok(())
    }
}

impl BrowserSession for ChromeSession {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        Url::parse(url).map_err(|source| BrowserError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        self.page.wait_for_navigation().await?;
        debug!("Page loaded");
        Ok(())
    }

    async fn html(&self) -> Result<String, BrowserError> {
        Ok(self.page.content().await?)
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool, BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            // Absence surfaces as an error from find_element; keep polling.
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                debug!(selector, ?timeout, "Element did not appear before deadline");
                return Ok(false);
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    #[instrument(level = "debug", skip_all, fields(selector, index))]
    async fn click(&mut self, selector: &str, index: usize) -> Result<(), BrowserError> {
        let elements = self.page.find_elements(selector).await?;
        let element = elements
            .get(index)
            .ok_or_else(|| BrowserError::ElementNotFound {
                selector: selector.to_string(),
                index,
            })?;
        element.click().await?;
        sleep(CLICK_SETTLE).await;
        Ok(())
    }

    #[instrument(level = "debug", skip_all, fields(text))]
    async fn click_link_with_text(&mut self, text: &str) -> Result<(), BrowserError> {
        let js = format!(
            r#"(() => {{
                const needle = '{}';
                const link = [...document.querySelectorAll('a')]
                    .find(a => (a.innerText || '').includes(needle));
                if (link) {{ link.click(); return true; }}
                return false;
            }})()"#,
            js_escape(text)
        );
        let outcome = self.page.evaluate(js).await?;
        let clicked = outcome
            .value()
            .and_then(|value| value.as_bool())
            .unwrap_or(false);
        if !clicked {
            return Err(BrowserError::LinkNotFound {
                text: text.to_string(),
            });
        }
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn go_back(&mut self) -> Result<(), BrowserError> {
        self.page.evaluate("window.history.back()").await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }
}

/// Escape a needle for embedding in a single-quoted JS string literal.
///
/// Line breaks would otherwise terminate the literal and turn the whole
/// snippet into a syntax error.
fn js_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
