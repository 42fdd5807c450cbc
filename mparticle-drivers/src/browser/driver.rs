use crate::browser::stealth::{chrome_capabilities, StealthScripts};
use anyhow::Result;
use fantoccini::error::{CmdError, ErrorStatus};
use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder, Locator};
use mparticle_common::LaunchProfile;
use std::time::Duration;
use tracing::{debug, info, warn};

const BODY_TEXT_SCRIPT: &str = "return document.body ? document.body.innerText : '';";

/// Result of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Found,
    TimedOut,
}

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct ArticleDriver {
    pub client: Client,
}

impl ArticleDriver {
    /// Open a new browser session on the WebDriver service at `webdriver_url`
    /// (Chromedriver listens on `http://localhost:9515` by default).
    pub async fn connect(webdriver_url: &str, profile: &LaunchProfile) -> Result<Self> {
        info!(
            target: "browser.session",
            %webdriver_url,
            headless = profile.headless,
            "starting browser session"
        );
        let client = ClientBuilder::native()
            .capabilities(chrome_capabilities(profile))
            .connect(webdriver_url)
            .await?;
        Ok(Self { client })
    }

    /// Navigate to `url`, waiting for the document load within `limit`.
    ///
    /// The bound is applied both as the WebDriver page-load timeout and as an
    /// outer timer, whichever trips first.
    pub async fn goto_within(&self, url: &str, limit: Duration) -> Result<WaitOutcome> {
        self.client
            .update_timeouts(TimeoutConfiguration::new(None, Some(limit), None))
            .await?;

        match tokio::time::timeout(limit, self.client.goto(url)).await {
            Err(_) => Ok(WaitOutcome::TimedOut),
            Ok(Err(e)) if is_page_load_timeout(&e) => Ok(WaitOutcome::TimedOut),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(())) => {
                let evasion = self
                    .client
                    .execute(StealthScripts::core_evasions(), vec![])
                    .await;
                Ok(loaded_despite(evasion))
            }
        }
    }

    /// Visible text of the document body, empty if there is no body yet.
    pub async fn body_text(&self) -> Result<String> {
        let value = self.client.execute(BODY_TEXT_SCRIPT, vec![]).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Block until an element matching `selector` exists, for at most `limit`.
    pub async fn wait_for_element(&self, selector: &str, limit: Duration) -> Result<WaitOutcome> {
        debug!(target: "browser.wait", %selector, limit_ms = limit.as_millis() as u64, "waiting for element");
        match self
            .client
            .wait()
            .at_most(limit)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(WaitOutcome::Found),
            Err(CmdError::WaitTimeout) => Ok(WaitOutcome::TimedOut),
            Err(e) => Err(e.into()),
        }
    }

    /// Visible text of the first element matching `selector`, if any.
    pub async fn text_of(&self, selector: &str) -> Result<Option<String>> {
        let found = self.client.find_all(Locator::Css(selector)).await?;
        match found.into_iter().next() {
            Some(element) => Ok(Some(element.text().await?)),
            None => Ok(None),
        }
    }

    /// Inner HTML of the first element matching `selector`, if any.
    pub async fn inner_html_of(&self, selector: &str) -> Result<Option<String>> {
        let found = self.client.find_all(Locator::Css(selector)).await?;
        match found.into_iter().next() {
            Some(element) => Ok(Some(element.html(true).await?)),
            None => Ok(None),
        }
    }

    /// Close the underlying browser session.
    pub async fn close(&self) -> Result<()> {
        self.client.clone().close().await?;
        info!(target: "browser.session", "browser session closed");
        Ok(())
    }
}

/// WebDriver reports an exceeded page-load timeout as a `timeout` status.
fn is_page_load_timeout(err: &CmdError) -> bool {
    matches!(err, CmdError::Standard(e) if matches!(e.error, ErrorStatus::Timeout))
}

/// The page is loaded whether or not the evasion script ran.
fn loaded_despite(evasion: std::result::Result<serde_json::Value, CmdError>) -> WaitOutcome {
    if let Err(e) = evasion {
        warn!(target: "browser.stealth", error = %e, "evasion script failed; continuing");
    }
    WaitOutcome::Found
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantoccini::error::WebDriver;

    fn standard(status: ErrorStatus) -> CmdError {
        CmdError::Standard(WebDriver::new(status, "reported by chromedriver"))
    }

    #[test]
    fn timeout_status_counts_as_page_load_timeout() {
        assert!(is_page_load_timeout(&standard(ErrorStatus::Timeout)));
    }

    #[test]
    fn other_failures_are_not_timeouts() {
        assert!(!is_page_load_timeout(&standard(ErrorStatus::NoSuchElement)));
        assert!(!is_page_load_timeout(&standard(ErrorStatus::UnknownError)));
        assert!(!is_page_load_timeout(&CmdError::WaitTimeout));
    }

    #[test]
    fn failed_evasion_keeps_the_load() {
        let evasion = Err(standard(ErrorStatus::JavascriptError));
        assert_eq!(loaded_despite(evasion), WaitOutcome::Found);
        assert_eq!(
            loaded_despite(Ok(serde_json::Value::Null)),
            WaitOutcome::Found
        );
    }
}
