//! Browser seam used by the [`Extractor`](crate::Extractor).
use anyhow::Result;
use async_trait::async_trait;
use mparticle_common::LaunchProfile;
use mparticle_drivers::{ArticleDriver, WaitOutcome};
use std::time::Duration;

/// One live browser session, exclusively owned by a single extraction.
#[async_trait]
pub trait ArticleSession: Send {
    /// Load `url`, waiting at most `limit` for the document to settle.
    async fn navigate(&mut self, url: &str, limit: Duration) -> Result<WaitOutcome>;

    /// Visible text of the whole page.
    async fn page_text(&mut self) -> Result<String>;

    async fn wait_for(&mut self, selector: &str, limit: Duration) -> Result<WaitOutcome>;

    /// Visible text of the first match, `None` when nothing matches.
    async fn text_of(&mut self, selector: &str) -> Result<Option<String>>;

    async fn inner_html_of(&mut self, selector: &str) -> Result<Option<String>>;

    /// Tear the session down. Called exactly once per session.
    async fn close(&mut self) -> Result<()>;
}

/// Produces a fresh [`ArticleSession`] per extraction.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn ArticleSession>>;
}

/// Concrete launcher backed by the fantoccini-based driver.
pub struct FantocciniLauncher {
    webdriver_url: String,
    profile: LaunchProfile,
}

impl FantocciniLauncher {
    pub fn new(webdriver_url: impl Into<String>, profile: LaunchProfile) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            profile,
        }
    }
}

#[async_trait]
impl SessionLauncher for FantocciniLauncher {
    async fn launch(&self) -> Result<Box<dyn ArticleSession>> {
        let driver = ArticleDriver::connect(&self.webdriver_url, &self.profile).await?;
        Ok(Box::new(driver))
    }
}

#[async_trait]
impl ArticleSession for ArticleDriver {
    async fn navigate(&mut self, url: &str, limit: Duration) -> Result<WaitOutcome> {
        self.goto_within(url, limit).await
    }

    async fn page_text(&mut self) -> Result<String> {
        self.body_text().await
    }

    async fn wait_for(&mut self, selector: &str, limit: Duration) -> Result<WaitOutcome> {
        self.wait_for_element(selector, limit).await
    }

    async fn text_of(&mut self, selector: &str) -> Result<Option<String>> {
        ArticleDriver::text_of(self, selector).await
    }

    async fn inner_html_of(&mut self, selector: &str) -> Result<Option<String>> {
        ArticleDriver::inner_html_of(self, selector).await
    }

    async fn close(&mut self) -> Result<()> {
        ArticleDriver::close(self).await
    }
}
