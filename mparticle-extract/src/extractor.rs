use crate::challenge::PageState;
use crate::record::{ArticleRecord, RawArticle};
use crate::session::{ArticleSession, SessionLauncher};
use crate::sink::write_markdown;
use crate::target::{
    validate_article_url, AUTHOR_SELECTOR, BODY_SELECTOR, PUBLISH_TIME_SELECTOR, TITLE_SELECTOR,
};
use mparticle_common::{ExtractError, Result, Stage, Timeouts};
use mparticle_drivers::WaitOutcome;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Milestones reported while an extraction runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Loading { url: String },
    /// A verification page is up; a human has to clear it in the browser window.
    VerificationRequired,
    VerificationCompleted,
    Saved { path: PathBuf },
}

type ProgressHook = Box<dyn Fn(&Progress) + Send + Sync>;

/// Runs one article extraction per call, each in its own browser session.
pub struct Extractor<L> {
    launcher: L,
    timeouts: Timeouts,
    on_progress: Option<ProgressHook>,
}

impl<L: SessionLauncher> Extractor<L> {
    pub fn new(launcher: L, timeouts: Timeouts) -> Self {
        Self {
            launcher,
            timeouts,
            on_progress: None,
        }
    }

    pub fn with_progress<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Progress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(hook));
        self
    }

    /// Extract the article at `url` and, if `output` is given, write its
    /// markdown there.
    ///
    /// The URL is checked before a session is launched. The session is closed
    /// on every path once launched; nothing is written unless extraction
    /// succeeded.
    pub async fn extract(&self, url: &str, output: Option<&Path>) -> Result<ArticleRecord> {
        validate_article_url(url)?;

        let mut session = self.launcher.launch().await?;
        let outcome = self.run(session.as_mut(), url).await;
        if let Err(e) = session.close().await {
            warn!(target: "extract.session", error = %e, "failed to close browser session");
        }

        let record = match outcome {
            Ok(record) => record,
            Err(e) => {
                warn!(target: "extract.run", %url, error = %e, "extraction failed");
                return Err(e);
            }
        };

        if let Some(path) = output {
            write_markdown(path, record.markdown())?;
            info!(target: "extract.sink", path = %path.display(), bytes = record.markdown().len(), "article saved");
            self.report(Progress::Saved {
                path: path.to_path_buf(),
            });
        }

        Ok(record)
    }

    async fn run(&self, session: &mut dyn ArticleSession, url: &str) -> Result<ArticleRecord> {
        self.report(Progress::Loading {
            url: url.to_string(),
        });
        info!(target: "extract.navigate", %url, "loading article");
        if session.navigate(url, self.timeouts.page_load()).await? == WaitOutcome::TimedOut {
            return Err(ExtractError::Timeout {
                stage: Stage::PageLoad,
                after: self.timeouts.page_load(),
            });
        }

        let text = session.page_text().await?;
        if PageState::after_load(&text) == PageState::AwaitingVerification {
            info!(target: "extract.challenge", "verification page detected; waiting for article body");
            self.report(Progress::VerificationRequired);
            let limit = self.timeouts.verification();
            if session.wait_for(BODY_SELECTOR, limit).await? == WaitOutcome::TimedOut {
                return Err(ExtractError::Timeout {
                    stage: Stage::Verification,
                    after: limit,
                });
            }
            info!(target: "extract.challenge", "verification cleared");
            self.report(Progress::VerificationCompleted);
        }

        let title = session.text_of(TITLE_SELECTOR).await?;
        let author = session.text_of(AUTHOR_SELECTOR).await?;
        let publish_time = session.text_of(PUBLISH_TIME_SELECTOR).await?;

        let content_html = session
            .inner_html_of(BODY_SELECTOR)
            .await?
            .ok_or(ExtractError::ContentNotFound)?;
        let content_text = session
            .text_of(BODY_SELECTOR)
            .await?
            .ok_or(ExtractError::ContentNotFound)?;

        let record = ArticleRecord::new(
            url,
            RawArticle {
                title,
                author,
                publish_time,
                content_html,
                content_text,
            },
        );
        info!(
            target: "extract.run",
            title = record.title(),
            author = record.author(),
            chars = record.content_text().chars().count(),
            "article extracted"
        );
        Ok(record)
    }

    fn report(&self, progress: Progress) {
        if let Some(hook) = &self.on_progress {
            hook(&progress);
        }
    }
}
