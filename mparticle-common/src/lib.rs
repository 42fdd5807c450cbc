//! Common types and utilities shared across mparticle crates.
//!
//! This crate defines the browser launch profile, the timeout budget, the
//! error taxonomy, and observability helpers used throughout the workspace.
//! It stays dependency‑light so every crate can depend on it.
//!
//! # Overview
//!
//! - [`LaunchProfile`] and [`Viewport`]: how a browser session is started
//! - [`Timeouts`]: upper bounds for the page load and the verification wait
//! - [`observability`]: centralised tracing/logging initialisation
//! - [`ExtractError`] and [`Result`]: shared error handling
//!
//! # Examples
//!
//! ```rust
//! use mparticle_common::{LaunchProfile, Timeouts};
//!
//! let profile = LaunchProfile::default();
//! assert!(!profile.headless);
//! assert_eq!(profile.viewport.width, 1280);
//! assert_eq!(Timeouts::default().verification().as_secs(), 120);
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub mod observability;

/// Desktop user agent presented by the default launch profile.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Browser window dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Process‑wide browser setup, fixed for the lifetime of one session.
///
/// The default is a headed window so a human can clear a verification page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchProfile {
    pub viewport: Viewport,
    pub user_agent: String,
    pub headless: bool,
    /// Raw Chrome switches appended verbatim to the launch arguments.
    pub extra_launch_flags: Vec<String>,
}

impl Default for LaunchProfile {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: false,
            extra_launch_flags: vec!["--disable-blink-features=AutomationControlled".to_string()],
        }
    }
}

/// Upper bounds for the two blocking waits of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub page_load_ms: u64,
    pub verification_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            page_load_ms: 30_000,
            verification_ms: 120_000,
        }
    }
}

impl Timeouts {
    pub fn page_load(&self) -> Duration {
        Duration::from_millis(self.page_load_ms)
    }

    pub fn verification(&self) -> Duration {
        Duration::from_millis(self.verification_ms)
    }
}

/// The wait that exceeded its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PageLoad,
    Verification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PageLoad => f.write_str("page load"),
            Stage::Verification => f.write_str("verification"),
        }
    }
}

/// Failure kinds of a single extraction.
///
/// Every variant ends the run without a record; the binary maps all of them
/// to exit status 1.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    /// The argument is not an article URL; raised before any I/O.
    #[error("URL must be a WeChat article (mp.weixin.qq.com): {0}")]
    Usage(String),

    /// A bounded wait ran out.
    #[error("{stage} timed out after {}s", .after.as_secs())]
    Timeout { stage: Stage, after: Duration },

    /// The body element was absent once the page settled.
    #[error("Article content not found. The page might not be loaded correctly.")]
    ContentNotFound,

    /// The browser session or WebDriver endpoint reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// The markdown file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExtractError::Timeout { .. })
    }
}

/// Convenient alias for results that use [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_hides_automation() {
        let profile = LaunchProfile::default();
        assert_eq!(profile.viewport, Viewport { width: 1280, height: 720 });
        assert!(profile.user_agent.contains("Chrome/120"));
        assert_eq!(
            profile.extra_launch_flags,
            vec!["--disable-blink-features=AutomationControlled"]
        );
    }

    #[test]
    fn timeout_message_names_the_stage() {
        let err = ExtractError::Timeout {
            stage: Stage::Verification,
            after: Duration::from_secs(120),
        };
        assert_eq!(err.to_string(), "verification timed out after 120s");
        assert!(err.is_timeout());
        assert!(!ExtractError::ContentNotFound.is_timeout());
    }

    #[test]
    fn profile_fills_missing_fields_from_defaults() {
        let profile: LaunchProfile =
            serde_json::from_value(serde_json::json!({ "headless": true })).unwrap();
        assert!(profile.headless);
        assert_eq!(profile.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn viewport_accepts_a_single_dimension() {
        let viewport: Viewport =
            serde_json::from_value(serde_json::json!({ "width": 800 })).unwrap();
        assert_eq!(viewport, Viewport { width: 800, height: 720 });
    }
}
