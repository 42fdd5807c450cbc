//! Driver layer for browser automation.
//!
//! This crate wraps a WebDriver session in the handful of bounded operations
//! the article extractor needs.
//!
//! - [`browser::driver::ArticleDriver`]: WebDriver client wrapper and page helpers
//! - [`browser::stealth`]: launch arguments and JS evasions
pub mod browser;

pub use browser::driver::{ArticleDriver, WaitOutcome};
