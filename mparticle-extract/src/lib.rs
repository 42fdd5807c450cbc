//! WeChat article extraction.
//!
//! - [`Extractor`]: one bounded navigate → verify → extract → persist run
//! - [`ArticleRecord`]: the extracted fields plus their markdown rendering
//! - [`session`]: the browser seam and its `fantoccini`-backed implementation
//! - [`challenge`]: detection of the anti-automation verification page
//! - [`target`]: URL prefix, selectors and markers of the article page

pub mod challenge;
pub mod extractor;
pub mod record;
pub mod render;
pub mod session;
pub mod sink;
pub mod target;

pub use extractor::{Extractor, Progress};
pub use record::{ArticleRecord, RawArticle};
pub use session::{ArticleSession, FantocciniLauncher, SessionLauncher};
pub use target::validate_article_url;
