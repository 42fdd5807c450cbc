//! Fixed knowledge about the WeChat article page.
use mparticle_common::{ExtractError, Result};

/// Every accepted article URL starts with this.
pub const ARTICLE_URL_PREFIX: &str = "https://mp.weixin.qq.com/";

pub const TITLE_SELECTOR: &str = "#activity-name";
pub const AUTHOR_SELECTOR: &str = "#js_name";
pub const PUBLISH_TIME_SELECTOR: &str = "#publish_time";
/// Article body; also the signal that a verification page has been cleared.
pub const BODY_SELECTOR: &str = "#js_content";

/// Text shown by the verification interstitial instead of the article.
pub const CHALLENGE_MARKERS: [&str; 2] = ["环境异常", "去验证"];

/// Reject anything that is not an article URL, before any I/O happens.
pub fn validate_article_url(url: &str) -> Result<()> {
    if url.starts_with(ARTICLE_URL_PREFIX) {
        Ok(())
    } else {
        Err(ExtractError::Usage(url.to_string()))
    }
}
