use crate::render::render_markdown;
use serde::Serialize;

const DEFAULT_TITLE: &str = "Untitled";
const DEFAULT_AUTHOR: &str = "Unknown";

/// Fields as read from the page, before defaults are applied.
#[derive(Debug, Clone, Default)]
pub struct RawArticle {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_time: Option<String>,
    pub content_html: String,
    pub content_text: String,
}

/// One extracted article. Immutable once built; `markdown` is derived from
/// the other fields at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    title: String,
    author: String,
    publish_time: String,
    content_html: String,
    content_text: String,
    source_url: String,
    markdown: String,
}

impl ArticleRecord {
    pub fn new(source_url: impl Into<String>, raw: RawArticle) -> Self {
        let title = trimmed_or(raw.title, DEFAULT_TITLE);
        let author = trimmed_or(raw.author, DEFAULT_AUTHOR);
        let publish_time = trimmed_or(raw.publish_time, "");
        let source_url = source_url.into();
        let markdown = render_markdown(
            &title,
            &author,
            &publish_time,
            &source_url,
            &raw.content_text,
        );

        Self {
            title,
            author,
            publish_time,
            content_html: raw.content_html,
            content_text: raw.content_text,
            source_url,
            markdown,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Empty when the page shows no publish time.
    pub fn publish_time(&self) -> &str {
        &self.publish_time
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn content_text(&self) -> &str {
        &self.content_text
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }
}

fn trimmed_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_fall_back() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc",
            RawArticle {
                content_text: "body".into(),
                ..RawArticle::default()
            },
        );
        assert_eq!(record.title(), "Untitled");
        assert_eq!(record.author(), "Unknown");
        assert_eq!(record.publish_time(), "");
        assert!(record.markdown().starts_with("# Untitled\n\n**作者**: Unknown\n\n"));
    }

    #[test]
    fn metadata_is_trimmed_but_body_is_not() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc",
            RawArticle {
                title: Some("  Hello \n".into()),
                author: Some("\tJane ".into()),
                publish_time: Some(" 2024-01-02 ".into()),
                content_html: "<p> World </p>".into(),
                content_text: " World \n".into(),
            },
        );
        assert_eq!(record.title(), "Hello");
        assert_eq!(record.author(), "Jane");
        assert_eq!(record.publish_time(), "2024-01-02");
        assert_eq!(record.content_text(), " World \n");
        assert_eq!(record.content_html(), "<p> World </p>");
        assert!(record.markdown().ends_with("---\n\n World \n"));
    }

    #[test]
    fn whitespace_only_publish_time_omits_line() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc",
            RawArticle {
                publish_time: Some("   ".into()),
                ..RawArticle::default()
            },
        );
        assert!(!record.markdown().contains("发布时间"));
    }

    #[test]
    fn serializes_every_field() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc",
            RawArticle {
                title: Some("Hello".into()),
                content_text: "World".into(),
                ..RawArticle::default()
            },
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["source_url"], "https://mp.weixin.qq.com/s/abc");
        assert_eq!(json["markdown"], record.markdown());
    }
}
