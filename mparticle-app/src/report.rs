use mparticle_extract::ArticleRecord;

pub const PREVIEW_CHARS: usize = 500;

/// Title/author/publish-time block printed after a successful run.
pub fn summary(record: &ArticleRecord) -> String {
    let rule = "=".repeat(60);
    let mut out = format!("{rule}\nTitle: {}\nAuthor: {}\n", record.title(), record.author());
    if !record.publish_time().is_empty() {
        out.push_str(&format!("Published: {}\n", record.publish_time()));
    }
    out.push_str(&rule);
    out
}

/// First `limit` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mparticle_extract::RawArticle;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(preview("World", PREVIEW_CHARS), "World");
        assert_eq!(preview("", PREVIEW_CHARS), "");
    }

    #[test]
    fn exactly_at_limit_is_not_cut() {
        let text = "字".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&text, PREVIEW_CHARS), text);
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let text = "字".repeat(PREVIEW_CHARS + 10);
        let out = preview(&text, PREVIEW_CHARS);
        assert!(out.ends_with("..."));
        assert_eq!(out.trim_end_matches("...").chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn summary_omits_missing_publish_time() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc123",
            RawArticle {
                title: Some("Hello".into()),
                author: Some("Jane".into()),
                content_text: "World".into(),
                ..RawArticle::default()
            },
        );
        let out = summary(&record);
        assert!(out.contains("Title: Hello\nAuthor: Jane\n"));
        assert!(!out.contains("Published:"));
        assert!(out.starts_with(&"=".repeat(60)));
    }

    #[test]
    fn summary_includes_publish_time() {
        let record = ArticleRecord::new(
            "https://mp.weixin.qq.com/s/abc123",
            RawArticle {
                publish_time: Some("2024-05-20".into()),
                ..RawArticle::default()
            },
        );
        assert!(summary(&record).contains("Published: 2024-05-20\n"));
    }
}
