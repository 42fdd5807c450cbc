//! Markdown rendering of an article.

/// Render the article template.
///
/// ```text
/// # {title}
///
/// **作者**: {author}
///
/// **发布时间**: {publish_time}     <- omitted when empty
///
/// **原文链接**: {source_url}
///
/// ---
///
/// {content_text}
/// ```
pub fn render_markdown(
    title: &str,
    author: &str,
    publish_time: &str,
    source_url: &str,
    content_text: &str,
) -> String {
    let mut markdown = format!("# {title}\n\n");
    markdown.push_str(&format!("**作者**: {author}\n\n"));
    if !publish_time.is_empty() {
        markdown.push_str(&format!("**发布时间**: {publish_time}\n\n"));
    }
    markdown.push_str(&format!("**原文链接**: {source_url}\n\n"));
    markdown.push_str("---\n\n");
    markdown.push_str(content_text);
    markdown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_full_template() {
        let md = render_markdown(
            "标题",
            "作者名",
            "2024-03-01 08:00",
            "https://mp.weixin.qq.com/s/xyz",
            "第一段\n第二段",
        );
        assert_eq!(
            md,
            "# 标题\n\n**作者**: 作者名\n\n**发布时间**: 2024-03-01 08:00\n\n\
             **原文链接**: https://mp.weixin.qq.com/s/xyz\n\n---\n\n第一段\n第二段"
        );
    }

    #[test]
    fn omits_empty_publish_time() {
        let md = render_markdown("Hello", "Jane", "", "https://mp.weixin.qq.com/s/abc123", "World");
        assert!(!md.contains("发布时间"));
        assert_eq!(
            md,
            "# Hello\n\n**作者**: Jane\n\n**原文链接**: https://mp.weixin.qq.com/s/abc123\n\n---\n\nWorld"
        );
    }

    #[test]
    fn body_is_kept_verbatim() {
        let body = "  leading space\n\n- not a list item?\n# nor a heading\n";
        let md = render_markdown("t", "a", "", "u", body);
        assert!(md.ends_with(body));
    }
}
