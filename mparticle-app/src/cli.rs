use clap::Parser;
use mparticle_extract::validate_article_url;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: extract_article <wechat_url> [output_file.md]

Example:
  extract_article https://mp.weixin.qq.com/s/xxxxx article.md";

/// Extract a WeChat public platform article to markdown.
///
/// A visible browser window opens so a verification page, if shown, can be
/// completed by hand.
#[derive(Debug, Parser)]
#[command(name = "extract_article", version, override_usage = "extract_article <url> [output_file]")]
pub struct Cli {
    /// Article URL, starting with https://mp.weixin.qq.com/
    pub url: Option<String>,
    /// Markdown file to write; a preview is printed when omitted
    pub output: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Invocation {
    pub url: String,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub enum UsageError {
    /// Help, version, or a malformed command line as reported by clap.
    Clap(clap::Error),
    MissingUrl,
    NotAnArticle(String),
}

pub fn parse_from<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(UsageError::Clap)?;
    let url = cli.url.ok_or(UsageError::MissingUrl)?;
    if validate_article_url(&url).is_err() {
        return Err(UsageError::NotAnArticle(url));
    }
    Ok(Invocation {
        url,
        output: cli.output,
    })
}
