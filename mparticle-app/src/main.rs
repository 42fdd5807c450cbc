use clap::error::ErrorKind;
use cli::{UsageError, USAGE};
use mparticle_common::observability::init_logging;
use mparticle_config::MparticleConfigLoader;
use mparticle_extract::{Extractor, FantocciniLauncher, Progress};
use report::{preview, summary, PREVIEW_CHARS};
use std::process::ExitCode;
use tracing::{error, info};

mod cli;
mod report;

#[tokio::main]
async fn main() -> ExitCode {
    // 1) Arguments are checked before any I/O
    let invocation = match cli::parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(UsageError::Clap(e)) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
        Err(UsageError::MissingUrl) => {
            println!("{USAGE}");
            return ExitCode::from(1);
        }
        Err(UsageError::NotAnArticle(_)) => {
            println!("❌ Error: URL must be a WeChat article (mp.weixin.qq.com)");
            return ExitCode::from(1);
        }
    };

    // 2) Config (env wins over file)
    let config = match MparticleConfigLoader::new().discover().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: invalid configuration: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_logging(config.logging.to_log_config("mparticle")) {
        eprintln!("warning: logging disabled: {e}");
    }
    info!(url = %invocation.url, output = ?invocation.output, "extract_article starting");

    let launcher = FantocciniLauncher::new(
        config.driver.webdriver_url.clone(),
        config.driver.profile.clone(),
    );
    let extractor = Extractor::new(launcher, config.timeouts).with_progress(print_progress);

    match extractor
        .extract(&invocation.url, invocation.output.as_deref())
        .await
    {
        Ok(record) => {
            println!("\n{}", summary(&record));
            if invocation.output.is_none() {
                println!("\nContent preview:");
                println!("{}", preview(record.content_text(), PREVIEW_CHARS));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "extract_article failed");
            if e.is_timeout() {
                println!(
                    "\n❌ Timeout: Page took too long to load or verification was not completed ({e})."
                );
            } else {
                println!("\n❌ Error: {e}");
            }
            ExitCode::from(1)
        }
    }
}

fn print_progress(progress: &Progress) {
    match progress {
        Progress::Loading { url } => println!("Loading URL: {url}"),
        Progress::VerificationRequired => {
            println!("\n⚠️  Verification required. Please complete the verification in the browser window.");
            println!("Waiting for verification to complete...");
        }
        Progress::VerificationCompleted => println!("✅ Verification completed!"),
        Progress::Saved { path } => println!("\n✅ Article saved to: {}", path.display()),
    }
}
