use std::process::Command;
use tempfile::TempDir;

fn extract_article() -> Command {
    Command::new(env!("CARGO_BIN_EXE_extract_article"))
}

#[test]
fn missing_url_prints_usage_and_exits_1() {
    let output = extract_article().output().expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: extract_article <wechat_url>"));
}

#[test]
fn foreign_url_exits_1_without_writing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out.md");

    let output = extract_article()
        .arg("https://example.com/s/abc123")
        .arg(&out)
        .env("MPARTICLE_LOG_DIR", tmp.path().join("logs"))
        .output()
        .expect("run binary");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("mp.weixin.qq.com"));
    assert!(!out.exists());
    assert!(!tmp.path().join("logs").exists(), "rejected before any I/O");
}

#[test]
fn help_exits_0() {
    let output = extract_article().arg("--help").output().expect("run binary");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("extract_article"));
}
