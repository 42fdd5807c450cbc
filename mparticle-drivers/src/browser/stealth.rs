use mparticle_common::LaunchProfile;
use serde_json::{json, Map, Value};
use webdriver::capabilities::Capabilities;

/// Construct Chrome command‑line arguments for a launch profile.
pub fn build_launch_arguments(profile: &LaunchProfile) -> Vec<String> {
    let mut args = vec![
        "--disable-infobars".to_string(),
        "--no-first-run".to_string(),
        format!("--user-agent={}", profile.user_agent),
        format!(
            "--window-size={},{}",
            profile.viewport.width, profile.viewport.height
        ),
    ];
    args.extend(profile.extra_launch_flags.iter().cloned());
    if profile.headless {
        args.push("--headless=new".to_string());
        args.push("--disable-gpu".to_string());
    }
    args
}

/// WebDriver capabilities requesting a Chrome session shaped by `profile`.
pub fn chrome_capabilities(profile: &LaunchProfile) -> Capabilities {
    let mut chrome_opts = Map::new();
    chrome_opts.insert("args".to_string(), json!(build_launch_arguments(profile)));
    chrome_opts.insert("excludeSwitches".to_string(), json!(["enable-automation"]));

    let mut caps = Capabilities::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), Value::Object(chrome_opts));
    caps
}

/// JavaScript evasions applied after navigation to reduce automation signals.
pub struct StealthScripts;

impl StealthScripts {
    pub fn core_evasions() -> &'static str {
        r#"
            Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
            Object.defineProperty(navigator, 'languages', {
                get: () => ['zh-CN', 'zh', 'en']
            });
            if (!window.chrome) window.chrome = { runtime: {} };
        "#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mparticle_common::Viewport;

    #[test]
    fn headed_profile_has_no_headless_switch() {
        let args = build_launch_arguments(&LaunchProfile::default());
        assert!(args.contains(&"--window-size=1280,720".to_string()));
        assert!(args.contains(&"--disable-blink-features=AutomationControlled".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--user-agent=Mozilla/5.0")));
        assert!(!args.iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn headless_profile_appends_switches() {
        let profile = LaunchProfile {
            headless: true,
            viewport: Viewport {
                width: 800,
                height: 600,
            },
            extra_launch_flags: vec![],
            ..LaunchProfile::default()
        };
        let args = build_launch_arguments(&profile);
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--window-size=800,600".to_string()));
        assert!(!args.iter().any(|a| a.contains("AutomationControlled")));
    }

    #[test]
    fn capabilities_carry_chrome_options() {
        let caps = chrome_capabilities(&LaunchProfile::default());
        let opts = &caps["goog:chromeOptions"];
        assert!(opts["args"].as_array().unwrap().len() >= 5);
        assert_eq!(opts["excludeSwitches"], json!(["enable-automation"]));
    }
}
