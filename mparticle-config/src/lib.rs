//! Loader for runtime configuration with YAML + environment overlays.
//!
//! Every field has a default, so a run with no file and no environment
//! behaves exactly like the fixed settings of the command line tool. Sources
//! are merged in this order, later ones winning:
//!
//! 1. an optional YAML file (`MPARTICLE_CONFIG`, else `./mparticle.yaml`)
//! 2. `MPARTICLE__`-prefixed environment variables, `__` between path segments;
//!    `MPARTICLE__DRIVER__EXTRA_LAUNCH_FLAGS` takes space separated flags
//!
//! String values may reference other environment variables as `${VAR}`.
use config::{Config, ConfigError, Environment, File};
use mparticle_common::observability::{LogConfig, LogFormat};
use mparticle_common::{LaunchProfile, Timeouts};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
/// Keys whose environment value is a whitespace separated list.
const ENV_LIST_KEYS: [&str; 1] = ["driver.extra_launch_flags"];

/// Points at an explicit config file; a missing file at this path is an error.
pub const CONFIG_PATH_ENV: &str = "MPARTICLE_CONFIG";
/// Picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "mparticle.yaml";
/// Chromedriver's default listen address.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MparticleConfig {
    pub driver: DriverConfig,
    pub timeouts: Timeouts,
    pub logging: LoggingConfig,
}

/// Where the WebDriver service listens and how the browser is launched.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub webdriver_url: String,
    #[serde(flatten)]
    pub profile: LaunchProfile,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            profile: LaunchProfile::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub filter: String,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            filter: "info".to_string(),
            stderr: false,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (files + env overrides).
pub struct MparticleConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for MparticleConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MparticleConfigLoader {
    /// Start from the built-in defaults with no file attached.
    ///
    /// ```
    /// use mparticle_config::MparticleConfigLoader;
    ///
    /// let config = MparticleConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(config.driver.webdriver_url, "http://localhost:9515");
    /// assert_eq!(config.timeouts.page_load_ms, 30_000);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach the file named by `MPARTICLE_CONFIG`, or `./mparticle.yaml`
    /// when it exists.
    pub fn discover(self) -> Self {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => self.with_file(path),
            Err(_) => self.with_optional_file(DEFAULT_CONFIG_FILE),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use mparticle_config::MparticleConfigLoader;
    ///
    /// let cfg = MparticleConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// driver:
    ///   headless: true
    ///   viewport: { width: 800, height: 600 }
    /// timeouts:
    ///   verification_ms: 5000
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(cfg.driver.profile.headless);
    /// assert_eq!(cfg.driver.profile.viewport.width, 800);
    /// assert_eq!(cfg.timeouts.verification_ms, 5000);
    /// assert_eq!(cfg.timeouts.page_load_ms, 30_000);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Environment overrides are layered last so they win over any file.
    pub fn load(self) -> Result<MparticleConfig, ConfigError> {
        let env = ENV_LIST_KEYS.iter().fold(
            Environment::with_prefix("MPARTICLE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(" ")
                .try_parsing(true),
            |env, key| env.with_list_parse_key(key),
        );
        let cfg = self.builder.add_source(env).build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
