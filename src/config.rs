//! Configuration for toolhub.
//!
//! Loaded from --config, ./toolhub.yml or ~/.config/toolhub/toolhub.yml.
//! The backend URL can be overridden by `TOOLHUB_BACKEND_URL` and by
//! `--backend-url`, in that order of precedence.

use eyre::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::endpoint_url;
use crate::backend::http::{DEFAULT_USER_AGENT, HttpOptions};

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured backend URL.
pub const BACKEND_URL_ENV: &str = "TOOLHUB_BACKEND_URL";

const CONFIG_FILE: &str = "toolhub.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the tools backend.
    #[serde(rename = "backend-url")]
    pub backend_url: String,

    /// Log level when RUST_LOG is not set (off, error, warn, info, debug, trace).
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    pub http: HttpConfig,

    pub tui: TuiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_level: None,
            http: HttpConfig::default(),
            tui: TuiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout; unset waits indefinitely.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// UI tick rate in milliseconds.
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Config {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. toolhub.yml in current directory
    /// 3. ~/.config/toolhub/toolhub.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_config = PathBuf::from(CONFIG_FILE);
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from {}", CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", CONFIG_FILE, e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("toolhub").join(CONFIG_FILE);
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Apply the environment and command-line backend URL overrides.
    ///
    /// `cli` wins over `env`, which wins over the file value.
    pub fn with_backend_override(mut self, env: Option<String>, cli: Option<&str>) -> Self {
        if let Some(url) = env.filter(|u| !u.is_empty()) {
            log::debug!("Backend URL from {}: {}", BACKEND_URL_ENV, url);
            self.backend_url = url;
        }
        if let Some(url) = cli {
            log::debug!("Backend URL from command line: {}", url);
            self.backend_url = url.to_string();
        }
        self
    }

    /// Read `TOOLHUB_BACKEND_URL` from the process environment.
    pub fn backend_url_from_env() -> Option<String> {
        std::env::var(BACKEND_URL_ENV).ok()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.backend_url.trim().is_empty() {
            eyre::bail!("backend-url must not be empty");
        }
        endpoint_url(&self.backend_url, "/", &[]).context(format!("backend-url '{}' is invalid", self.backend_url))?;
        if self.tui.tick_rate_ms == 0 {
            eyre::bail!("tui.tick-rate-ms must be > 0");
        }
        if let Some(level) = self.log_level.as_deref().filter(|l| l.parse::<LevelFilter>().is_err()) {
            eyre::bail!("log-level '{}' is not a log level", level);
        }
        if self.http.timeout_ms == Some(0) {
            eyre::bail!("http.timeout-ms must be > 0 when set");
        }
        Ok(())
    }

    /// HTTP client options derived from the `http` section.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: self.http.timeout_ms.map(Duration::from_millis),
            user_agent: self.http.user_agent.clone(),
        }
    }

    /// Most verbose level to emit: `--verbose` forces debug, otherwise
    /// `log-level`, otherwise info.
    pub fn level_filter(&self, verbose: bool) -> LevelFilter {
        if verbose {
            return LevelFilter::Debug;
        }
        self.log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }
}
