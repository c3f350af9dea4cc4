//! Dashboard configuration: optional RON file, then environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use dashboard_engine::{ApiEndpoint, FetchSettings};
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH_ENV: &str = "DASHBOARD_CONFIG";
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";
pub const API_KEY_ENV: &str = "DASHBOARD_API_KEY";
pub const RESOURCE_ENV: &str = "DASHBOARD_RESOURCE";
pub const REFRESH_SECS_ENV: &str = "DASHBOARD_REFRESH_SECS";

const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_url: Option<String>,
    pub resource: String,
    pub api_key: Option<String>,
    pub refresh_secs: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
    pub highlight_categories: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_url: None,
            resource: "animal/data".to_string(),
            api_key: None,
            refresh_secs: dashboard_engine::DEFAULT_REFRESH_INTERVAL.as_secs(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            log_file: PathBuf::from("./dashboard.log"),
            highlight_categories: vec!["optimistic".to_string()],
        }
    }
}

impl DashboardConfig {
    /// Loads from `$DASHBOARD_CONFIG` or `./dashboard.ron`, then the process environment.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(explicit.as_deref(), |key| std::env::var(key).ok())
    }

    /// An explicit path must exist; without one, `./dashboard.ron` is optional.
    pub fn load_from(
        explicit_path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = match explicit_path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = ron::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        engine_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = env(API_URL_ENV) {
            self.api_url = Some(url);
        }
        if let Some(key) = env(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(resource) = env(RESOURCE_ENV) {
            self.resource = resource;
        }
        if let Some(secs) = env(REFRESH_SECS_ENV) {
            self.refresh_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{REFRESH_SECS_ENV} must be a whole number of seconds"))?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        match self.api_url.as_deref() {
            None => bail!("no API base URL configured; set {API_URL_ENV} or `api_url`"),
            Some(url) if url.trim().is_empty() => bail!("API base URL is empty"),
            Some(_) => {}
        }
        if self.refresh_secs == 0 {
            bail!("refresh interval must be at least one second");
        }
        self.log_level()?;
        Ok(())
    }

    pub fn endpoint(&self) -> anyhow::Result<ApiEndpoint> {
        let base_url = self
            .api_url
            .clone()
            .context("no API base URL configured")?;
        Ok(ApiEndpoint {
            base_url,
            resource: self.resource.clone(),
            api_key: self.api_key.clone(),
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn log_level(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("unknown log level {:?}", self.log_level))
    }
}
