use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, path: default_store_path() }
    }
}

fn default_store_path() -> PathBuf { PathBuf::from("data/store.json") }

/// Holiday calendar for the operative year. Absences dated on one of
/// these days are rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub year: i32,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { year: 2026, holidays: portuguese_holidays_2026() }
    }
}

/// National holidays in Portugal for 2026 (Easter falls on April 5th).
fn portuguese_holidays_2026() -> Vec<NaiveDate> {
    [
        (1, 1),
        (4, 3),
        (4, 5),
        (4, 25),
        (5, 1),
        (6, 4),
        (6, 10),
        (8, 15),
        (10, 5),
        (11, 1),
        (12, 1),
        (12, 8),
        (12, 25),
    ]
    .into_iter()
    .filter_map(|(m, d)| NaiveDate::from_ymd_opt(2026, m, d))
    .collect()
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file when present; otherwise defaults with `SERVER_HOST` /
    /// `SERVER_PORT` taken from the environment. A file that exists but does
    /// not parse or validate is an error.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path();
        if std::path::Path::new(&path).exists() {
            return Self::load_and_validate(&path);
        }
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Parse `path` and normalize the result.
    pub fn load_and_validate(path: &str) -> Result<Self> {
        let mut cfg = load_from_file(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        self.calendar.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(anyhow!("storage.path is required for the file backend"));
        }
        Ok(())
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(stray) = self.holidays.iter().find(|d| d.year() != self.year) {
            return Err(anyhow!("calendar.holidays contains {stray}, outside calendar.year {}", self.year));
        }
        Ok(())
    }
}
