use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Poll intervals per widget, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshIntervals {
    pub time: u64,
    pub weather: u64,
    pub air_quality: u64,
    pub meeting: u64,
    pub news: u64,
    pub alerts: u64,
    pub calendar: u64,
    pub emails: u64,
    pub holidays: u64,
    pub shabbat: u64,
    pub zmanim: u64,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            time: 15,
            weather: 5 * 60,
            air_quality: 5 * 60,
            meeting: 5 * 60,
            news: 10 * 60,
            alerts: 30,
            calendar: 60,
            emails: 60,
            holidays: 6 * 60 * 60,
            shabbat: 5 * 60,
            zmanim: 60 * 60,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend serving `/api/*`, e.g. "http://dashboard.local:5000".
    pub api_base_url: String,

    pub request_timeout_secs: u64,

    /// Example TOML:
    /// [refresh]
    /// weather = 300
    pub refresh: RefreshIntervals,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,
            refresh: RefreshIntervals::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "home-dashboard", "dashboard-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!(
                "api_base_url must start with http:// or https://, got '{}'.\n\
                 Hint: run `dashboard configure` to set it.",
                self.api_base_url
            ));
        }
        let r = &self.refresh;
        let intervals = [
            r.time,
            r.weather,
            r.air_quality,
            r.meeting,
            r.news,
            r.alerts,
            r.calendar,
            r.emails,
            r.holidays,
            r.shabbat,
            r.zmanim,
        ];
        if intervals.contains(&0) {
            return Err(anyhow!("refresh intervals must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_page() {
        let cfg = Config::default();

        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.refresh.time, 15);
        assert_eq!(cfg.refresh.alerts, 30);
        assert_eq!(cfg.refresh.holidays, 6 * 60 * 60);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_base_url = "https://dash.example.org/"

            [refresh]
            weather = 120
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.refresh.weather, 120);
        assert_eq!(cfg.refresh.news, 600);
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.base_url(), "https://dash.example.org");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = Config::from_toml(r#"api_base_url = "localhost:5000""#).unwrap_err();
        assert!(err.to_string().contains("api_base_url must start with http"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::from_toml("request_timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        let err = Config::from_toml("[refresh]\nnews = 0").unwrap_err();
        assert!(err.to_string().contains("refresh intervals"));

        let err = Config::from_toml("[refresh]\nzmanim = 0").unwrap_err();
        assert!(err.to_string().contains("refresh intervals"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = Config::default();
        cfg.api_base_url = "http://10.0.0.5:8080".into();
        cfg.refresh.alerts = 10;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }
}
