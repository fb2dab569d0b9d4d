use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Client-identifying token sent to every upstream; Nominatim's usage policy
/// requires one.
pub const DEFAULT_USER_AGENT: &str = concat!("envscan/", env!("CARGO_PKG_VERSION"));

/// Upstream service locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub air_quality_url: String,
    /// Air-quality model domain, e.g. "cams_global" or "cams_europe".
    pub air_quality_domain: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: "https://nominatim.openstreetmap.org/search".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            air_quality_url: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            air_quality_domain: "cams_global".to_string(),
        }
    }
}

/// Per-request timeouts, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub geocode_secs: u64,
    pub fetch_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { geocode_secs: 10, fetch_secs: 15 }
    }
}

impl Timeouts {
    pub fn geocode(&self) -> Duration {
        Duration::from_secs(self.geocode_secs)
    }

    pub fn fetch(&self) -> Duration {
        Duration::from_secs(self.fetch_secs)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// user_agent = "envscan/0.1.0"
/// bind = "127.0.0.1:5000"
///
/// [endpoints]
/// air_quality_domain = "cams_europe"
///
/// [timeouts]
/// fetch_secs = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    /// Listen address of the web front end.
    pub bind: String,
    pub endpoints: Endpoints,
    pub timeouts: Timeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bind: "127.0.0.1:5000".to_string(),
            endpoints: Endpoints::default(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
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

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "envscan", "envscan")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.user_agent.trim().is_empty() {
            return Err(anyhow!(
                "user_agent must not be empty; the geocoding service rejects anonymous clients."
            ));
        }
        if self.timeouts.geocode_secs == 0 || self.timeouts.fetch_secs == 0 {
            return Err(anyhow!("timeouts must be at least one second"));
        }
        Ok(())
    }
}
