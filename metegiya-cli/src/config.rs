//! Shell configuration.
//!
//! Loaded from `<config_dir>/metegiya/config.toml`, created with defaults
//! on first run. Everything the core components take as injected
//! parameters (data directory, geolocation provider, simulated download
//! delay, connectivity probe) is decided here.

use anyhow::{Context, Result};
use metegiya_core::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shell configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Storage paths
    #[serde(default)]
    pub storage: StorageConfig,

    /// Geolocation provider settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Map pack settings
    #[serde(default)]
    pub maps: MapsConfig,

    /// Connectivity probe settings
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Interface language at startup. A `--locale` flag overrides it for
    /// one invocation without being written back.
    #[serde(default)]
    pub default_locale: Locale,
}

/// Storage paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted preference files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Which geolocation provider resolves the device position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationProviderKind {
    /// Coarse position from an IP-geolocation HTTP service
    #[default]
    Ip,
    /// A constant position from `fixed_latitude`/`fixed_longitude`
    Fixed,
}

/// Geolocation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: LocationProviderKind,

    /// IP-geolocation endpoint
    #[serde(default = "default_location_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,

    /// Latitude for the fixed provider
    #[serde(default)]
    pub fixed_latitude: Option<f64>,

    /// Longitude for the fixed provider
    #[serde(default)]
    pub fixed_longitude: Option<f64>,
}

/// Map pack configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Simulated download duration in seconds
    #[serde(default = "default_download_delay")]
    pub download_delay_secs: u64,
}

/// Connectivity probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// Address the TCP probe connects to
    #[serde(default = "default_probe_addr")]
    pub probe_addr: SocketAddr,

    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Interval between probes in seconds
    #[serde(default = "default_probe_interval")]
    pub probe_interval_secs: u64,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join("metegiya")
}

fn default_location_endpoint() -> String {
    metegiya_core::IpLocationProvider::DEFAULT_ENDPOINT.to_string()
}

fn default_location_timeout() -> u64 {
    10
}

fn default_download_delay() -> u64 {
    3
}

fn default_probe_addr() -> SocketAddr {
    "1.1.1.1:53".parse().expect("valid probe address")
}

fn default_probe_timeout() -> u64 {
    3
}

fn default_probe_interval() -> u64 {
    15
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationProviderKind::Ip,
            endpoint: default_location_endpoint(),
            timeout_secs: default_location_timeout(),
            fixed_latitude: None,
            fixed_longitude: None,
        }
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            download_delay_secs: default_download_delay(),
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: default_probe_addr(),
            probe_timeout_secs: default_probe_timeout(),
            probe_interval_secs: default_probe_interval(),
        }
    }
}

impl LocationConfig {
    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl MapsConfig {
    /// Simulated download delay as Duration
    pub fn download_delay(&self) -> Duration {
        Duration::from_secs(self.download_delay_secs)
    }
}

impl ConnectivityConfig {
    /// Probe timeout as Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Probe interval as Duration
    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs)
    }
}

impl Config {
    /// Default configuration file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("metegiya")
            .join("config.toml")
    }

    /// Load configuration from `path` (or the default location), creating
    /// a default file if none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.storage.data_dir).context("Failed to create data directory")?;
        Ok(())
    }

    /// Fixed position from configuration, if the fixed provider is usable.
    pub fn fixed_position(&self) -> Option<metegiya_core::Position> {
        match (self.location.fixed_latitude, self.location.fixed_longitude) {
            (Some(lat), Some(lon)) => Some(metegiya_core::Position::new(lat, lon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_locale, Locale::Amharic);
        assert_eq!(config.location.provider, LocationProviderKind::Ip);
        assert_eq!(config.location.timeout_secs, 10);
        assert_eq!(config.maps.download_delay_secs, 3);
        assert_eq!(config.connectivity.probe_interval_secs, 15);
        assert!(config.fixed_position().is_none());
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            parsed.general.default_locale,
            config.general.default_locale
        );
        assert_eq!(parsed.location.endpoint, config.location.endpoint);
        assert_eq!(parsed.connectivity.probe_addr, config.connectivity.probe_addr);
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let parsed: Config = toml::from_str("[general]\ndefault_locale = \"om\"\n").unwrap();
        assert_eq!(parsed.general.default_locale, Locale::Oromo);
        assert_eq!(parsed.maps.download_delay_secs, 3);
        assert_eq!(parsed.location.provider, LocationProviderKind::Ip);
    }

    #[test]
    fn test_fixed_provider_parsing() {
        let parsed: Config = toml::from_str(
            "[location]\nprovider = \"fixed\"\nfixed_latitude = 25.2048\nfixed_longitude = 55.2708\n",
        )
        .unwrap();
        assert_eq!(parsed.location.provider, LocationProviderKind::Fixed);
        assert_eq!(
            parsed.fixed_position(),
            Some(metegiya_core::Position::new(25.2048, 55.2708))
        );
    }

    #[test]
    fn test_duration_helpers() {
        let config = Config::default();
        assert_eq!(config.location.timeout(), Duration::from_secs(10));
        assert_eq!(config.maps.download_delay(), Duration::from_secs(3));
        assert_eq!(config.connectivity.probe_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.maps.download_delay_secs, 3);

        // Second load reads the file back.
        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.location.endpoint, config.location.endpoint);
    }
}
