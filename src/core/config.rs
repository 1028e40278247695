use crate::core::cache::CacheTtl;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const ECB_DAILY_FEED_URI: &str =
    "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EcbConfig {
    #[serde(default = "default_feed_uri")]
    pub feed_uri: String,
}

fn default_feed_uri() -> String {
    ECB_DAILY_FEED_URI.to_string()
}

impl Default for EcbConfig {
    fn default() -> Self {
        EcbConfig {
            feed_uri: default_feed_uri(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[serde(rename = "none")]
    Disabled,
    Memory,
    #[default]
    Disk,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    pub ttl_seconds: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub prefix: Option<String>,
}

impl CacheConfig {
    /// A fixed expiry wins over a relative one.
    pub fn ttl(&self) -> CacheTtl {
        match (self.expires_at, self.ttl_seconds) {
            (Some(at), _) => CacheTtl::At(at),
            (None, Some(seconds)) => CacheTtl::After(Duration::from_secs(seconds)),
            (None, None) => CacheTtl::Default,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ecb: EcbConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("eu", "eurofx", "eurofx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("eu", "eurofx", "eurofx")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
ecb:
  feed_uri: "http://example.com/eurofxref-daily.xml"
cache:
  backend: memory
  ttl_seconds: 1337
  prefix: "my-app"
data_path: "/tmp/eurofx"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.ecb.feed_uri, "http://example.com/eurofxref-daily.xml");
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.prefix.as_deref(), Some("my-app"));
        assert_eq!(
            config.cache.ttl(),
            CacheTtl::After(Duration::from_secs(1337))
        );
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/eurofx")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.ecb.feed_uri, ECB_DAILY_FEED_URI);
        assert_eq!(config.cache.backend, CacheBackend::Disk);
        assert_eq!(config.cache.ttl(), CacheTtl::Default);
        assert!(config.cache.prefix.is_none());
    }

    #[test]
    fn test_disabled_cache_and_fixed_expiry() {
        let yaml_str = r#"
cache:
  backend: none
  ttl_seconds: 60
  expires_at: "2030-01-01T00:00:00Z"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Disabled);
        assert_eq!(
            config.cache.ttl(),
            CacheTtl::At(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "cache:\n  backend: disk\n")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.cache.backend, CacheBackend::Disk);

        fs::write(file.path(), "cache: [not, a, map]")?;
        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
