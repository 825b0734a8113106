// Configuration Storage Service
// Reads and writes config.json, keeping timestamped backups of previous versions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::humanizer::HumanizeLevel;

const BACKUPS_KEPT: usize = 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub default_level: HumanizeLevel,
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    pub enabled: bool,
    pub http: Option<String>,
    pub https: Option<String>,
}

impl ProxyConfig {
    /// The proxy URL to route through, if one is switched on.
    pub fn active_url(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.https
            .as_deref()
            .or(self.http.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

/// Settings for the Gemini `generateContent` backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    #[serde(default = "default_temperature_cap")]
    pub temperature_cap: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: default_model(),
            base_url: None,
            temperature_cap: default_temperature_cap(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_model() -> String { "gemini-pro".to_string() }
fn default_temperature_cap() -> f64 { 1.2 }
fn default_top_p() -> f64 { 0.85 }
fn default_top_k() -> u32 { 40 }
fn default_max_output_tokens() -> u32 { 2048 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("humanizer"))
    }

    /// Store under the default directory, if the platform has one.
    pub fn open_default() -> Option<Self> {
        Self::default_config_dir().map(Self::new)
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn ensure_dir(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }

    /// Load configuration; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(&self.config_file)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));
        fs::copy(&self.config_file, &backup_file)?;

        self.cleanup_old_backups(&backup_dir, BACKUPS_KEPT)
    }

    /// Remove old backups, keeping only the most recent `keep`
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // oldest first; names embed the timestamp
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
        Ok(())
    }

    pub fn get_api_key(&self, name: &str) -> Result<Option<String>, ConfigError> {
        let config = self.load()?;
        Ok(config
            .api_keys
            .get(name)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    pub fn set_api_key(&self, name: &str, key: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.api_keys.insert(name.to_string(), key.to_string());
        self.save(&config)
    }

    pub fn delete_api_key(&self, name: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.api_keys.remove(name);
        self.save(&config)
    }

    pub fn get_remote_url(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.load()?.remote.base_url)
    }

    pub fn set_remote_url(&self, url: &str) -> Result<(), ConfigError> {
        let mut config = self.load()?;
        config.remote.base_url = Some(url.to_string());
        self.save(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("humanizer-config-{}-{}", tag, uuid::Uuid::new_v4()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_level.get(), 3);
        assert_eq!(config.remote.model, "gemini-pro");
        assert_eq!(config.remote.top_k, 40);
        assert!(!config.remote.enabled);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"defaultLevel": 5, "remote": {"enabled": true}}"#).unwrap();
        assert_eq!(parsed.default_level.get(), 5);
        assert!(parsed.remote.enabled);
        assert_eq!(parsed.remote.max_output_tokens, 2048);
        assert!((parsed.remote.top_p - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_level_is_a_parse_error() {
        assert!(serde_json::from_str::<AppConfig>(r#"{"defaultLevel": 9}"#).is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = scratch_dir("roundtrip");
        let store = ConfigStore::new(dir.clone());
        assert!(store.load().unwrap().api_keys.is_empty());

        store.set_api_key("gemini", "  secret  ").unwrap();
        assert_eq!(store.get_api_key("gemini").unwrap().as_deref(), Some("secret"));
        store.set_remote_url("http://localhost:9/v1").unwrap();
        assert_eq!(store.get_remote_url().unwrap().as_deref(), Some("http://localhost:9/v1"));

        store.delete_api_key("gemini").unwrap();
        assert!(store.get_api_key("gemini").unwrap().is_none());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_backups_are_capped() {
        let dir = scratch_dir("backups");
        let store = ConfigStore::new(dir.clone());
        for i in 0..14 {
            store.set_api_key("gemini", &format!("key-{i}")).unwrap();
        }
        let backups = fs::read_dir(dir.join("backups")).unwrap().count();
        assert!(backups >= 1 && backups <= BACKUPS_KEPT);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_corrupt_file_reports_parse_error() {
        let dir = scratch_dir("corrupt");
        let store = ConfigStore::new(dir.clone());
        store.ensure_dir().unwrap();
        fs::write(store.config_file(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_proxy_active_url() {
        let off = ProxyConfig { enabled: false, http: Some("http://p:1".into()), https: None };
        assert!(off.active_url().is_none());
        let on = ProxyConfig { enabled: true, http: Some("http://p:1".into()), https: None };
        assert_eq!(on.active_url(), Some("http://p:1"));
    }
}
