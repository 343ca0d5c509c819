//! Configuration file support for EDAT.
//!
//! The configuration carries user preferences, auto-save policy and the
//! project vocabulary (classes, built-in devices, categories, keypoint
//! templates) used to build a fresh [`AnnotationState`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color_utils::{generated_color, normalize_hex};
use crate::constants::{DEFAULT_AUTOSAVE_KEY, DEFAULT_HISTORY_LIMIT, DEFAULT_MOVE_THROTTLE_MS};
use crate::format::AutoSaveManager;
use crate::model::{Device, KeypointsDefinition};
use crate::state::AnnotationState;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub auto_save: AutoSaveConfig,

    /// Classes offered for new regions; the first one is the default.
    #[serde(default)]
    pub region_cls_list: Vec<String>,

    /// Built-in devices. Their category cannot be changed by the operator.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,

    /// Category definitions
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    /// Keypoint templates by id
    #[serde(default)]
    pub keypoint_definitions: BTreeMap<String, KeypointsDefinition>,
}

fn default_app_name() -> String {
    "EDAT".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Show region tags on the canvas
    #[serde(default = "default_show_tags")]
    pub show_tags: bool,

    /// Maximum number of undo steps kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Minimum spacing of processed pointer moves
    #[serde(default = "default_move_throttle_ms")]
    pub move_throttle_ms: u64,
}

fn default_show_tags() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_move_throttle_ms() -> u64 {
    DEFAULT_MOVE_THROTTLE_MS
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            show_tags: default_show_tags(),
            history_limit: default_history_limit(),
            move_throttle_ms: default_move_throttle_ms(),
        }
    }
}

/// Auto-save section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoSaveConfig {
    #[serde(default = "default_auto_save_enabled")]
    pub enabled: bool,

    /// Quiet time after the last change before saving
    #[serde(default = "default_debounce_secs")]
    pub debounce_secs: u64,

    /// Minimum time between two saves
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Key the snapshot is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_auto_save_enabled() -> bool {
    true
}

fn default_debounce_secs() -> u64 {
    AutoSaveManager::DEFAULT_DEBOUNCE_DELAY.as_secs()
}

fn default_interval_secs() -> u64 {
    AutoSaveManager::DEFAULT_SAVE_INTERVAL.as_secs()
}

fn default_storage_key() -> String {
    DEFAULT_AUTOSAVE_KEY.to_string()
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_auto_save_enabled(),
            debounce_secs: default_debounce_secs(),
            interval_secs: default_interval_secs(),
            storage_key: default_storage_key(),
        }
    }
}

impl AutoSaveConfig {
    /// Build the scheduler described by this section.
    pub fn manager(&self) -> AutoSaveManager {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::from_secs(self.debounce_secs))
            .with_save_interval(Duration::from_secs(self.interval_secs));
        manager.set_enabled(self.enabled);
        manager
    }
}

/// Built-in device definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub symbol_name: String,
    pub category: String,
}

/// Category definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Display name of the category
    pub name: String,
    /// `#RRGGBB` color; a generated one is used when missing or invalid
    #[serde(default)]
    pub color: Option<String>,
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            auto_save: AutoSaveConfig::default(),
            region_cls_list: Vec::new(),
            devices: Vec::new(),
            categories: Vec::new(),
            keypoint_definitions: BTreeMap::new(),
        }
    }

    /// Build a fresh state from this configuration.
    ///
    /// Configured devices become built-in devices. Every configured category,
    /// and every category a device refers to, is known with a color. Nothing
    /// is pending for upstream saving.
    pub fn initial_state(&self) -> AnnotationState {
        let mut state = AnnotationState::new(Vec::new());
        state.show_tags = self.preferences.show_tags;
        state.region_cls_list = self.region_cls_list.clone();
        state.keypoint_definitions = self.keypoint_definitions.clone();

        let device_categories = self.devices.iter().map(|d| (d.category.as_str(), None));
        let configured = self
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.color.as_deref()));
        for (name, color) in configured.chain(device_categories) {
            if name.is_empty() || state.categories.iter().any(|c| c == name) {
                continue;
            }
            let color = color
                .and_then(normalize_hex)
                .unwrap_or_else(|| generated_color(state.categories.len()));
            state.categories.push(name.to_string());
            state.categories_color_map.insert(name.to_string(), color);
        }

        state.device_list = self
            .devices
            .iter()
            .enumerate()
            .map(|(i, d)| Device::builtin(format!("builtin-{}", i + 1), &d.symbol_name, &d.category))
            .collect();

        log::debug!(
            "Initial state: {} devices, {} categories, {} classes",
            state.device_list.len(),
            state.categories.len(),
            state.region_cls_list.len()
        );
        state
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "edat-config.json"
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path for auto-load/save.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("edat").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("edat")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditorConfig {
        EditorConfig {
            region_cls_list: vec!["L1".to_string(), "P1".to_string()],
            devices: vec![
                DeviceConfig {
                    symbol_name: "L1".to_string(),
                    category: "Lighting".to_string(),
                },
                DeviceConfig {
                    symbol_name: "P1".to_string(),
                    category: "Power".to_string(),
                },
            ],
            categories: vec![CategoryConfig {
                name: "Lighting".to_string(),
                color: Some("#ff0".to_string()),
            }],
            ..EditorConfig::new()
        }
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.preferences.history_limit, 100);
        assert_eq!(config.preferences.move_throttle_ms, 16);
        assert_eq!(config.auto_save.debounce_secs, 5);
        assert_eq!(config.auto_save.interval_secs, 60);
        assert_eq!(config.auto_save.storage_key, "edat-autosave");
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let config = EditorConfig::from_json(r#"{"version":1,"preferences":{"log_level":"debug"}}"#)
            .expect("parse");
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert!(config.preferences.show_tags);
        assert_eq!(config.app_name, "EDAT");
        assert!(config.auto_save.enabled);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let json = r#"{"version":2}"#;
        assert!(matches!(
            EditorConfig::from_json(json),
            Err(ConfigError::VersionTooNew {
                file_version: 2,
                supported_version: 1
            })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = sample();
        let json = config.to_json().expect("serialize");
        assert_eq!(EditorConfig::from_json(&json).expect("parse"), config);
    }

    #[test]
    fn test_initial_state() {
        let state = sample().initial_state();

        assert_eq!(state.device_list.len(), 2);
        assert!(state.device_list.iter().all(|d| !d.user_defined));
        assert_eq!(state.categories, vec!["Lighting".to_string(), "Power".to_string()]);
        assert_eq!(
            state.categories_color_map.get("Lighting").map(String::as_str),
            Some("#FFFF00")
        );
        assert!(state.categories_color_map.contains_key("Power"));
        assert!(state.new_devices_to_save.is_empty());
        assert!(state.new_categories_to_save.is_empty());
        assert_eq!(state.mode, None);
        assert!(state.history.is_empty());
        assert_eq!(state.region_cls_list.len(), 2);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        let json = serde_json::to_string(&LogLevel::Trace).expect("serialize");
        assert_eq!(json, "\"trace\"");
    }

    #[test]
    fn test_disabled_auto_save() {
        let section = AutoSaveConfig {
            enabled: false,
            ..AutoSaveConfig::default()
        };
        assert!(!section.manager().is_enabled());
        assert!(AutoSaveConfig::default().manager().is_enabled());
    }
}
