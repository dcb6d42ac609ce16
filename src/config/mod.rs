use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use toml::map::Entry;
use tracing::warn;

use crate::wm::{PanelPosition, PanelVisibility};

/// Top-level configuration: shared appearance plus one entry per panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub panels: Vec<PanelEntry>,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Default for Config {
    fn default() -> Self {
        Self {
            appearance: AppearanceConfig::default(),
            panels: vec![PanelEntry::default()],
        }
    }
}

impl Config {
    pub fn with<R>(f: impl FnOnce(&Config) -> R) -> R {
        let config = CONFIG.get_or_init(Config::init);
        f(config)
    }

    fn init() -> Self {
        let mut merged =
            toml::Value::try_from(Self::default()).expect("default config is always valid toml");

        let mut found_any_config = false;

        // Load config files in order of priority (lowest to highest)
        // 1. System config
        if let Some(system_config) = get_system_config_path() {
            if let Ok(content) = std::fs::read_to_string(&system_config) {
                match content.parse::<toml::Value>() {
                    Ok(value) => {
                        merge_value(&mut merged, value);
                        found_any_config = true;
                        tracing::info!("Loaded system config from {}", system_config.display());
                    }
                    Err(err) => warn!("Failed to parse {}: {err}", system_config.display()),
                }
            }
        }

        // 2. User config (XDG)
        if let Some(user_config) = get_user_config_path() {
            if let Ok(content) = std::fs::read_to_string(&user_config) {
                match content.parse::<toml::Value>() {
                    Ok(value) => {
                        merge_value(&mut merged, value);
                        found_any_config = true;
                        tracing::info!("Loaded user config from {}", user_config.display());
                    }
                    Err(err) => warn!("Failed to parse {}: {err}", user_config.display()),
                }
            }
        }

        // 3. Current directory (dev override)
        if let Ok(content) = std::fs::read_to_string("smoothdock.toml") {
            match content.parse::<toml::Value>() {
                Ok(value) => {
                    merge_value(&mut merged, value);
                    found_any_config = true;
                    tracing::info!("Loaded local config from ./smoothdock.toml");
                }
                Err(err) => warn!("Failed to parse smoothdock.toml: {err}"),
            }
        }

        if !found_any_config {
            warn!("No configuration file found, using default config");
        }

        let config: Config = merged.try_into().unwrap_or_else(|err| {
            warn!("Falling back to default config due to invalid overrides: {err}");
            Self::default()
        });

        if let Err(err) = config.validate() {
            warn!("Invalid configuration, falling back to defaults: {err}");
            return Self::default();
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.appearance.validate()?;
        Ok(())
    }

    /// Flatten the shared appearance settings and one panel entry into the
    /// record a `DockPanel` is constructed from.
    pub fn panel_config(&self, entry: &PanelEntry) -> PanelConfig {
        PanelConfig {
            position: entry.position,
            screen: entry.screen,
            visibility: entry.visibility,
            min_icon_size: self.appearance.min_icon_size,
            max_icon_size: self.appearance.max_icon_size,
            animation_steps: self.appearance.animation_steps,
            animation_speed: self.appearance.animation_speed,
        }
    }
}

fn merge_value(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base_map), toml::Value::Table(override_map)) => {
            for (key, override_value) in override_map {
                match base_map.entry(key) {
                    Entry::Occupied(mut entry) => merge_value(entry.get_mut(), override_value),
                    Entry::Vacant(entry) => {
                        entry.insert(override_value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

fn get_system_config_path() -> Option<PathBuf> {
    let path = PathBuf::from("/etc/smoothdock/config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

fn get_user_config_path() -> Option<PathBuf> {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })?;

    let path = config_dir.join("smoothdock").join("config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Appearance and animation settings shared by every panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_min_icon_size")]
    pub min_icon_size: i32,
    #[serde(default = "default_max_icon_size")]
    pub max_icon_size: i32,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    #[serde(default = "default_border_color")]
    pub border_color: String,
    #[serde(default = "default_show_border")]
    pub show_border: bool,
    /// Number of discrete frames per enter/leave animation.
    #[serde(default = "default_animation_steps")]
    pub animation_steps: i32,
    /// Tick interval is `32 - animation_speed` milliseconds.
    #[serde(default = "default_animation_speed")]
    pub animation_speed: i32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            min_icon_size: default_min_icon_size(),
            max_icon_size: default_max_icon_size(),
            background_color: default_background_color(),
            border_color: default_border_color(),
            show_border: default_show_border(),
            animation_steps: default_animation_steps(),
            animation_speed: default_animation_speed(),
        }
    }
}

impl AppearanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_icon_size <= 0 || self.max_icon_size < self.min_icon_size {
            return Err(ConfigError::InvalidIconRange {
                min: self.min_icon_size,
                max: self.max_icon_size,
            });
        }
        if self.animation_steps <= 0 || !(0..32).contains(&self.animation_speed) {
            return Err(ConfigError::InvalidAnimation {
                steps: self.animation_steps,
                speed: self.animation_speed,
            });
        }
        Ok(())
    }
}

fn default_min_icon_size() -> i32 {
    48
}

fn default_max_icon_size() -> i32 {
    128
}

fn default_background_color() -> String {
    "#63808080".to_string()
}

fn default_border_color() -> String {
    "#b1b1b1".to_string()
}

fn default_show_border() -> bool {
    true
}

fn default_animation_steps() -> i32 {
    20
}

fn default_animation_speed() -> i32 {
    16
}

/// One dock panel: where it lives and which components it shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelEntry {
    pub position: PanelPosition,
    pub screen: usize,
    pub visibility: PanelVisibility,
    pub show_application_menu: bool,
    pub show_pager: bool,
    pub show_clock: bool,
    pub launchers: Vec<LauncherEntry>,
}

impl Default for PanelEntry {
    fn default() -> Self {
        Self {
            position: PanelPosition::Bottom,
            screen: 0,
            visibility: PanelVisibility::AlwaysVisible,
            show_application_menu: true,
            show_pager: false,
            show_clock: true,
            launchers: Vec::new(),
        }
    }
}

/// A pinned application launcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherEntry {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub command: String,
}

/// The flattened per-panel record the layout engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    pub position: PanelPosition,
    pub screen: usize,
    pub visibility: PanelVisibility,
    pub min_icon_size: i32,
    pub max_icon_size: i32,
    pub animation_steps: i32,
    pub animation_speed: i32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Config::default().panel_config(&PanelEntry::default())
    }
}

impl PanelConfig {
    /// Gap between neighboring items, derived from the minimum icon size.
    pub fn item_spacing(&self) -> i32 {
        self.min_icon_size / 2
    }

    pub fn auto_hide(&self) -> bool {
        self.visibility == PanelVisibility::AutoHide
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_icon_size <= 0 || self.max_icon_size < self.min_icon_size {
            return Err(ConfigError::InvalidIconRange {
                min: self.min_icon_size,
                max: self.max_icon_size,
            });
        }
        if self.animation_steps <= 0 || !(0..32).contains(&self.animation_speed) {
            return Err(ConfigError::InvalidAnimation {
                steps: self.animation_steps,
                speed: self.animation_speed,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("icon size range is invalid: min={min}, max={max}")]
    InvalidIconRange { min: i32, max: i32 },
    #[error("animation settings are invalid: steps={steps}, speed={speed}")]
    InvalidAnimation { steps: i32, speed: i32 },
    #[error("screen index {0} is out of range")]
    InvalidScreen(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}
