use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Number of items seeded into the list at startup ("1", "2", ...)
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            seed_count: default_seed_count(),
        }
    }
}

/// Item geometry in abstract pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Height of one item card
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    /// Gap between consecutive items
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Viewport height used by headless commands (the TUI measures the terminal)
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Tolerance for the exact-fit adjustment of the maximum reach index
    #[serde(default = "default_fit_tolerance")]
    pub fit_tolerance: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            item_height: default_item_height(),
            spacing: default_spacing(),
            viewport_height: default_viewport_height(),
            fit_tolerance: default_fit_tolerance(),
        }
    }
}

/// Easing curve applied to scroll-to-index progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the very end
    None,
    /// Constant speed
    #[default]
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
}

/// What happens when scroll-to-index is requested while an animation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReentryPolicy {
    /// Ignore the new request until the running animation finishes
    #[default]
    Reject,
    /// Cancel the running animation and start towards the new target
    Restart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Pixels moved by one discrete scroll tick
    #[serde(default = "default_step_px")]
    pub step_px: f32,
    /// Wheel deltas at or below this magnitude are treated as noise
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f32,
    /// Animation speed in items per second of duration
    #[serde(default = "default_items_per_second")]
    pub items_per_second: f32,
    /// Upper bound on scroll-to-index duration
    #[serde(default = "default_max_animation_secs")]
    pub max_animation_secs: f32,
    /// Easing applied to animation progress
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Behaviour for scroll-to-index requests during an animation
    #[serde(default)]
    pub reentry: ReentryPolicy,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_px: default_step_px(),
            wheel_threshold: default_wheel_threshold(),
            items_per_second: default_items_per_second(),
            max_animation_secs: default_max_animation_secs(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            reentry: ReentryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds when idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Abstract pixels per terminal row
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f32,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Primary background
    pub bg0: Option<String>,
    /// Card background
    pub bg1: Option<String>,
    /// Status bar background
    pub bg2: Option<String>,
    /// Primary foreground
    pub fg0: Option<String>,
    /// Dimmed foreground
    pub fg1: Option<String>,
    /// Accent color (borders, index labels)
    pub accent: Option<String>,
    /// Selected card background
    pub selection: Option<String>,
    /// Error color
    pub error: Option<String>,
    /// Success color
    pub success: Option<String>,
    /// Warning color
    pub warning: Option<String>,
    /// Info color
    pub info: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Esc>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// One scroll tick down
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// One scroll tick up
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Open the scroll-to-index prompt
    #[serde(default = "default_key_goto")]
    pub goto: String,
    /// Open the add-item prompt
    #[serde(default = "default_key_add")]
    pub add: String,
    /// Open the edit prompt for the selected item
    #[serde(default = "default_key_edit")]
    pub edit: String,
    /// Delete the selected item
    #[serde(default = "default_key_delete")]
    pub delete: String,
    /// Select the next visible item
    #[serde(default = "default_key_select_next")]
    pub select_next: String,
    /// Select the previous visible item
    #[serde(default = "default_key_select_prev")]
    pub select_prev: String,
    /// Cancel a running scroll animation
    #[serde(default = "default_key_cancel_animation")]
    pub cancel_animation: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            goto: default_key_goto(),
            add: default_key_add(),
            edit: default_key_edit(),
            delete: default_key_delete(),
            select_next: default_key_select_next(),
            select_prev: default_key_select_prev(),
            cancel_animation: default_key_cancel_animation(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_goto() -> String { ":".to_string() }
fn default_key_add() -> String { "a".to_string() }
fn default_key_edit() -> String { "e".to_string() }
fn default_key_delete() -> String { "d".to_string() }
fn default_key_select_next() -> String { "<Tab>".to_string() }
fn default_key_select_prev() -> String { "<S-Tab>".to_string() }
fn default_key_cancel_animation() -> String { "c".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recycler")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_seed_count() -> usize {
    7
}

fn default_item_height() -> f32 {
    30.0
}

fn default_spacing() -> f32 {
    10.0
}

fn default_viewport_height() -> f32 {
    150.0
}

fn default_fit_tolerance() -> f32 {
    0.1
}

fn default_step_px() -> f32 {
    20.0
}

fn default_wheel_threshold() -> f32 {
    0.01
}

fn default_items_per_second() -> f32 {
    40.0
}

fn default_max_animation_secs() -> f32 {
    2.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> f32 {
    10.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Render configuration as TOML text
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Default configuration file: ~/.config/recycler/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("recycler")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used by the TUI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("recycler.log")
    }

    /// Initial backing collection: "1" ..= "seed_count"
    pub fn seed_items(&self) -> Vec<String> {
        (1..=self.general.seed_count).map(|i| i.to_string()).collect()
    }
}
