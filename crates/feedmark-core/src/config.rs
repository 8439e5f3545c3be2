use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Markdown file holding the feed list
    #[serde(default = "default_feed_file")]
    pub feed_file: PathBuf,
    /// Entries shown per feed by the read action
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            feed_file: default_feed_file(),
            max_entries: default_max_entries(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Color scheme name: "gruvbox-dark", "nord" or "mono"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Show article summaries in the detail pane
    #[serde(default = "default_true")]
    pub show_summary: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme(),
            show_summary: default_true(),
        }
    }
}

fn default_feed_file() -> PathBuf {
    PathBuf::from("feeds.md")
}

fn default_max_entries() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("feedmark/{}", env!("CARGO_PKG_VERSION"))
}

fn default_tick_rate() -> u64 {
    250
}

fn default_theme() -> String {
    "gruvbox-dark".to_string()
}

fn default_true() -> bool {
    true
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
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the command line would refuse as well
    pub fn validate(&self) -> crate::Result<()> {
        if self.general.max_entries == 0 {
            return Err(crate::Error::Config(
                "general.max_entries must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/feedmark/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("feedmark")
            .join("config.toml")
    }

    /// Get the feed list path (with tilde expansion)
    pub fn feed_file(&self) -> PathBuf {
        expand_tilde(&self.general.feed_file)
    }
}
