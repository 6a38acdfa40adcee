use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Course JSON to open when none is given on the command line.
    #[serde(default)]
    pub course_path: Option<String>,
    #[serde(default = "default_shuffle_pool")]
    pub shuffle_pool: bool,
    #[serde(default = "default_expand_all_sections")]
    pub expand_all_sections: bool,
    #[serde(default = "default_show_progress_bar")]
    pub show_progress_bar: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_shuffle_pool() -> bool {
    false
}
fn default_expand_all_sections() -> bool {
    false
}
fn default_show_progress_bar() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            course_path: None,
            shuffle_pool: default_shuffle_pool(),
            expand_all_sections: default_expand_all_sections(),
            show_progress_bar: default_show_progress_bar(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursedeck")
            .join("config.toml")
    }

    /// Reset values that cannot be used, e.g. a theme that no longer exists.
    pub fn validate(&mut self, valid_themes: &[String]) {
        if !valid_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
        if self.log_level.trim().is_empty() {
            self.log_level = default_log_level();
        }
        if self.course_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.course_path = None;
        }
    }
}
