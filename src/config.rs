//! Overlay configuration persistence
//!
//! Stores user preferences in `~/.config/dpma/config.yaml`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::panel::LayoutMetrics;

/// Initial window geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_title() -> String {
    "dpma".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

/// Overlay configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Divider and panel sizing, stored at the top level of the file
    #[serde(flatten)]
    pub layout: LayoutMetrics,

    #[serde(default)]
    pub window: WindowConfig,

    /// Initial ratio between the host view and the controller column
    #[serde(default = "default_host_split")]
    pub host_split: Vec<i32>,

    /// TrueType font for panel text; system fonts are tried when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    #[serde(default = "default_background")]
    pub background: Color,
}

fn default_host_split() -> Vec<i32> {
    vec![3, 1]
}

fn default_background() -> Color {
    Color::rgb(0x20, 0x20, 0x20)
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            layout: LayoutMetrics::default(),
            window: WindowConfig::default(),
            host_split: default_host_split(),
            font_path: None,
            background: default_background(),
        }
    }
}

impl OverlayConfig {
    /// Load config from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_or_default(&path)
    }

    /// Load config from `path`, falling back to defaults when missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| anyhow::anyhow!("No config directory available"))?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values that would break layout
    fn sanitized(mut self) -> Self {
        self.layout.divider_size = self.layout.divider_size.max(0);
        self.layout.min_panel_size = self.layout.min_panel_size.max(0);
        if self.layout.initial_slot_size <= 0 {
            self.layout.initial_slot_size = LayoutMetrics::default().initial_slot_size;
        }
        self.window.width = self.window.width.max(1);
        self.window.height = self.window.height.max(1);
        self
    }
}
