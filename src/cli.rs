//! Command-line argument parsing for the overlay
//!
//! Flags override the values loaded from the config file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::OverlayConfig;

/// Resizable panel overlay
#[derive(Parser, Debug, Default)]
#[command(name = "dpma", version, about = "Resizable panel overlay")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/dpma/config.yaml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial window width
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Initial window height
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// TrueType font for panel text
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Initial host/controller ratio, e.g. `3,1`
    #[arg(long, value_name = "RATIO", value_delimiter = ',')]
    pub split: Option<Vec<i32>>,
}

impl CliArgs {
    /// Load the config (explicit path or default location) and apply overrides
    ///
    /// An explicit `--config` path must exist and parse.
    pub fn into_config(self) -> Result<OverlayConfig, String> {
        let config = match &self.config {
            Some(path) => {
                OverlayConfig::load_from(path).map_err(|e| format!("{:#}", e))?
            }
            None => OverlayConfig::load(),
        };
        self.apply(config)
    }

    /// Apply command-line overrides to `config`
    pub fn apply(self, mut config: OverlayConfig) -> Result<OverlayConfig, String> {
        if let Some(width) = self.width {
            config.window.width = width.max(1);
        }
        if let Some(height) = self.height {
            config.window.height = height.max(1);
        }
        if let Some(font) = self.font {
            config.font_path = Some(font);
        }
        if let Some(split) = self.split {
            if split.len() != 2 || split.iter().any(|part| *part <= 0) {
                return Err(format!(
                    "--split expects two positive numbers, got {:?}",
                    split
                ));
            }
            config.host_split = split;
        }
        Ok(config)
    }
}
