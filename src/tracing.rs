//! Tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=dpma::pointer=debug` - pointer ownership transitions
//! - `RUST_LOG=dpma::panel=trace` - divider drags frame by frame
//!
//! # Log Files
//!
//! Logs are written to `~/.config/dpma/logs/dpma.log` with daily rotation.
//! File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::panel::PanelContainer;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/dpma/logs/dpma.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of a container's slot sizes for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSnapshot {
    pub total: i32,
    pub sizes: Vec<i32>,
}

impl LayoutSnapshot {
    pub fn from_container(container: &PanelContainer) -> Self {
        Self {
            total: container.total_size(),
            sizes: container.sizes(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        if self.sizes.len() != other.sizes.len() {
            return Some(format!(
                "slot count: {} → {}",
                self.sizes.len(),
                other.sizes.len()
            ));
        }

        let mut changes = Vec::new();
        if self.total != other.total {
            changes.push(format!("total {} → {}", self.total, other.total));
        }
        for (i, (before, after)) in self.sizes.iter().zip(&other.sizes).enumerate() {
            if before != after {
                changes.push(format!("#{}: {} → {}", i, before, after));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
