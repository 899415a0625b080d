//! Panel system - resizable containers and their layout math
//!
//! ## Architecture
//!
//! - `PanelContainer`: ordered slots along one axis, proportional resize,
//!   divider dragging, recursive rendering
//! - `divider`: hit regions and clamped drag resolution between two slots
//! - `rescale`: the prefix-sum rescale shared by containers and scrollables
//! - `Scrollable`: sized sections behind a scrolled viewport
//!
//! ## Integration
//!
//! Containers draw through the `Surface` trait and register divider hit
//! regions with it every frame; the surface forwards them to the
//! `PointerTracker` that decides ownership.

mod container;
pub mod divider;
pub mod rescale;
mod scrollable;

use serde::{Deserialize, Serialize};

pub use container::PanelContainer;
pub use scrollable::{Scrollable, SectionContext, SectionRenderer};

/// Sizing constants shared by every container in a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Nominal divider thickness in logical pixels
    #[serde(default = "default_divider_size")]
    pub divider_size: i32,
    /// Smallest size the first and last slot can be dragged to
    #[serde(default = "default_min_panel_size")]
    pub min_panel_size: i32,
    /// Size given to the first slot of an empty container
    #[serde(default = "default_initial_slot_size")]
    pub initial_slot_size: i32,
}

fn default_divider_size() -> i32 {
    5
}

fn default_min_panel_size() -> i32 {
    10
}

fn default_initial_slot_size() -> i32 {
    1024
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            divider_size: default_divider_size(),
            min_panel_size: default_min_panel_size(),
            initial_slot_size: default_initial_slot_size(),
        }
    }
}
