//! dpma - resizable panel overlay
//!
//! A tree of components laid out by nested panel containers. Containers split
//! their space between children along one axis, keep the split proportional
//! when resized, and let the user drag the dividers between children. Pointer
//! regions are registered while rendering and arbitrated per frame.

pub mod application;
pub mod cli;
pub mod color;
pub mod component;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod panel;
pub mod panels;
pub mod pointer;
pub mod surface;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use application::Application;
pub use color::Color;
pub use component::{Diagnostic, Lineage, NodePath, Renderable};
pub use config::OverlayConfig;
pub use geometry::{Orientation, Rect};
pub use panel::{LayoutMetrics, PanelContainer, Scrollable};
pub use pointer::{PointerCapture, PointerInput, PointerState, PointerTracker};
pub use surface::{CursorKind, Surface};
