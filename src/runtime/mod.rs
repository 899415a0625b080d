//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler and window management
//! - `host` - stand-in host driven by the host view

pub mod app;
pub mod host;

pub use app::App;
