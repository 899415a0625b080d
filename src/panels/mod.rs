//! Leaf panels of the default overlay
//!
//! ## Available Panels
//!
//! - **HostView**: shows the host's frame and forwards pointer input to it
//! - **EntityMap**: plots host-supplied entity positions around a crosshair
//! - **Console**: bordered box with a scrollable list of message lines
//!
//! Content comes from the host through the traits defined next to each panel.

mod console;
mod entity_map;
mod host_view;

pub use console::{Console, ConsoleBuffer, ConsoleLines};
pub use entity_map::{Entity, EntityMap, EntitySource, StaticEntities};
pub use host_view::{FrameSource, HostButton, HostInput, HostView, NoHost};
