//! Stand-in host for running the overlay on its own
//!
//! Shows a gradient as the host frame. A primary click spawns an entity at
//! the clicked spot (in map units), a secondary click clears them, and every
//! event is echoed to the console.

use dpma::panels::{ConsoleBuffer, Entity, FrameSource, HostButton, HostInput, StaticEntities};
use dpma::surface::Image;

const BACKDROP_SIZE: u32 = 64;
/// Map units per host pixel
const WORLD_SCALE: f32 = 5.0;

pub struct DemoHost {
    entities: StaticEntities,
    console: ConsoleBuffer,
    view_size: (i32, i32),
    pointer: (i32, i32),
    backdrop: Image,
}

impl DemoHost {
    pub fn new(entities: StaticEntities, console: ConsoleBuffer) -> Self {
        Self {
            entities,
            console,
            view_size: (0, 0),
            pointer: (0, 0),
            backdrop: backdrop(),
        }
    }

    /// Pointer position in map units, centered on the view
    fn world_position(&self) -> (f32, f32) {
        let (width, height) = self.view_size;
        (
            (self.pointer.0 - width / 2) as f32 * WORLD_SCALE,
            (self.pointer.1 - height / 2) as f32 * WORLD_SCALE,
        )
    }
}

fn backdrop() -> Image {
    let mut pixels = Vec::with_capacity((BACKDROP_SIZE * BACKDROP_SIZE * 4) as usize);
    for y in 0..BACKDROP_SIZE {
        for x in 0..BACKDROP_SIZE {
            let shade = ((x + y) * 255 / (BACKDROP_SIZE * 2)) as u8;
            pixels.extend_from_slice(&[0x30, shade / 2 + 0x30, shade, 0xff]);
        }
    }
    Image {
        width: BACKDROP_SIZE,
        height: BACKDROP_SIZE,
        pixels,
    }
}

impl HostInput for DemoHost {
    fn pointer_moved(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    fn button_down(&mut self, button: HostButton) {
        match button {
            HostButton::Primary => {
                let (x, y) = self.world_position();
                let id = self.entities.next_id();
                self.entities.push(Entity::new(id, x, y));
                self.console
                    .push(format!("spawned #{} at ({}, {})", id, x.round(), y.round()));
            }
            HostButton::Secondary => {
                self.entities.clear();
                self.console.push("cleared entities");
            }
        }
    }

    fn button_up(&mut self, button: HostButton) {
        tracing::trace!(?button, "host button released");
    }
}

impl FrameSource for DemoHost {
    fn frame(&mut self, width: i32, height: i32) -> Option<&Image> {
        if self.view_size != (width, height) {
            tracing::debug!(width, height, "host view resized");
            self.view_size = (width, height);
        }
        Some(&self.backdrop)
    }
}
