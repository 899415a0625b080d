//! Host view panel: shows the host's frame and forwards pointer input to it
//!
//! The panel registers a pointer region over its whole rectangle. While it
//! owns the pointer, position (relative to the panel) and button changes are
//! sent to the host. When it loses the pointer any held buttons are released
//! so the host never sees a stuck button.

use crate::component::{Lineage, Renderable};
use crate::geometry::Rect;
use crate::pointer::{PointerButtons, PointerCapture};
use crate::surface::{CursorKind, Image, Surface};

const KIND: &str = "host-view";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostButton {
    Primary,
    Secondary,
}

/// Receives pointer input forwarded by a [`HostView`]
pub trait HostInput {
    /// Pointer position relative to the view's top-left corner
    fn pointer_moved(&mut self, x: i32, y: i32);

    fn button_down(&mut self, button: HostButton);

    fn button_up(&mut self, button: HostButton);

    /// Cursor shown while the pointer is over the view
    fn cursor(&self) -> CursorKind {
        CursorKind::Crosshair
    }
}

/// Supplies the frame a [`HostView`] draws
pub trait FrameSource {
    /// Latest host frame; `width` x `height` is the size it will be shown at
    fn frame(&mut self, width: i32, height: i32) -> Option<&Image>;
}

/// A host with no input handling and no frame
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl HostInput for NoHost {
    fn pointer_moved(&mut self, _x: i32, _y: i32) {}

    fn button_down(&mut self, _button: HostButton) {}

    fn button_up(&mut self, _button: HostButton) {}
}

impl FrameSource for NoHost {
    fn frame(&mut self, _width: i32, _height: i32) -> Option<&Image> {
        None
    }
}

pub struct HostView<H> {
    lineage: Lineage,
    host: H,
    capture: PointerCapture,
    /// Buttons the host currently believes are held
    sent: PointerButtons,
}

impl<H: HostInput + FrameSource> HostView<H> {
    pub fn new(lineage: Lineage, host: H) -> Self {
        Self {
            lineage,
            host,
            capture: PointerCapture::new(),
            sent: PointerButtons::default(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Send button changes so the host matches `buttons`
    fn sync_buttons(&mut self, buttons: PointerButtons) {
        let changes = [
            (HostButton::Primary, self.sent.primary, buttons.primary),
            (HostButton::Secondary, self.sent.secondary, buttons.secondary),
        ];
        for (button, was, is) in changes {
            match (was, is) {
                (false, true) => self.host.button_down(button),
                (true, false) => self.host.button_up(button),
                _ => {}
            }
        }
        self.sent = buttons;
    }
}

impl<H: HostInput + FrameSource> Renderable for HostView<H> {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        let area = Rect::sized(width, height);
        if surface.mouse(&mut self.capture, area) {
            surface.cursor(self.host.cursor());
            self.host.pointer_moved(self.capture.x, self.capture.y);
            self.sync_buttons(self.capture.buttons);
        } else {
            self.sync_buttons(PointerButtons::default());
        }

        if let Some(image) = self.host.frame(width, height) {
            surface.image(image, area);
        }
    }
}
