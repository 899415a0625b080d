//! Drawing surface contract consumed by every component
//!
//! Coordinates passed to a surface are relative to the origin established by
//! the innermost `clip_rect`. Drawing outside the current clip is discarded.

use crate::color::Color;
use crate::component::Diagnostic;
use crate::geometry::Rect;
use crate::pointer::PointerCapture;

/// Pointer affordance requested by a component for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    ColResize,
    RowResize,
    Crosshair,
    Grab,
    Grabbing,
}

/// An RGBA8 image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    /// Wrap RGBA8 pixels; `None` when the buffer does not match the size
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = width as usize * height as usize * 4;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-color image
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let pixel = [color.r, color.g, color.b, color.a];
        let pixels = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A clipped, translatable drawing target with pointer region registration
pub trait Surface {
    /// Push a clip at `rect` (current coordinates) and move the origin to its corner
    fn clip_rect(&mut self, rect: Rect);

    /// Restore the clip and origin active before the matching `clip_rect`
    fn clip_pop(&mut self);

    /// Set the color for subsequent shapes and text
    fn fill(&mut self, color: Color);

    /// Set the font size for subsequent text
    fn font(&mut self, size: f32);

    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32);

    fn circle(&mut self, cx: i32, cy: i32, radius: i32);

    /// Draw text with its top-left corner at (x, y)
    fn text(&mut self, text: &str, x: i32, y: i32);

    /// Draw an image stretched over `rect`
    fn image(&mut self, image: &Image, rect: Rect);

    /// Request a pointer affordance for this frame
    fn cursor(&mut self, cursor: CursorKind);

    /// Register a pointer region for this frame and refresh `capture`
    ///
    /// Returns whether the region owns the pointer.
    fn mouse(&mut self, capture: &mut PointerCapture, rect: Rect) -> bool;

    /// Report a non-fatal contract violation
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}
