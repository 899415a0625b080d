//! Software [`Surface`] over a [`Frame`]
//!
//! The canvas keeps a stack of layers, one per open `clip_rect`. Each layer
//! holds the absolute origin drawing is relative to and the absolute clip.
//! Pointer regions are forwarded to the [`PointerTracker`] in absolute
//! coordinates; they are not limited by the clip.

use std::collections::HashSet;

use fontdue::Font;

use crate::color::Color;
use crate::component::Diagnostic;
use crate::geometry::Rect;
use crate::pointer::{PointerCapture, PointerState, PointerTracker};
use crate::surface::{CursorKind, Image, Surface};

use super::frame::{Frame, TextPainter};
use super::GlyphCache;

/// Diagnostics already reported, so each one is logged once per session
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    seen: HashSet<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic; returns true (and logs it) the first time it is seen
    pub fn record(&mut self, diagnostic: Diagnostic) -> bool {
        if self.seen.contains(&diagnostic) {
            return false;
        }
        tracing::warn!(path = %diagnostic.path(), "{}", diagnostic);
        self.seen.insert(diagnostic);
        true
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.seen.contains(diagnostic)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.seen.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct Layer {
    origin: (i32, i32),
    clip: Rect,
}

pub struct Canvas<'a> {
    frame: Frame<'a>,
    tracker: &'a mut PointerTracker,
    text: Option<TextPainter<'a>>,
    diagnostics: Option<&'a mut DiagnosticLog>,
    layers: Vec<Layer>,
    color: Color,
    font_size: f32,
    cursor: CursorKind,
}

impl<'a> Canvas<'a> {
    /// Wrap `frame` for one frame of drawing with `pointer` as this frame's input
    pub fn new(frame: Frame<'a>, tracker: &'a mut PointerTracker, pointer: PointerState) -> Self {
        tracker.begin_frame(pointer);
        let bounds = Rect::sized(frame.width() as i32, frame.height() as i32);
        Self {
            frame,
            tracker,
            text: None,
            diagnostics: None,
            layers: vec![Layer {
                origin: (0, 0),
                clip: bounds,
            }],
            color: Color::WHITE,
            font_size: 14.0,
            cursor: CursorKind::Default,
        }
    }

    /// Enable text drawing
    pub fn with_font(mut self, font: &'a Font, glyph_cache: &'a mut GlyphCache) -> Self {
        self.text = Some(TextPainter::new(font, glyph_cache));
        self
    }

    /// Deduplicate reported diagnostics through `log`
    pub fn with_diagnostics(mut self, log: &'a mut DiagnosticLog) -> Self {
        self.diagnostics = Some(log);
        self
    }

    /// Cursor requested by the last component that asked this frame
    pub fn cursor_request(&self) -> CursorKind {
        self.cursor
    }

    pub fn frame_mut(&mut self) -> &mut Frame<'a> {
        &mut self.frame
    }

    /// Number of open clips
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    fn layer(&self) -> Layer {
        // The base layer is never popped
        self.layers[self.layers.len() - 1]
    }

    fn absolute(&self, rect: Rect) -> Rect {
        let (ox, oy) = self.layer().origin;
        rect.translate(ox, oy)
    }
}

impl Surface for Canvas<'_> {
    fn clip_rect(&mut self, rect: Rect) {
        let absolute = self.absolute(rect);
        let clip = absolute.intersect(&self.layer().clip);
        self.layers.push(Layer {
            origin: (absolute.x, absolute.y),
            clip,
        });
        self.frame.set_clip(clip);
    }

    fn clip_pop(&mut self) {
        if self.layers.len() == 1 {
            tracing::debug!("clip_pop without a matching clip_rect");
            return;
        }
        self.layers.pop();
        let clip = self.layer().clip;
        self.frame.set_clip(clip);
    }

    fn fill(&mut self, color: Color) {
        self.color = color;
    }

    fn font(&mut self, size: f32) {
        self.font_size = size;
    }

    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let rect = self.absolute(Rect::new(x, y, width, height));
        self.frame.fill_rect_blended(rect, self.color.to_argb_u32());
    }

    fn circle(&mut self, cx: i32, cy: i32, radius: i32) {
        let (ox, oy) = self.layer().origin;
        self.frame
            .fill_circle(cx + ox, cy + oy, radius, self.color.to_argb_u32());
    }

    fn text(&mut self, text: &str, x: i32, y: i32) {
        let (ox, oy) = self.layer().origin;
        let color = self.color.to_argb_u32();
        if let Some(painter) = self.text.as_mut() {
            painter.draw(&mut self.frame, x + ox, y + oy, self.font_size, text, color);
        }
    }

    fn image(&mut self, image: &Image, rect: Rect) {
        let rect = self.absolute(rect);
        self.frame.blit_rgba_stretched(image, rect);
    }

    fn cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
    }

    fn mouse(&mut self, capture: &mut PointerCapture, rect: Rect) -> bool {
        let origin = self.layer().origin;
        let absolute = self.absolute(rect);
        self.tracker.register(capture, absolute, origin)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        match self.diagnostics.as_deref_mut() {
            Some(log) => {
                log.record(diagnostic);
            }
            None => tracing::warn!("{}", diagnostic),
        }
    }
}
