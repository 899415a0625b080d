//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use dpma::color::Color;
use dpma::component::{Diagnostic, Lineage, Renderable};
use dpma::geometry::Rect;
use dpma::pointer::{PointerCapture, PointerState, PointerTracker};
use dpma::surface::{CursorKind, Image, Surface};

/// A drawn rectangle in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnRect {
    pub rect: Rect,
    pub color: Color,
}

/// A surface that records what was drawn instead of rasterizing it
pub struct RecordingSurface<'a> {
    tracker: &'a mut PointerTracker,
    origins: Vec<(i32, i32)>,
    color: Color,
    pub rects: Vec<DrawnRect>,
    pub texts: Vec<(String, i32, i32)>,
    pub regions: Vec<Rect>,
    pub diagnostics: Vec<Diagnostic>,
    pub cursor: CursorKind,
    pub pops_without_clip: usize,
}

impl<'a> RecordingSurface<'a> {
    pub fn new(tracker: &'a mut PointerTracker, pointer: PointerState) -> Self {
        tracker.begin_frame(pointer);
        Self {
            tracker,
            origins: vec![(0, 0)],
            color: Color::BLACK,
            rects: Vec::new(),
            texts: Vec::new(),
            regions: Vec::new(),
            diagnostics: Vec::new(),
            cursor: CursorKind::Default,
            pops_without_clip: 0,
        }
    }

    fn origin(&self) -> (i32, i32) {
        self.origins[self.origins.len() - 1]
    }

    /// Open clips; zero once a render pass is balanced
    pub fn depth(&self) -> usize {
        self.origins.len() - 1
    }

    /// Rectangles drawn with `color`
    pub fn rects_with(&self, color: Color) -> Vec<Rect> {
        self.rects
            .iter()
            .filter(|drawn| drawn.color == color)
            .map(|drawn| drawn.rect)
            .collect()
    }
}

impl Surface for RecordingSurface<'_> {
    fn clip_rect(&mut self, rect: Rect) {
        let (ox, oy) = self.origin();
        self.origins.push((ox + rect.x, oy + rect.y));
    }

    fn clip_pop(&mut self) {
        if self.origins.len() == 1 {
            self.pops_without_clip += 1;
        } else {
            self.origins.pop();
        }
    }

    fn fill(&mut self, color: Color) {
        self.color = color;
    }

    fn font(&mut self, _size: f32) {}

    fn rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let (ox, oy) = self.origin();
        self.rects.push(DrawnRect {
            rect: Rect::new(ox + x, oy + y, width, height),
            color: self.color,
        });
    }

    fn circle(&mut self, _cx: i32, _cy: i32, _radius: i32) {}

    fn text(&mut self, text: &str, x: i32, y: i32) {
        let (ox, oy) = self.origin();
        self.texts.push((text.to_string(), ox + x, oy + y));
    }

    fn image(&mut self, _image: &Image, _rect: Rect) {}

    fn cursor(&mut self, cursor: CursorKind) {
        self.cursor = cursor;
    }

    fn mouse(&mut self, capture: &mut PointerCapture, rect: Rect) -> bool {
        let origin = self.origin();
        let absolute = rect.translate(origin.0, origin.1);
        self.regions.push(absolute);
        self.tracker.register(capture, absolute, origin)
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// A leaf that fills its rectangle with one color
pub struct Swatch {
    lineage: Lineage,
    color: Color,
}

impl Swatch {
    pub fn new(lineage: Lineage, color: Color) -> Self {
        Self { lineage, color }
    }
}

impl Renderable for Swatch {
    fn kind(&self) -> &'static str {
        "swatch"
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        surface.fill(self.color);
        surface.rect(0, 0, width, height);
    }
}

/// A leaf with no drawing logic
pub struct Unfinished {
    lineage: Lineage,
}

impl Unfinished {
    pub fn new(lineage: Lineage) -> Self {
        Self { lineage }
    }
}

impl Renderable for Unfinished {
    fn kind(&self) -> &'static str {
        "unfinished"
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }
}

/// Distinct color per slot index
pub fn swatch_color(index: usize) -> Color {
    Color::rgb(index as u8 + 1, 0, 0)
}
