//! Scrollable viewport over a column of sized sections
//!
//! Content is a vertical run of sections. Only sections overlapping the
//! visible window `[scroll_offset, scroll_offset + viewport_size)` are drawn.
//! When the viewport changes size the sections and the scroll offset are
//! rescaled with the same prefix-sum law containers use, so content keeps its
//! size relative to the viewport. Every section remembers the size it was
//! given and the viewport it was given at; current sizes are always derived
//! from those, so rounding never accumulates across resizes.

use crate::component::{Diagnostic, Lineage, Renderable};
use crate::geometry::{Orientation, Rect};
use crate::pointer::PointerCapture;
use crate::surface::{CursorKind, Surface};

use super::rescale;

/// What a section renderer is asked to draw
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    /// Section index
    pub index: usize,
    /// Content offset of the section's top edge
    pub from: i32,
    pub width: i32,
    pub height: i32,
    /// Lineage of the scrollable doing the drawing
    pub lineage: &'a Lineage,
}

/// Draws the sections of a [`Scrollable`]
pub trait SectionRenderer {
    /// Draw one section at local origin (0, 0)
    fn render_section(&mut self, surface: &mut dyn Surface, section: &SectionContext<'_>) {
        surface.report(Diagnostic::MissingSection {
            kind: KIND,
            path: section.lineage.path().clone(),
        });
    }
}

const KIND: &str = "scrollable";

/// A length as set, and the viewport it was set at (0 before the first layout)
#[derive(Debug, Clone, Copy, Default)]
struct Measured {
    size: i32,
    viewport: i32,
}

impl Measured {
    fn at(self, viewport: i32) -> i32 {
        if self.viewport > 0 {
            rescale::scale(self.size, self.viewport, viewport)
        } else {
            self.size
        }
    }
}

pub struct Scrollable<R: SectionRenderer> {
    lineage: Lineage,
    measured: Vec<Measured>,
    sections: Vec<i32>,
    content_size: i32,
    scroll_offset: i32,
    scroll_anchor: Measured,
    viewport_size: i32,
    capture: PointerCapture,
    renderer: R,
}

impl<R: SectionRenderer> Scrollable<R> {
    pub fn new(lineage: Lineage, renderer: R) -> Self {
        Self {
            lineage,
            measured: Vec::new(),
            sections: Vec::new(),
            content_size: 0,
            scroll_offset: 0,
            scroll_anchor: Measured::default(),
            viewport_size: 0,
            capture: PointerCapture::new(),
            renderer,
        }
    }

    /// Append a section of the given height at the current viewport; returns its index
    pub fn push_section(&mut self, size: i32) -> usize {
        let size = size.max(0);
        self.measured.push(Measured {
            size,
            viewport: self.viewport_size,
        });
        self.sections.push(size);
        self.content_size += size;
        self.sections.len() - 1
    }

    /// Append a section whose `size` was meant for a viewport of `viewport`
    pub fn push_section_at(&mut self, size: i32, viewport: i32) -> usize {
        let viewport = if viewport > 0 { viewport } else { self.viewport_size };
        self.measured.push(Measured {
            size: size.max(0),
            viewport,
        });
        self.layout();
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        self.sections.len() - 1
    }

    /// Viewport the section at `index` was sized for, 0 if not laid out yet
    pub fn section_viewport(&self, index: usize) -> Option<i32> {
        self.measured.get(index).map(|measured| measured.viewport)
    }

    pub fn sections(&self) -> &[i32] {
        &self.sections
    }

    pub fn content_size(&self) -> i32 {
        self.content_size
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    pub fn viewport_size(&self) -> i32 {
        self.viewport_size
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Largest valid scroll offset
    pub fn max_scroll(&self) -> i32 {
        (self.content_size - self.viewport_size).max(0)
    }

    pub fn scroll_to(&mut self, offset: i32) {
        self.scroll_offset = offset.clamp(0, self.max_scroll());
        self.scroll_anchor = Measured {
            size: self.scroll_offset,
            viewport: self.viewport_size,
        };
    }

    /// Scroll by `delta`; returns the amount actually scrolled
    pub fn scroll_by(&mut self, delta: i32) -> i32 {
        let before = self.scroll_offset;
        self.scroll_to(before + delta);
        self.scroll_offset - before
    }

    /// Adapt to a new viewport size
    ///
    /// Sections and the scroll offset not yet laid out are taken as sized for
    /// the first non-zero viewport. Everything else is rescaled from the size
    /// it was set at by `viewport / set_at`.
    pub fn resize(&mut self, viewport: i32) {
        let viewport = viewport.max(0);
        if self.viewport_size == viewport {
            return;
        }

        self.viewport_size = viewport;
        if viewport > 0 {
            for measured in self.measured.iter_mut().filter(|m| m.viewport == 0) {
                measured.viewport = viewport;
            }
            if self.scroll_anchor.viewport == 0 {
                self.scroll_anchor.viewport = viewport;
            }
        }

        self.layout();
        // Clamp without moving the anchor, so a later regrow restores the offset
        self.scroll_offset = self.scroll_anchor.at(viewport).clamp(0, self.max_scroll());
    }

    fn layout(&mut self) {
        let entries = self.measured.iter().map(|m| (m.size, m.viewport));
        self.sections = rescale::rescale_from(entries, self.viewport_size);
        self.content_size = self.sections.iter().sum();
    }

    /// Indices and content offsets of the sections currently in view
    pub fn visible_sections(&self) -> Vec<(usize, i32)> {
        let window_end = self.scroll_offset + self.viewport_size;
        let mut visible = Vec::new();
        let mut start = 0;
        for (index, &size) in self.sections.iter().enumerate() {
            if start >= window_end {
                break;
            }
            let end = start + size;
            if size > 0 && end > self.scroll_offset {
                visible.push((index, start));
            }
            start = end;
        }
        visible
    }

    fn handle_drag(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        surface.mouse(&mut self.capture, Rect::sized(width, height));
        if !self.capture.owned {
            return;
        }
        if self.capture.buttons.primary {
            surface.cursor(CursorKind::Grabbing);
            // Dragging content down reveals what is above it
            let pending = self.capture.delta(Orientation::Vertical);
            let scrolled = self.scroll_by(-pending);
            self.capture.consume(Orientation::Vertical, -scrolled);
        } else {
            surface.cursor(CursorKind::Grab);
        }
    }
}

impl<R: SectionRenderer> Renderable for Scrollable<R> {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        self.resize(height);
        self.handle_drag(surface, width, height);

        for (index, from) in self.visible_sections() {
            let size = self.sections[index];
            surface.clip_rect(Rect::new(0, from - self.scroll_offset, width, size));
            let context = SectionContext {
                index,
                from,
                width,
                height: size,
                lineage: &self.lineage,
            };
            self.renderer.render_section(surface, &context);
            surface.clip_pop();
        }
    }
}
