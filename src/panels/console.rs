//! Console panel: a framed, scrollable list of message lines

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Color;
use crate::component::{Lineage, Renderable};
use crate::panel::{Scrollable, SectionContext, SectionRenderer};
use crate::surface::Surface;

const KIND: &str = "console";

const FRAME_COLOR: Color = Color::BLACK;
const INSET_COLOR: Color = Color::WHITE;
const TEXT_COLOR: Color = Color::rgb(0x36, 0x36, 0x3e);

/// Frame border and the padding inside it
const BORDER: i32 = 2;
const PADDING: i32 = 2;

/// Shared handle the host appends console lines through
#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    lines: Rc<RefCell<Vec<String>>>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn line(&self, index: usize) -> Option<String> {
        self.lines.borrow().get(index).cloned()
    }
}

/// Draws one console line per scrollable section
#[derive(Debug, Clone)]
pub struct ConsoleLines {
    buffer: ConsoleBuffer,
    font_size: f32,
}

impl SectionRenderer for ConsoleLines {
    fn render_section(&mut self, surface: &mut dyn Surface, section: &SectionContext<'_>) {
        let Some(line) = self.buffer.line(section.index) else {
            return;
        };
        surface.fill(TEXT_COLOR);
        surface.font(self.font_size);
        surface.text(&line, PADDING, 0);
    }
}

pub struct Console {
    lineage: Lineage,
    lines: Scrollable<ConsoleLines>,
    line_height: i32,
}

impl Console {
    pub fn new(lineage: Lineage, buffer: ConsoleBuffer) -> Self {
        let font_size = 12.0;
        let lines = Scrollable::new(
            lineage.descend(KIND, 0),
            ConsoleLines { buffer, font_size },
        );
        Self {
            lineage,
            lines,
            line_height: 16,
        }
    }

    pub fn buffer(&self) -> &ConsoleBuffer {
        &self.lines.renderer().buffer
    }

    pub fn lines(&self) -> &Scrollable<ConsoleLines> {
        &self.lines
    }

    /// Add a section for every line appended since the last frame
    ///
    /// Follows the tail while the view is scrolled to the bottom.
    fn sync(&mut self) {
        let total = self.lines.renderer().buffer.len();
        let known = self.lines.sections().len();
        if total <= known {
            return;
        }
        let following = self.lines.scroll_offset() >= self.lines.max_scroll();
        // Every line shares the first line's scale, so lines stay equal in height
        let measured_at = self
            .lines
            .section_viewport(0)
            .unwrap_or(self.lines.viewport_size());
        for _ in known..total {
            self.lines.push_section_at(self.line_height, measured_at);
        }
        if following {
            let bottom = self.lines.max_scroll();
            self.lines.scroll_to(bottom);
        }
    }
}

impl Renderable for Console {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    fn render(&mut self, surface: &mut dyn Surface, width: i32, height: i32) {
        surface.fill(FRAME_COLOR);
        surface.rect(0, 0, width, height);
        surface.fill(INSET_COLOR);
        surface.rect(BORDER, BORDER, width - BORDER * 2, height - BORDER * 2);

        self.sync();
        let inset = BORDER + PADDING;
        self.lines.render_absolute(
            surface,
            inset,
            inset,
            (width - inset * 2).max(0),
            (height - inset * 2).max(0),
        );
    }
}
