//! View module - software rendering of the overlay tree
//!
//! `Frame` wraps a pixel buffer with clipped primitives, `Canvas` implements
//! the component `Surface` on top of it, and `Renderer` owns the window
//! surface and back buffer the canvas draws into.

pub mod canvas;
pub mod frame;

pub use canvas::{Canvas, DiagnosticLog};
pub use frame::{Frame, TextPainter};

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings, Metrics};
use softbuffer::Surface;
use winit::window::Window;

use crate::application::Application;
use crate::color::Color;
use crate::pointer::{PointerState, PointerTracker};
use crate::surface::CursorKind;

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Fonts tried in order when no font is configured
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Load a TrueType font from disk
pub fn load_font(path: &Path) -> Result<Font> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow::anyhow!("Failed to load font {}: {}", path.display(), e))
}

/// Load the configured font, or the first system fallback that exists
///
/// Returns `None` when nothing could be loaded; the overlay then renders
/// without text.
pub fn resolve_font(configured: Option<&Path>) -> Option<Font> {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(font) => return Some(font),
            Err(e) => tracing::warn!("{:#}", e),
        }
    }

    for candidate in FALLBACK_FONTS.iter().map(PathBuf::from) {
        if !candidate.exists() {
            continue;
        }
        match load_font(&candidate) {
            Ok(font) => {
                tracing::info!(font = %candidate.display(), "using fallback font");
                return Some(font);
            }
            Err(e) => tracing::debug!("{:#}", e),
        }
    }

    tracing::warn!("no font available, text will not be drawn");
    None
}

pub struct Renderer {
    font: Option<Font>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so we draw into our own buffer and copy on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    glyph_cache: GlyphCache,
    diagnostics: DiagnosticLog,
    background: Color,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        font: Option<Font>,
        background: Color,
    ) -> Result<Self> {
        let (width, height) = {
            let size = window.inner_size();
            (size.width.max(1), size.height.max(1))
        };

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        Self::resize_surface(&mut surface, width, height)?;

        Ok(Self {
            font,
            surface,
            back_buffer: vec![0; (width as usize) * (height as usize)],
            width,
            height,
            glyph_cache: GlyphCache::new(),
            diagnostics: DiagnosticLog::new(),
            background,
        })
    }

    fn resize_surface(
        surface: &mut Surface<Rc<Window>, Rc<Window>>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Track a new window size; a zero dimension is kept at one pixel
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        if self.width == width && self.height == height {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);
        Self::resize_surface(&mut self.surface, width, height)
    }

    /// Draw one frame of `app` and present it; returns the requested cursor
    pub fn render(
        &mut self,
        app: &mut Application,
        tracker: &mut PointerTracker,
        pointer: PointerState,
    ) -> Result<CursorKind> {
        let (width, height) = (self.width as usize, self.height as usize);
        let cursor = {
            let mut frame = Frame::new(&mut self.back_buffer, width, height);
            frame.clear(self.background.to_argb_u32() | 0xFF000000);

            let mut canvas =
                Canvas::new(frame, tracker, pointer).with_diagnostics(&mut self.diagnostics);
            if let Some(font) = self.font.as_ref() {
                canvas = canvas.with_font(font, &mut self.glyph_cache);
            }
            app.frame(&mut canvas, width as i32, height as i32);
            canvas.cursor_request()
        };

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        let len = buffer.len().min(self.back_buffer.len());
        buffer[..len].copy_from_slice(&self.back_buffer[..len]);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_font_missing_file_is_error() {
        let Err(error) = load_font(Path::new("/definitely/not/a/font.ttf")) else {
            panic!("expected a missing font to fail");
        };
        assert!(format!("{:#}", error).contains("Failed to read font"));
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        assert!(load_font(&path).is_err());
    }
}
