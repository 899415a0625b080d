//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use fontdue::Font;

use crate::geometry::Rect;
use crate::surface::Image;

use super::GlyphCache;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). The alpha value from the
/// foreground color determines the blend ratio.
///
/// Returns the blended color with full opacity (alpha = 0xFF).
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are safely clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            // Buffer is smaller than expected - recalculate height to fit
            let adjusted_height = actual_size / width;
            (width, adjusted_height)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    /// Get the frame width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the frame height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set a clipping rectangle. All subsequent drawing operations will be
    /// constrained to this region.
    pub fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.max(0) as usize).min(self.width);
        let y0 = (rect.y.max(0) as usize).min(self.height);
        let x1 = (rect.right().max(0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0) as usize).min(self.height);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    /// Remove the clipping rectangle, restoring full-frame drawing.
    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Effective max x (exclusive), considering clip rect.
    #[inline]
    fn max_x(&self) -> usize {
        self.clip.map_or(self.width, |c| c.x1)
    }

    /// Effective max y (exclusive), considering clip rect.
    #[inline]
    fn max_y(&self) -> usize {
        self.clip.map_or(self.height, |c| c.y1)
    }

    /// Effective min x (inclusive), considering clip rect.
    #[inline]
    fn min_x(&self) -> usize {
        self.clip.map_or(0, |c| c.x0)
    }

    /// Effective min y (inclusive), considering clip rect.
    #[inline]
    fn min_y(&self) -> usize {
        self.clip.map_or(0, |c| c.y0)
    }

    /// Pixel bounds of `rect` after clipping: (x0, y0, x1, y1)
    fn clipped(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x0 = (rect.x.max(0) as usize).max(self.min_x());
        let y0 = (rect.y.max(0) as usize).max(self.min_y());
        let x1 = (rect.right().max(0) as usize).min(self.max_x());
        let y1 = (rect.bottom().max(0) as usize).min(self.max_y());
        (x0, y0, x1, y1)
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            if x0 < x1 {
                self.buffer[row_start + x0..row_start + x1].fill(color);
            }
        }
    }

    /// Fill a rectangle with alpha blending (color is ARGB format)
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend a pixel with alpha (ARGB format, alpha in high byte)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.min_x() || x >= self.max_x() || y < self.min_y() || y >= self.max_y() {
            return;
        }

        let idx = y * self.width + x;
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            self.buffer[idx] = color | 0xFF000000;
            return;
        }

        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }

    /// Fill a circle centered at (cx, cy)
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        if radius <= 0 {
            return;
        }
        let r2 = radius * radius;
        for dy in -radius..=radius {
            // Widest x offset still inside the circle on this row
            let mut span = 0;
            while (span + 1) * (span + 1) + dy * dy <= r2 {
                span += 1;
            }
            self.fill_rect_blended(Rect::new(cx - span, cy + dy, span * 2 + 1, 1), color);
        }
    }

    /// Blit an RGBA8 image stretched over `dest` with nearest-neighbor sampling
    pub fn blit_rgba_stretched(&mut self, image: &Image, dest: Rect) {
        if image.is_empty() || dest.is_empty() {
            return;
        }

        let (x0, y0, x1, y1) = self.clipped(dest);
        let img_width = image.width as i64;
        let img_height = image.height as i64;

        for py in y0..y1 {
            let dy = py as i64 - dest.y as i64;
            let src_y = (dy * img_height / dest.height as i64).clamp(0, img_height - 1);
            let row_start = py * self.width;

            for px in x0..x1 {
                let dx = px as i64 - dest.x as i64;
                let src_x = (dx * img_width / dest.width as i64).clamp(0, img_width - 1);
                let src_idx = ((src_y * img_width + src_x) * 4) as usize;

                if src_idx + 3 >= image.pixels.len() {
                    continue;
                }

                let r = image.pixels[src_idx] as u32;
                let g = image.pixels[src_idx + 1] as u32;
                let b = image.pixels[src_idx + 2] as u32;
                let a = image.pixels[src_idx + 3] as f32 / 255.0;

                let argb = 0xFF000000 | (r << 16) | (g << 8) | b;

                if a >= 1.0 {
                    self.buffer[row_start + px] = argb;
                } else if a > 0.0 {
                    self.buffer[row_start + px] =
                        blend_colors(self.buffer[row_start + px], argb, a);
                }
            }
        }
    }
}

/// Text rendering context wrapping font and glyph cache.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
}

impl<'a> TextPainter<'a> {
    pub fn new(font: &'a Font, glyph_cache: &'a mut GlyphCache) -> Self {
        Self { font, glyph_cache }
    }

    /// Draw text with its top-left corner at (x, y), respecting the frame clip
    pub fn draw(
        &mut self,
        frame: &mut Frame,
        x: i32,
        y: i32,
        font_size: f32,
        text: &str,
        color: u32,
    ) {
        let ascent = self
            .font
            .horizontal_line_metrics(font_size)
            .map_or(font_size, |metrics| metrics.ascent);
        let mut current_x = x as f32;
        let baseline = y as f32 + ascent;

        for ch in text.chars() {
            let key = (ch, font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px >= 0 && py >= 0 {
                        let coverage = (alpha as u32 * ((color >> 24) & 0xFF)) / 255;
                        let glyph_color = (coverage << 24) | (color & 0x00FFFFFF);
                        frame.blend_pixel(px as usize, py as usize, glyph_color);
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);

        frame.fill_rect(Rect::new(10, 10, 20, 20), 0xFFFF0000);

        // Check a pixel inside the rect
        assert_eq!(frame.get_pixel(15, 15), 0xFFFF0000);
        // Check a pixel outside the rect
        assert_eq!(frame.get_pixel(5, 5), 0);
    }

    #[test]
    fn test_frame_blend_pixel() {
        let mut buffer = vec![0xFFFFFFFF_u32; 10 * 10]; // White background
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // Blend 50% black
        frame.blend_pixel(5, 5, 0x80000000);

        let result = frame.get_pixel(5, 5);
        // Should be grayish (around 128 for each channel)
        let r = (result >> 16) & 0xFF;
        let g = (result >> 8) & 0xFF;
        let b = result & 0xFF;
        assert!(r > 100 && r < 160, "R channel: {}", r);
        assert!(g > 100 && g < 160, "G channel: {}", g);
        assert!(b > 100 && b < 160, "B channel: {}", b);
    }

    #[test]
    fn test_frame_negative_rect_is_clipped() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // These should not panic
        frame.fill_rect(Rect::new(-5, -5, 8, 8), 0xFF00FF00);
        frame.blend_pixel(100, 100, 0x80FFFFFF);
        assert_eq!(frame.get_pixel(2, 2), 0xFF00FF00);
        assert_eq!(frame.get_pixel(3, 3), 0);
    }

    #[test]
    fn test_frame_with_clip_restricts_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);
        frame.set_clip(Rect::new(10, 10, 30, 30));

        // Fill the entire frame — should be clipped to 10..40 x 10..40
        frame.fill_rect(Rect::new(0, 0, 100, 100), 0xFFFF0000);

        assert_eq!(frame.get_pixel(20, 20), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
        assert_eq!(frame.get_pixel(50, 50), 0);
        // Edge of clip: 10 is inside, 40 is outside (exclusive)
        assert_eq!(frame.get_pixel(10, 10), 0xFFFF0000);
        assert_eq!(frame.get_pixel(39, 39), 0xFFFF0000);
        assert_eq!(frame.get_pixel(40, 40), 0);

        frame.clear_clip();
        frame.fill_rect(Rect::new(0, 0, 100, 100), 0xFF00FF00);
        assert_eq!(frame.get_pixel(50, 50), 0xFF00FF00);
    }

    #[test]
    fn test_fill_circle() {
        let mut buffer = vec![0u32; 20 * 20];
        let mut frame = Frame::new(&mut buffer, 20, 20);
        frame.fill_circle(10, 10, 3, 0xFF0000FF);

        assert_eq!(frame.get_pixel(10, 10), 0xFF0000FF);
        assert_eq!(frame.get_pixel(13, 10), 0xFF0000FF);
        assert_eq!(frame.get_pixel(13, 13), 0);
        assert_eq!(frame.get_pixel(14, 10), 0);
    }

    #[test]
    fn test_blit_stretched() {
        let mut buffer = vec![0u32; 8 * 8];
        let mut frame = Frame::new(&mut buffer, 8, 8);
        // 2x1 image: red, green
        let image = Image::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        frame.blit_rgba_stretched(&image, Rect::new(0, 0, 8, 4));

        assert_eq!(frame.get_pixel(0, 0), 0xFFFF0000);
        assert_eq!(frame.get_pixel(3, 3), 0xFFFF0000);
        assert_eq!(frame.get_pixel(4, 0), 0xFF00FF00);
        assert_eq!(frame.get_pixel(7, 3), 0xFF00FF00);
        assert_eq!(frame.get_pixel(0, 4), 0);
    }
}
