//! Software coverage buffer that paints spans
//!
//! The rasterizer hands out raw spans; this is the consumer side. It owns the
//! work the rasterizer leaves out: ordering span endpoints and clipping to the
//! surface.

use crate::span::Span;

pub const DEFAULT_WIDTH: u32 = 80;
pub const DEFAULT_HEIGHT: u32 = 48;

/// One byte per pixel, row-major
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn clear(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.pixels[self.pixel_index(x as u32, y as u32)])
    }

    /// Visible part of the row `y` between `x1` and `x2` in either order
    fn clip_row(&self, x1: i32, x2: i32, y: i32) -> Option<std::ops::Range<usize>> {
        if y < 0 || y >= self.height as i32 {
            return None;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return None;
        }

        let row = self.pixel_index(0, y as u32);
        Some(row + start as usize..row + end as usize + 1)
    }

    /// Horizontal line, endpoints inclusive
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, value: u8) {
        if let Some(range) = self.clip_row(x1, x2, y) {
            self.pixels[range].fill(value);
        }
    }

    /// Horizontal line that adds to what is already there, saturating.
    /// Overlapping spans show up as values above 1.
    pub fn hline_additive(&mut self, x1: i32, x2: i32, y: i32, value: u8) {
        if let Some(range) = self.clip_row(x1, x2, y) {
            for p in &mut self.pixels[range] {
                *p = p.saturating_add(value);
            }
        }
    }

    pub fn fill_spans(&mut self, spans: &[Span], value: u8) {
        for span in spans {
            self.hline(span.x1, span.x2, span.y, value);
        }
    }

    pub fn fill_spans_additive(&mut self, spans: &[Span], value: u8) {
        for span in spans {
            self.hline_additive(span.x1, span.x2, span.y, value);
        }
    }

    /// Pixels with a non-zero value
    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// `.` for empty, `#` for painted once, `@` for painted more than once
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.pixels.chunks_exact(self.width.max(1) as usize) {
            for &p in row {
                out.push(match p {
                    0 => '.',
                    1 => '#',
                    _ => '@',
                });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hline_normalizes_endpoints() {
        let mut canvas = Canvas::with_size(10, 2);
        canvas.hline(7, 2, 1, 1);
        assert_eq!(canvas.count_set(), 6);
        assert_eq!(canvas.get(2, 1), Some(1));
        assert_eq!(canvas.get(7, 1), Some(1));
        assert_eq!(canvas.get(8, 1), Some(0));
        assert_eq!(canvas.get(2, 0), Some(0));
    }

    #[test]
    fn test_hline_clips_to_surface() {
        let mut canvas = Canvas::with_size(4, 4);
        canvas.hline(-10, 100, 2, 1);
        canvas.hline(0, 3, -1, 1);
        canvas.hline(0, 3, 4, 1);
        canvas.hline(5, 9, 0, 1);
        assert_eq!(canvas.count_set(), 4);
        assert_eq!(canvas.get(-1, 2), None);
    }

    #[test]
    fn test_additive_marks_overlap() {
        let mut canvas = Canvas::with_size(5, 1);
        canvas.fill_spans_additive(&[Span::new(0, 2, 0), Span::new(4, 2, 0)], 1);
        assert_eq!(canvas.as_bytes(), &[1, 1, 2, 1, 1]);
        assert_eq!(canvas.to_ascii(), "##@##\n");
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::with_size(3, 3);
        canvas.fill_spans(&[Span::new(0, 2, 0), Span::new(0, 2, 2)], 9);
        assert_eq!(canvas.count_set(), 6);
        canvas.clear(0);
        assert_eq!(canvas.count_set(), 0);
    }
}
