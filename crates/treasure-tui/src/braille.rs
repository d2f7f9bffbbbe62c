#![forbid(unsafe_code)]

//! Braille dot painter.
//!
//! Each terminal cell holds a 2×4 grid of dots (U+2800..U+28FF). The page
//! simulates in pixels; the painter maps `px_per_dot` pixels onto one dot so
//! link distances keep roughly the same on-screen meaning as in a browser.

use treasure_core::{Rgba, Surface};

/// Dot columns per cell.
pub const DOTS_X: u16 = 2;
/// Dot rows per cell.
pub const DOTS_Y: u16 = 4;

// Braille dot numbering to bit mapping:
// dot 1 (0,0) = bit 0    dot 4 (1,0) = bit 3
// dot 2 (0,1) = bit 1    dot 5 (1,1) = bit 4
// dot 3 (0,2) = bit 2    dot 6 (1,2) = bit 5
// dot 7 (0,3) = bit 6    dot 8 (1,3) = bit 7
const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

/// Dot grid covering `cols` × `rows` cells.
#[derive(Debug, Clone)]
pub struct BraillePainter {
    cols: u16,
    rows: u16,
    px_per_dot: f64,
    /// Row-major dot colors; `None` = off.
    dots: Vec<Option<Rgba>>,
}

impl BraillePainter {
    pub fn new(cols: u16, rows: u16, px_per_dot: f64) -> Self {
        let len = usize::from(cols) * usize::from(DOTS_X) * usize::from(rows) * usize::from(DOTS_Y);
        Self {
            cols,
            rows,
            px_per_dot,
            dots: vec![None; len],
        }
    }

    /// Resize to a new cell grid, dropping everything drawn.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows, self.px_per_dot);
    }

    /// Cell grid size.
    pub fn cell_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Surface size in pixels.
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            f64::from(self.width()) * self.px_per_dot,
            f64::from(self.height()) * self.px_per_dot,
        )
    }

    /// Pixel at the center of cell `(col, row)`.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        let cell_w = f64::from(DOTS_X) * self.px_per_dot;
        let cell_h = f64::from(DOTS_Y) * self.px_per_dot;
        (
            (f64::from(col) + 0.5) * cell_w,
            (f64::from(row) + 0.5) * cell_h,
        )
    }

    fn width(&self) -> i32 {
        i32::from(self.cols) * i32::from(DOTS_X)
    }

    fn height(&self) -> i32 {
        i32::from(self.rows) * i32::from(DOTS_Y)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        Some(y as usize * self.width() as usize + x as usize)
    }

    /// Light a dot. Of overlapping colors the most opaque wins.
    pub fn point(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            match self.dots[idx] {
                Some(prev) if prev.a() > color.a() => {}
                _ => self.dots[idx] = Some(color),
            }
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).and_then(|i| self.dots[i])
    }

    /// Bresenham line between dots.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (x0, y0);

        loop {
            self.point(cx, cy, color);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    /// Filled disc; always lights at least the center dot.
    pub fn disc(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        self.point(cx, cy, color);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.point(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn to_dot(&self, px: f64) -> i32 {
        (px / self.px_per_dot).floor() as i32
    }

    /// Glyph and color of cell `(col, row)`. Blank cells give `(' ', None)`.
    pub fn cell(&self, col: u16, row: u16) -> (char, Option<Rgba>) {
        let px_x = i32::from(col) * i32::from(DOTS_X);
        let px_y = i32::from(row) * i32::from(DOTS_Y);
        let mut bits: u32 = 0;
        let mut color: Option<Rgba> = None;

        for (dx, column) in DOT_BITS.iter().enumerate() {
            for (dy, bit) in column.iter().enumerate() {
                if let Some(c) = self.get(px_x + dx as i32, px_y + dy as i32) {
                    bits |= 1 << *bit;
                    if color.is_none_or(|prev| c.a() > prev.a()) {
                        color = Some(c);
                    }
                }
            }
        }

        match bits {
            0 => (' ', None),
            _ => (char::from_u32(0x2800 + bits).unwrap_or(' '), color),
        }
    }
}

impl Surface for BraillePainter {
    fn clear(&mut self) {
        self.dots.fill(None);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        let r = (radius / self.px_per_dot).round() as i32;
        self.disc(self.to_dot(x), self.to_dot(y), r.max(0), color);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: Rgba) {
        let (x0, y0) = (self.to_dot(from.0), self.to_dot(from.1));
        let (x1, y1) = (self.to_dot(to.0), self.to_dot(to.1));
        self.line(x0, y0, x1, y1, color);
    }
}
