//! Software framebuffer: packed `0xAARRGGBB` pixels plus the handful of
//! primitives the keyboard needs.  Everything clips to the canvas.

use hand_landmarks::Frame;
use key_grid::{Point, Rect};

/// Pixel size of one font cell at text scale 1.0.
const CELL_PX_PER_SCALE: f32 = 4.0;

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, color: u32) -> Self {
        Canvas { width, height, buf: vec![color; width * height] }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn buf(&self)    -> &[u32] { &self.buf }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    /// Resize, discarding contents.
    pub fn resize(&mut self, width: usize, height: usize, color: u32) {
        self.width = width;
        self.height = height;
        self.buf.clear();
        self.buf.resize(width * height, color);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    /// Copy a camera frame onto the canvas (top-left aligned).
    pub fn blit_frame(&mut self, frame: &Frame) {
        let w = (frame.width as usize).min(self.width);
        let h = (frame.height as usize).min(self.height);
        for y in 0..h {
            for x in 0..w {
                let i = (y * frame.width as usize + x) * 3;
                let (r, g, b) = (frame.rgb[i] as u32, frame.rgb[i + 1] as u32, frame.rgb[i + 2] as u32);
                self.buf[y * self.width + x] = 0xFF000000 | (r << 16) | (g << 8) | b;
            }
        }
    }

    // ── filled shapes ─────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, r: Rect, color: u32) {
        let x0 = r.left.max(0);
        let y0 = r.top.max(0);
        let x1 = r.right.min(self.width as i32);
        let y1 = r.bottom.min(self.height as i32);
        for y in y0..y1 {
            let row = y as usize * self.width;
            for x in x0..x1 {
                self.buf[row + x as usize] = color;
            }
        }
    }

    pub fn fill_circle(&mut self, c: Point, radius: i32, color: u32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(c.x.saturating_add(dx), c.y.saturating_add(dy), color);
                }
            }
        }
    }

    /// Rectangle with quarter-circle corners; the radius is capped at half
    /// the shorter side.
    pub fn fill_rounded_rect(&mut self, r: Rect, radius: i32, color: u32) {
        let radius = radius.min(r.width() / 2).min(r.height() / 2).max(0);
        self.fill_rect(Rect::new(r.left + radius, r.top, r.right - radius, r.bottom), color);
        self.fill_rect(Rect::new(r.left, r.top + radius, r.right, r.bottom - radius), color);
        for c in [
            Point::new(r.left + radius,      r.top + radius),
            Point::new(r.right - radius - 1, r.top + radius),
            Point::new(r.left + radius,      r.bottom - radius - 1),
            Point::new(r.right - radius - 1, r.bottom - radius - 1),
        ] {
            self.fill_circle(c, radius, color);
        }
    }

    // ── outlines ──────────────────────────────────────────────────────────

    pub fn draw_border(&mut self, r: Rect, thickness: i32, color: u32) {
        let t = thickness.max(1);
        self.fill_rect(Rect::new(r.left, r.top, r.right, r.top + t), color);
        self.fill_rect(Rect::new(r.left, r.bottom - t, r.right, r.bottom), color);
        self.fill_rect(Rect::new(r.left, r.top, r.left + t, r.bottom), color);
        self.fill_rect(Rect::new(r.right - t, r.top, r.right, r.bottom), color);
    }

    /// Bresenham line with a square brush `thickness` pixels wide.  The
    /// segment is first cut to the canvas, so far-off endpoints cost nothing.
    pub fn draw_line(&mut self, a: Point, b: Point, thickness: i32, color: u32) {
        let t = thickness.max(1);
        let Some((a, b)) = self.clip_segment(a, b, t) else { return };
        let half = t / 2;
        let (mut x, mut y) = (a.x, a.y);
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.fill_rect(Rect::new(x - half, y - half, x - half + t, y - half + t), color);
            if x == b.x && y == b.y { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Liang-Barsky clip of `a`→`b` against the canvas grown by `margin` on
    /// every side.  `None` when the segment misses it entirely.
    fn clip_segment(&self, a: Point, b: Point, margin: i32) -> Option<(Point, Point)> {
        let m = margin as f64;
        let (xmin, ymin) = (-m, -m);
        let (xmax, ymax) = (self.width as f64 + m, self.height as f64 + m);
        let inside = |p: Point| {
            let (x, y) = (p.x as f64, p.y as f64);
            xmin <= x && x <= xmax && ymin <= y && y <= ymax
        };
        if inside(a) && inside(b) {
            return Some((a, b));
        }

        let (x0, y0) = (a.x as f64, a.y as f64);
        let (dx, dy) = (b.x as f64 - x0, b.y as f64 - y0);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 { return None; }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 { return None; }
                t0 = t0.max(r);
            } else {
                if r < t0 { return None; }
                t1 = t1.min(r);
            }
        }
        let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
        Some((at(t0), at(t1)))
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draw `text` with its top-left corner at `(x, y)`, each font cell
    /// `cell` pixels square.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, cell: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        let px = cx + col * cell;
                        let py = y + row as i32 * cell;
                        self.fill_rect(Rect::new(px, py, px + cell, py + cell), color);
                    }
                }
            }
            cx += 4 * cell; // 3 wide + 1 gap
            if cx >= self.width as i32 { break; }
        }
    }
}

/// Cell size for a text scale (1.0 ≈ a 12 × 20 px glyph).
pub fn cell_px(scale: f32) -> i32 {
    ((scale * CELL_PX_PER_SCALE) as i32).max(1)
}

/// Pixel extent of `text` at a given cell size (no trailing gap).
pub fn text_size(text: &str, cell: i32) -> (i32, i32) {
    let n = text.chars().count() as i32;
    if n == 0 {
        return (0, 5 * cell);
    }
    ((4 * n - 1) * cell, 5 * cell)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/'  => [0b001, 0b001, 0b010, 0b100, 0b100],
        '\\' => [0b100, 0b100, 0b010, 0b001, 0b001],
        '-'  => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_'  => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.'  => [0b000, 0b000, 0b000, 0b000, 0b010],
        ','  => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':'  => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';'  => [0b000, 0b010, 0b000, 0b010, 0b100],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '='  => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+'  => [0b000, 0b010, 0b111, 0b010, 0b000],
        '['  => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']'  => [0b011, 0b001, 0b001, 0b001, 0b011],
        '<'  => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>'  => [0b100, 0b010, 0b001, 0b010, 0b100],
        '\n' => [0b001, 0b001, 0b101, 0b111, 0b100], // return arrow
        ' '  => [0b000, 0b000, 0b000, 0b000, 0b000],
        _    => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const BG: u32 = 0xFF000000;
    const FG: u32 = 0xFFFFFFFF;

    #[test]
    fn fill_rect_clips() {
        let mut c = Canvas::new(10, 10, BG);
        c.fill_rect(Rect::new(-5, -5, 3, 3), FG);
        assert_eq!(c.get(0, 0), Some(FG));
        assert_eq!(c.get(2, 2), Some(FG));
        assert_eq!(c.get(3, 3), Some(BG));
        c.fill_rect(Rect::new(8, 8, 50, 50), FG);
        assert_eq!(c.get(9, 9), Some(FG));
    }

    #[test]
    fn rounded_rect_leaves_corners() {
        let mut c = Canvas::new(40, 40, BG);
        c.fill_rounded_rect(Rect::new(0, 0, 40, 40), 10, FG);
        assert_eq!(c.get(0, 0), Some(BG));
        assert_eq!(c.get(20, 20), Some(FG));
        assert_eq!(c.get(20, 0), Some(FG));
        assert_eq!(c.get(0, 20), Some(FG));
    }

    #[test]
    fn border_is_hollow() {
        let mut c = Canvas::new(20, 20, BG);
        c.draw_border(Rect::new(2, 2, 18, 18), 2, FG);
        assert_eq!(c.get(2, 2), Some(FG));
        assert_eq!(c.get(17, 10), Some(FG));
        assert_eq!(c.get(10, 10), Some(BG));
    }

    #[test]
    fn line_hits_endpoints() {
        let mut c = Canvas::new(20, 20, BG);
        c.draw_line(Point::new(1, 1), Point::new(15, 9), 1, FG);
        assert_eq!(c.get(1, 1), Some(FG));
        assert_eq!(c.get(15, 9), Some(FG));
    }

    #[test]
    fn line_with_far_endpoints_is_clipped() {
        let mut c = Canvas::new(20, 20, BG);
        c.draw_line(Point::new(i32::MIN, 10), Point::new(i32::MAX, 10), 1, FG);
        assert_eq!(c.get(0, 10), Some(FG));
        assert_eq!(c.get(19, 10), Some(FG));
        assert_eq!(c.get(10, 9), Some(BG));

        // Entirely off-canvas: nothing drawn.
        let mut c = Canvas::new(20, 20, BG);
        c.draw_line(Point::new(-1_000_000, -5_000), Point::new(1_000_000, -5_000), 3, FG);
        assert!(c.buf().iter().all(|&p| p == BG));
    }

    #[test]
    fn circle_at_extreme_center_does_not_overflow() {
        let mut c = Canvas::new(10, 10, BG);
        c.fill_circle(Point::new(i32::MAX, i32::MIN), 8, FG);
        assert!(c.buf().iter().all(|&p| p == BG));
    }

    #[test]
    fn text_size_scales() {
        assert_eq!(text_size("ab", 2), (14, 10));
        assert_eq!(text_size("", 3), (0, 15));
        assert_eq!(cell_px(0.8), 3);
        assert_eq!(cell_px(0.01), 1);
    }

    #[test]
    fn draw_text_marks_pixels() {
        let mut c = Canvas::new(20, 10, BG);
        c.draw_text("1", 0, 0, 1, FG);
        // '1' top row is 0b010
        assert_eq!(c.get(0, 0), Some(BG));
        assert_eq!(c.get(1, 0), Some(FG));
    }

    #[test]
    fn blit_copies_rgb() {
        let mut c = Canvas::new(2, 1, BG);
        let f = Frame::from_rgb(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        c.blit_frame(&f);
        assert_eq!(c.get(0, 0), Some(0xFFFF0000));
        assert_eq!(c.get(1, 0), Some(0xFF0000FF));
    }
}
