//! The static keyboard table and its projection onto a pixel canvas.

use std::fmt;

use crate::geometry::{Point, Rect};

// ════════════════════════════════════════════════════════════════════════════
// KeyDescriptor
// ════════════════════════════════════════════════════════════════════════════

/// One key of the static layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDescriptor {
    /// Identifier handed to the dispatcher (`"a"`, `"shift"`, `"Space"`).
    pub id:    &'static str,
    /// Text drawn on the key face.
    pub label: &'static str,
    /// Multiple of the base key width.
    pub width: f32,
}

impl KeyDescriptor {
    /// Width in pixels for a given base key width, truncated.
    pub fn pixel_width(&self, base: i32) -> i32 {
        (base as f32 * self.width) as i32
    }
}

const fn key(id: &'static str)   -> KeyDescriptor { KeyDescriptor { id, label: id, width: 1.0 } }
const fn wide(id: &'static str)  -> KeyDescriptor { KeyDescriptor { id, label: id, width: 1.5 } }
const fn space(id: &'static str) -> KeyDescriptor { KeyDescriptor { id, label: id, width: 4.0 } }

const ROW_0: [KeyDescriptor; 14] = [
    key("esc"), key("1"), key("2"), key("3"), key("4"), key("5"), key("6"),
    key("7"), key("8"), key("9"), key("0"), key("-"), key("="), wide("delete"),
];
const ROW_1: [KeyDescriptor; 14] = [
    wide("tab"), key("q"), key("w"), key("e"), key("r"), key("t"), key("y"),
    key("u"), key("i"), key("o"), key("p"), key("["), key("]"), key("\\"),
];
const ROW_2: [KeyDescriptor; 13] = [
    wide("capslock"), key("a"), key("s"), key("d"), key("f"), key("g"), key("h"),
    key("j"), key("k"), key("l"), key(";"), key("'"), wide("return"),
];
const ROW_3: [KeyDescriptor; 12] = [
    wide("shift"), key("z"), key("x"), key("c"), key("v"), key("b"), key("n"),
    key("m"), key(","), key("."), key("/"), wide("shift"),
];
const ROW_4: [KeyDescriptor; 7] = [
    key("control"), key("option"), key("command"), space("Space"),
    key("command"), key("option"), key("<"),
];

/// The five keyboard rows, top to bottom, keys left to right.
pub static ROWS: [&[KeyDescriptor]; 5] = [&ROW_0, &ROW_1, &ROW_2, &ROW_3, &ROW_4];

// ════════════════════════════════════════════════════════════════════════════
// KeyBoxes
// ════════════════════════════════════════════════════════════════════════════

/// A key together with the pixel rectangle it occupies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyBox {
    pub key:  &'static KeyDescriptor,
    pub rect: Rect,
    /// Row index in [`ROWS`].
    pub row:  usize,
}

/// Every key's rectangle for one canvas size, in layout order.
///
/// This is a list of boxes, not an id → rectangle map.  Duplicate
/// identifiers (`shift`, `command`, `option`) each keep their own box, so the
/// left and right instances can both be hovered and pressed.  A per-id map
/// would keep only the last instance of each.
///
/// `Display` renders the boxes as a table grouped by row; see
/// [`print_boxes`].
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBoxes {
    width:  u32,
    height: u32,
    boxes:  Vec<KeyBox>,
}

impl KeyBoxes {
    /// Lay out [`ROWS`] on a `width × height` canvas.
    ///
    /// Every row starts at the left edge that would center row 0.  Boxes are
    /// clipped to the canvas.
    pub fn compute(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;

        let key_w = w / 16;
        let key_h = h / 12;
        let x_gap = key_w / 10;
        let y_gap = key_h / 5;
        let start_x = w / 2 - (ROWS[0].len() as i32 * (key_w + x_gap)) / 2;

        let mut boxes = Vec::with_capacity(ROWS.iter().map(|r| r.len()).sum());
        let mut y = h / 3;
        for (row, keys) in ROWS.iter().enumerate() {
            let mut x = start_x;
            for key in keys.iter() {
                let kw = key.pixel_width(key_w);
                let rect = Rect::new(x, y, x + kw, y + key_h).clamp_to(w, h);
                boxes.push(KeyBox { key, rect, row });
                x += kw + x_gap;
            }
            y += key_h + y_gap;
        }

        KeyBoxes { width, height, boxes }
    }

    pub fn canvas_size(&self) -> (u32, u32) { (self.width, self.height) }
    pub fn len(&self)         -> usize      { self.boxes.len() }
    pub fn is_empty(&self)    -> bool       { self.boxes.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &KeyBox> {
        self.boxes.iter()
    }

    /// First key (in layout order) whose rectangle strictly contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<&KeyBox> {
        self.boxes.iter().find(|b| b.rect.contains(p))
    }

    /// Rectangle of the first key with identifier `id`.
    pub fn rect_of(&self, id: &str) -> Option<Rect> {
        self.boxes.iter().find(|b| b.key.id == id).map(|b| b.rect)
    }
}

/// Convenience wrapper for [`KeyBoxes::compute`].
pub fn compute_key_boxes(width: u32, height: u32) -> KeyBoxes {
    KeyBoxes::compute(width, height)
}

impl fmt::Display for KeyBoxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Canvas: {} × {}", self.width, self.height)?;
        writeln!(f)?;
        for row in 0..ROWS.len() {
            writeln!(f, "  ┌─ row {} ─", row)?;
            for b in self.iter().filter(|b| b.row == row) {
                let r = b.rect;
                writeln!(
                    f,
                    "  │  {:<10} ({:>5}, {:>5}) → ({:>5}, {:>5})   {:>4} × {:<4}",
                    b.key.label, r.left, r.top, r.right, r.bottom, r.width(), r.height()
                )?;
            }
            writeln!(f, "  └─")?;
        }
        writeln!(f)?;
        writeln!(f, "  {} keys", self.len())
    }
}

/// Print the row-by-row box table to stdout.
pub fn print_boxes(boxes: &KeyBoxes) {
    println!();
    print!("{}", boxes);
    println!();
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
