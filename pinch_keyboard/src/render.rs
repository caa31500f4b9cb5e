//! Composes one frame: background, keyboard, hand overlay, typed text.

use hand_landmarks::{Frame, HandLandmarks, HAND_CONNECTIONS};
use key_grid::{KeyBoxes, Rect};

use crate::canvas::{cell_px, text_size, Canvas};

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

pub const BG_COLOR:        u32 = 0xFFF0F0F0;  // light gray
pub const KEY_COLOR:       u32 = 0xFFFFE6EB;  // soft pink
pub const HOVER_COLOR:     u32 = 0xFFFFB6C1;  // darker pink
pub const BORDER_COLOR:    u32 = 0xFFC8C8C8;
pub const LABEL_COLOR:     u32 = 0xFF323232;
pub const TEXT_COLOR:      u32 = 0xFF000000;
pub const BONE_COLOR:      u32 = 0xFF30C030;
pub const JOINT_COLOR:     u32 = 0xFFFF3030;
pub const INDEX_MARKER:    u32 = 0xFF0000FF;
pub const THUMB_MARKER:    u32 = 0xFFFF0000;
const STATUS_BG:           u32 = 0xFFDCDCDC;
const STATUS_FG:           u32 = 0xFF505050;

const KEY_RADIUS:     i32 = 15;
const BORDER_PX:      i32 = 2;
const LABEL_MAX_SCALE: f32 = 0.8;
const MARKER_RADIUS:  i32 = 8;
const JOINT_RADIUS:   i32 = 3;
/// Baseline of the typed-text overlay.
const TEXT_ORIGIN:    (i32, i32) = (20, 100);
const STATUS_H:       i32 = 22;

/// Text scale that fits `label` inside a key `width` pixels wide.
pub fn label_scale(label: &str, width: i32) -> f32 {
    let len = label.chars().count().max(1) as f32;
    LABEL_MAX_SCALE.min((width - 10) as f32 / (len * 15.0))
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// Everything drawn in one frame.
pub struct Scene<'a> {
    pub boxes:   &'a KeyBoxes,
    /// Every key with this identifier is highlighted.
    pub hovered: Option<&'a str>,
    pub hands:   &'a [HandLandmarks],
    /// Already trimmed to the tail that should be shown.
    pub text:    &'a str,
    /// Camera image drawn instead of the flat background.
    pub camera:  Option<&'a Frame>,
    pub status:  Option<&'a str>,
}

/// Redraw the whole canvas.
pub fn render_frame(canvas: &mut Canvas, scene: &Scene) {
    match scene.camera {
        Some(frame) => {
            canvas.clear(BG_COLOR);
            canvas.blit_frame(frame);
        }
        None => canvas.clear(BG_COLOR),
    }

    for b in scene.boxes.iter() {
        draw_key(canvas, b.rect, b.key.label, scene.hovered == Some(b.key.id));
    }

    let (w, h) = scene.boxes.canvas_size();
    for hand in scene.hands {
        draw_hand(canvas, hand, w, h);
    }

    let cell = cell_px(1.0);
    let (_, th) = text_size(scene.text, cell);
    canvas.draw_text(scene.text, TEXT_ORIGIN.0, TEXT_ORIGIN.1 - th, cell, TEXT_COLOR);

    if let Some(status) = scene.status {
        draw_status(canvas, status);
    }
}

fn draw_key(canvas: &mut Canvas, r: Rect, label: &str, hover: bool) {
    let face = if hover { HOVER_COLOR } else { KEY_COLOR };
    canvas.fill_rounded_rect(r, KEY_RADIUS, face);
    canvas.draw_border(r, BORDER_PX, BORDER_COLOR);

    let cell = cell_px(label_scale(label, r.width()));
    let (tw, th) = text_size(label, cell);
    let tx = r.left + (r.width() - tw) / 2;
    let ty = r.top + (r.height() - th) / 2;
    canvas.draw_text(label, tx, ty, cell, LABEL_COLOR);
}

fn draw_hand(canvas: &mut Canvas, hand: &HandLandmarks, w: u32, h: u32) {
    let pts = hand.pixel_points(w, h);
    for &(a, b) in HAND_CONNECTIONS.iter() {
        canvas.draw_line(pts[a], pts[b], 2, BONE_COLOR);
    }
    for &p in pts.iter() {
        canvas.fill_circle(p, JOINT_RADIUS, JOINT_COLOR);
    }
    canvas.fill_circle(hand.index_tip_px(w, h), MARKER_RADIUS, INDEX_MARKER);
    canvas.fill_circle(hand.thumb_tip_px(w, h), MARKER_RADIUS, THUMB_MARKER);
}

fn draw_status(canvas: &mut Canvas, status: &str) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    canvas.fill_rect(Rect::new(0, h - STATUS_H, w, h), STATUS_BG);
    canvas.draw_text(status, 10, h - STATUS_H + 6, 2, STATUS_FG);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use key_grid::compute_key_boxes;

    fn scene<'a>(boxes: &'a KeyBoxes, hovered: Option<&'a str>, hands: &'a [HandLandmarks], text: &'a str) -> Scene<'a> {
        Scene { boxes, hovered, hands, text, camera: None, status: None }
    }

    fn face_sample(r: Rect) -> (i32, i32) {
        (r.center().x, r.top + 4)
    }

    #[test]
    fn label_scale_caps_and_shrinks() {
        assert_eq!(label_scale("a", 80), 0.8);
        let s = label_scale("capslock", 60);
        assert!((s - 50.0 / 120.0).abs() < 1e-6);
    }

    #[test]
    fn labels_fit_their_keys() {
        for &(w, h) in &[(640u32, 480u32), (1280, 720), (1920, 1080)] {
            for b in compute_key_boxes(w, h).iter() {
                let cell = cell_px(label_scale(b.key.label, b.rect.width()));
                let (tw, _) = text_size(b.key.label, cell);
                assert!(tw <= b.rect.width(), "{}x{} {} {} > {}", w, h, b.key.label, tw, b.rect.width());
            }
        }
    }

    #[test]
    fn background_and_keys() {
        let boxes = compute_key_boxes(1280, 720);
        let mut c = Canvas::new(1280, 720, 0);
        render_frame(&mut c, &scene(&boxes, None, &[], ""));
        assert_eq!(c.get(5, 5), Some(BG_COLOR));
        let (x, y) = face_sample(boxes.rect_of("a").unwrap());
        assert_eq!(c.get(x, y), Some(KEY_COLOR));
    }

    #[test]
    fn hovered_key_highlighted() {
        let boxes = compute_key_boxes(1280, 720);
        let mut c = Canvas::new(1280, 720, 0);
        render_frame(&mut c, &scene(&boxes, Some("a"), &[], ""));
        let (x, y) = face_sample(boxes.rect_of("a").unwrap());
        assert_eq!(c.get(x, y), Some(HOVER_COLOR));
        let (x, y) = face_sample(boxes.rect_of("s").unwrap());
        assert_eq!(c.get(x, y), Some(KEY_COLOR));
    }

    #[test]
    fn both_shift_keys_highlight() {
        let boxes = compute_key_boxes(1280, 720);
        let mut c = Canvas::new(1280, 720, 0);
        render_frame(&mut c, &scene(&boxes, Some("shift"), &[], ""));
        for b in boxes.iter().filter(|b| b.key.id == "shift") {
            let (x, y) = face_sample(b.rect);
            assert_eq!(c.get(x, y), Some(HOVER_COLOR));
        }
    }

    #[test]
    fn hand_markers_drawn() {
        let boxes = compute_key_boxes(1280, 720);
        let hand = HandLandmarks::synthetic((600.5, 150.5), (700.5, 180.5), 1280, 720);
        let mut c = Canvas::new(1280, 720, 0);
        render_frame(&mut c, &scene(&boxes, None, std::slice::from_ref(&hand), ""));
        assert_eq!(c.get(600, 150), Some(INDEX_MARKER));
        assert_eq!(c.get(700, 180), Some(THUMB_MARKER));
    }

    #[test]
    fn text_overlay_drawn_above_baseline() {
        let boxes = compute_key_boxes(1280, 720);
        let mut c = Canvas::new(1280, 720, 0);
        render_frame(&mut c, &scene(&boxes, None, &[], "8"));
        // '8' top row is solid: cells start at (20, 100 - 20)
        assert_eq!(c.get(21, 81), Some(TEXT_COLOR));
        assert_eq!(c.get(21, 101), Some(BG_COLOR));
    }

    #[test]
    fn status_bar_at_bottom() {
        let boxes = compute_key_boxes(640, 480);
        let mut c = Canvas::new(640, 480, 0);
        let s = Scene { status: Some("idle"), ..scene(&boxes, None, &[], "") };
        render_frame(&mut c, &s);
        assert_eq!(c.get(630, 475), Some(STATUS_BG));
    }
}
