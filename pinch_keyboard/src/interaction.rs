//! Per-frame hover / pinch / debounce logic.
//!
//! [`step`] takes the current [`InteractionState`] and this frame's hands and
//! returns the next state plus a [`FrameReport`] for the renderer.  Nothing
//! here touches a camera or a window.

use std::time::{Duration, Instant};

use hand_landmarks::HandLandmarks;
use key_grid::{distance, KeyBoxes, Point};
use tracing::debug;

use crate::config::KeyboardConfig;
use crate::dispatch::{dispatch, InteractionState};
use crate::inject::KeySink;

// ════════════════════════════════════════════════════════════════════════════
// PinchRules
// ════════════════════════════════════════════════════════════════════════════

/// When a pinch counts as a key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchRules {
    /// Fingertip-to-thumb distance must be strictly below this.
    pub threshold_px: f32,
    /// A new press is accepted only once strictly more than this has passed
    /// since the last accepted one, whichever key it was on.
    pub debounce:     Duration,
}

impl Default for PinchRules {
    fn default() -> Self {
        PinchRules { threshold_px: 25.0, debounce: Duration::from_millis(500) }
    }
}

impl From<&KeyboardConfig> for PinchRules {
    fn from(cfg: &KeyboardConfig) -> Self {
        PinchRules { threshold_px: cfg.pinch_threshold_px, debounce: cfg.debounce() }
    }
}

impl PinchRules {
    pub fn gate_open(&self, state: &InteractionState, now: Instant) -> bool {
        match state.last_tap {
            None    => true,
            Some(t) => now.saturating_duration_since(t) > self.debounce,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FrameReport
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No hand, or no key under the fingertip.
    Idle,
    /// Fingertip over a key, ready to accept a pinch.
    Hovering,
    /// A press was accepted recently; pinches are ignored.
    Debounced,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle      => "idle",
            Phase::Hovering  => "hovering",
            Phase::Debounced => "debounced",
        }
    }
}

/// One hand as the keyboard saw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandReading {
    pub fingertip: Point,
    pub thumb:     Point,
    pub pinch_px:  f32,
    pub hovered:   Option<&'static str>,
}

/// What happened this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Key to highlight.
    pub hovered:  Option<&'static str>,
    pub hands:    Vec<HandReading>,
    /// Key whose press was accepted this frame.
    pub accepted: Option<&'static str>,
    pub phase:    Phase,
}

// ════════════════════════════════════════════════════════════════════════════
// step
// ════════════════════════════════════════════════════════════════════════════

/// Advance the interaction by one frame.
///
/// Hands are handled in detector order.  Each hand is hit-tested and
/// pinch-tested on its own; the highlighted key is the one under the last
/// hand that is over any key.
pub fn step(
    mut state: InteractionState,
    boxes:     &KeyBoxes,
    hands:     &[HandLandmarks],
    now:       Instant,
    rules:     &PinchRules,
    sink:      &mut dyn KeySink,
) -> (InteractionState, FrameReport) {
    let (w, h) = boxes.canvas_size();
    let mut report = FrameReport {
        hovered:  None,
        hands:    Vec::with_capacity(hands.len()),
        accepted: None,
        phase:    Phase::Idle,
    };

    for hand in hands {
        let fingertip = hand.index_tip_px(w, h);
        let thumb     = hand.thumb_tip_px(w, h);
        let hovered   = boxes.hit_test(fingertip).map(|b| b.key.id);
        let pinch_px  = distance(fingertip, thumb);

        if hovered.is_some() {
            report.hovered = hovered;
        }

        if let Some(key) = hovered {
            if pinch_px < rules.threshold_px && rules.gate_open(&state, now) {
                debug!(key, pinch_px, "tap accepted");
                state = dispatch(state, key, sink);
                state.last_tap = Some(now);
                report.accepted = Some(key);
            }
        }

        report.hands.push(HandReading { fingertip, thumb, pinch_px, hovered });
    }

    report.phase = if !rules.gate_open(&state, now) {
        Phase::Debounced
    } else if report.hovered.is_some() {
        Phase::Hovering
    } else {
        Phase::Idle
    };

    (state, report)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::{InjectError, SpecialKey};
    use key_grid::compute_key_boxes;

    #[derive(Default)]
    struct Typed(String);

    impl KeySink for Typed {
        fn press(&mut self, _key: SpecialKey) -> Result<(), InjectError> { Ok(()) }
        fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
            self.0.push_str(text);
            Ok(())
        }
        fn name(&self) -> &str { "typed" }
    }

    fn hand_at(p: Point, thumb_dx: f32) -> HandLandmarks {
        let (x, y) = (p.x as f32 + 0.5, p.y as f32 + 0.5);
        HandLandmarks::synthetic((x, y), (x + thumb_dx, y), 1280, 720)
    }

    fn key_center(boxes: &KeyBoxes, id: &str) -> Point {
        boxes.rect_of(id).unwrap().center()
    }

    #[test]
    fn no_hands_is_idle() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let (s, r) = step(InteractionState::new(), &boxes, &[], Instant::now(),
                          &PinchRules::default(), &mut sink);
        assert_eq!(r.phase, Phase::Idle);
        assert_eq!(r.hovered, None);
        assert_eq!(s, InteractionState::new());
    }

    #[test]
    fn open_hand_hovers_without_typing() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let hand = hand_at(key_center(&boxes, "g"), 60.0);
        let (s, r) = step(InteractionState::new(), &boxes, &[hand], Instant::now(),
                          &PinchRules::default(), &mut sink);
        assert_eq!(r.hovered, Some("g"));
        assert_eq!(r.phase, Phase::Hovering);
        assert_eq!(r.accepted, None);
        assert!(s.text.is_empty());
    }

    #[test]
    fn pinch_over_key_types_it() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let now = Instant::now();
        let hand = hand_at(key_center(&boxes, "k"), 5.0);
        let (s, r) = step(InteractionState::new(), &boxes, &[hand], now,
                          &PinchRules::default(), &mut sink);
        assert_eq!(r.accepted, Some("k"));
        assert_eq!(r.phase, Phase::Debounced);
        assert_eq!(s.text, "k");
        assert_eq!(s.last_tap, Some(now));
        assert_eq!(sink.0, "k");
    }

    #[test]
    fn pinch_outside_keys_does_nothing() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let hand = hand_at(Point::new(640, 40), 2.0);
        let (s, r) = step(InteractionState::new(), &boxes, &[hand], Instant::now(),
                          &PinchRules::default(), &mut sink);
        assert_eq!(r.accepted, None);
        assert!(s.last_tap.is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let hand = hand_at(key_center(&boxes, "h"), 25.0);
        let (s, r) = step(InteractionState::new(), &boxes, &[hand], Instant::now(),
                          &PinchRules::default(), &mut sink);
        assert_eq!(r.hands[0].pinch_px, 25.0);
        assert_eq!(r.accepted, None);
        assert!(s.text.is_empty());
    }

    #[test]
    fn debounce_is_global_across_keys() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let rules = PinchRules::default();
        let t0 = Instant::now();

        let (s, _) = step(InteractionState::new(), &boxes,
                          &[hand_at(key_center(&boxes, "a"), 5.0)], t0, &rules, &mut sink);
        let (s, r) = step(s, &boxes,
                          &[hand_at(key_center(&boxes, "s"), 5.0)],
                          t0 + Duration::from_millis(300), &rules, &mut sink);
        assert_eq!(r.accepted, None);
        assert_eq!(r.phase, Phase::Debounced);
        let (s, r) = step(s, &boxes,
                          &[hand_at(key_center(&boxes, "s"), 5.0)],
                          t0 + Duration::from_millis(600), &rules, &mut sink);
        assert_eq!(r.accepted, Some("s"));
        assert_eq!(s.text, "as");
        assert_eq!(s.last_tap, Some(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn exactly_debounce_apart_is_suppressed() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let rules = PinchRules::default();
        let t0 = Instant::now();
        let hand = hand_at(key_center(&boxes, "a"), 5.0);
        let (s, _) = step(InteractionState::new(), &boxes, &[hand.clone()], t0, &rules, &mut sink);
        let (s, r) = step(s, &boxes, &[hand], t0 + rules.debounce, &rules, &mut sink);
        assert_eq!(r.accepted, None);
        assert_eq!(s.text, "a");
    }

    #[test]
    fn last_hovering_hand_wins_highlight() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let first  = hand_at(key_center(&boxes, "q"), 60.0);
        let second = hand_at(key_center(&boxes, "p"), 60.0);
        let nowhere = hand_at(Point::new(5, 5), 60.0);
        let (_, r) = step(InteractionState::new(), &boxes, &[first, second, nowhere],
                          Instant::now(), &PinchRules::default(), &mut sink);
        assert_eq!(r.hovered, Some("p"));
        assert_eq!(r.hands.len(), 3);
        assert_eq!(r.hands[2].hovered, None);
    }

    #[test]
    fn two_pinching_hands_type_once() {
        let boxes = compute_key_boxes(1280, 720);
        let mut sink = Typed::default();
        let a = hand_at(key_center(&boxes, "c"), 3.0);
        let b = hand_at(key_center(&boxes, "v"), 3.0);
        let (s, r) = step(InteractionState::new(), &boxes, &[a, b],
                          Instant::now(), &PinchRules::default(), &mut sink);
        assert_eq!(s.text, "c");
        assert_eq!(r.accepted, Some("c"));
        assert_eq!(r.hovered, Some("v"));
    }
}
