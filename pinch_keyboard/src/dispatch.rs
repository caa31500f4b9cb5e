//! Key identifier → keystroke + text-buffer update.

use std::time::Instant;

use tracing::warn;

use crate::inject::{KeySink, SpecialKey};

// ════════════════════════════════════════════════════════════════════════════
// InteractionState
// ════════════════════════════════════════════════════════════════════════════

/// Everything a session remembers between frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// What has been typed so far.  Only ever appended to or trimmed by one.
    pub text:      String,
    pub caps_lock: bool,
    /// One-shot: cleared by the next non-modifier key.
    pub shift:     bool,
    /// When the last pinch was accepted; `None` before the first.
    pub last_tap:  Option<Instant>,
}

impl InteractionState {
    pub fn new() -> Self { Self::default() }

    pub fn uppercase(&self) -> bool { self.caps_lock || self.shift }

    /// The last `n` characters of the buffer.
    pub fn tail(&self, n: usize) -> &str {
        let count = self.text.chars().count();
        match self.text.char_indices().nth(count.saturating_sub(n)) {
            Some((i, _)) => &self.text[i..],
            None         => "",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyAction
// ════════════════════════════════════════════════════════════════════════════

/// What pressing a key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction<'a> {
    Space,
    Delete,
    Return,
    CapsLock,
    Shift,
    /// Type the identifier itself.
    Text(&'a str),
}

impl<'a> KeyAction<'a> {
    pub fn for_key(id: &'a str) -> Self {
        match id {
            "Space"    => KeyAction::Space,
            "delete"   => KeyAction::Delete,
            "return"   => KeyAction::Return,
            "capslock" => KeyAction::CapsLock,
            "shift"    => KeyAction::Shift,
            other      => KeyAction::Text(other),
        }
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, KeyAction::CapsLock | KeyAction::Shift)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// dispatch
// ════════════════════════════════════════════════════════════════════════════

/// Apply one accepted key press.
///
/// Injection failures are logged; the buffer and modifiers change either
/// way.  The debounce timestamp is left to the caller.
pub fn dispatch(mut state: InteractionState, key_id: &str, sink: &mut dyn KeySink) -> InteractionState {
    match KeyAction::for_key(key_id) {
        KeyAction::Space => {
            report(sink.press(SpecialKey::Space), key_id);
            state.text.push(' ');
        }
        KeyAction::Delete => {
            report(sink.press(SpecialKey::Delete), key_id);
            state.text.pop();
        }
        KeyAction::Return => {
            report(sink.press(SpecialKey::Return), key_id);
            state.text.push('\n');
        }
        KeyAction::CapsLock => {
            state.caps_lock = !state.caps_lock;
        }
        KeyAction::Shift => {
            state.shift = true;
        }
        KeyAction::Text(id) => {
            let typed = if state.uppercase() { id.to_uppercase() } else { id.to_string() };
            report(sink.type_text(&typed), key_id);
            state.text.push_str(&typed);
            state.shift = false;
        }
    }
    state
}

fn report(result: Result<(), crate::inject::InjectError>, key_id: &str) {
    if let Err(e) = result {
        warn!(key = key_id, "{}", e);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
