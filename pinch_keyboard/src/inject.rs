//! OS keystroke injection.
//!
//! [`KeySink`] is the fire-and-forget "send this key / this text" call.  The
//! real backend uses `enigo` (feature `inject`); without it, or with
//! `--dry-run`, keystrokes are only logged.

use thiserror::Error;
use tracing::{info, warn};

/// Named keys the keyboard can send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpecialKey {
    Space,
    /// Erase the character before the cursor.
    Delete,
    Return,
}

#[derive(Debug, Error)]
pub enum InjectError {
    #[error("keystroke backend unavailable: {0}")]
    Unavailable(String),
    #[error("injection failed: {0}")]
    Failed(String),
}

/// Destination for synthetic keystrokes.
pub trait KeySink {
    fn press(&mut self, key: SpecialKey) -> Result<(), InjectError>;
    fn type_text(&mut self, text: &str) -> Result<(), InjectError>;
    fn name(&self) -> &str;
}

// ── logging backend (dry run / no `inject` feature) ───────────────────────

/// Logs every keystroke instead of sending it.
#[derive(Debug, Default)]
pub struct LogSink;

impl KeySink for LogSink {
    fn press(&mut self, key: SpecialKey) -> Result<(), InjectError> {
        info!("key {:?}", key);
        Ok(())
    }
    fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
        info!("type {:?}", text);
        Ok(())
    }
    fn name(&self) -> &str { "log" }
}

// ── enigo backend ─────────────────────────────────────────────────────────

#[cfg(feature = "inject")]
pub struct EnigoSink {
    enigo: enigo::Enigo,
}

#[cfg(feature = "inject")]
impl EnigoSink {
    pub fn new() -> Result<Self, InjectError> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| InjectError::Unavailable(e.to_string()))?;
        Ok(EnigoSink { enigo })
    }
}

#[cfg(feature = "inject")]
impl KeySink for EnigoSink {
    fn press(&mut self, key: SpecialKey) -> Result<(), InjectError> {
        use enigo::{Direction, Key, Keyboard};
        let key = match key {
            SpecialKey::Space  => Key::Space,
            SpecialKey::Delete => Key::Backspace,
            SpecialKey::Return => Key::Return,
        };
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| InjectError::Failed(e.to_string()))
    }

    fn type_text(&mut self, text: &str) -> Result<(), InjectError> {
        use enigo::Keyboard;
        self.enigo
            .text(text)
            .map_err(|e| InjectError::Failed(e.to_string()))
    }

    fn name(&self) -> &str { "enigo" }
}

// ════════════════════════════════════════════════════════════════════════════
// open_key_sink
// ════════════════════════════════════════════════════════════════════════════

/// Open the OS keystroke backend, or the logging sink when `dry_run` is set,
/// the `inject` feature is off, or the backend cannot start.
pub fn open_key_sink(dry_run: bool) -> Box<dyn KeySink> {
    if dry_run {
        info!("dry run: keystrokes will be logged, not sent");
        return Box::new(LogSink);
    }

    #[cfg(feature = "inject")]
    {
        match EnigoSink::new() {
            Ok(sink) => return Box::new(sink),
            Err(e) => warn!("{}; logging keystrokes instead", e),
        }
    }
    #[cfg(not(feature = "inject"))]
    warn!("built without the `inject` feature; logging keystrokes instead");

    Box::new(LogSink)
}
