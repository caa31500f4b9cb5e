//! The detector capability.

use std::collections::VecDeque;

use crate::{DetectError, Frame, HandLandmarks};

/// Anything that turns a frame into zero or more hands.
///
/// Called once per frame, synchronously.  Hands are returned in the order
/// the underlying model reports them.
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectError>;

    /// Human-readable name for logs.
    fn name(&self) -> &str { "detector" }
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectError> {
        (**self).detect(frame)
    }
    fn name(&self) -> &str { (**self).name() }
}

/// Replays a fixed sequence of per-frame hand sets, then reports no hands.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDetector {
    script: VecDeque<Vec<HandLandmarks>>,
}

impl ScriptedDetector {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Vec<HandLandmarks>>,
    {
        ScriptedDetector { script: script.into_iter().collect() }
    }

    /// Frames left in the script.
    pub fn remaining(&self) -> usize { self.script.len() }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<HandLandmarks>, DetectError> {
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn name(&self) -> &str { "scripted" }
}
