//! Simulation mode: the mouse stands in for a hand.
//!
//! The visualizer sends [`SimInput`] samples over a channel; [`PointerDetector`]
//! turns the latest one into a synthetic hand whose index fingertip sits
//! under the pointer.  Holding the left button brings the thumb in close
//! enough to count as a pinch.  Everything downstream runs unchanged.

use std::sync::mpsc::{Receiver, TryRecvError};

use hand_landmarks::{DetectError, Frame, HandDetector, HandLandmarks};

/// Thumb offset while the button is held.
pub const PINCHED_GAP_PX: f32 = 5.0;
/// Thumb offset while the button is up.
pub const OPEN_GAP_PX:    f32 = 60.0;

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in canvas pixels.
    Pointer { x: f32, y: f32, pinched: bool },
    /// Pointer left the window.
    Gone,
}

/// [`HandDetector`] fed by [`SimInput`] samples instead of a model.
pub struct PointerDetector {
    rx:     Receiver<SimInput>,
    latest: Option<SimInput>,
}

impl PointerDetector {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        PointerDetector { rx, latest: None }
    }

    /// Keep only the newest sample.
    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(input)                       => self.latest = Some(input),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl HandDetector for PointerDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectError> {
        self.drain();
        match self.latest {
            Some(SimInput::Pointer { x, y, pinched }) => {
                // Centre the tips in their pixels so truncation lands on (x, y).
                let tip = (x.floor() + 0.5, y.floor() + 0.5);
                let gap = if pinched { PINCHED_GAP_PX } else { OPEN_GAP_PX };
                let thumb = (tip.0 + gap, tip.1);
                Ok(vec![HandLandmarks::synthetic(tip, thumb, frame.width, frame.height)])
            }
            Some(SimInput::Gone) | None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str { "pointer" }
}
