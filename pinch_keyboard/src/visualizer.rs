//! The on-screen window, via `minifb`.
//!
//! Presents a finished [`Canvas`] each frame and, in simulation mode, turns
//! the mouse into [`SimInput`] samples.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use crate::canvas::Canvas;
use crate::sim::SimInput;
use crate::Error;

pub struct Visualizer {
    window: Window,
    sim_tx: Option<Sender<SimInput>>,
    /// Size of the last presented canvas.
    canvas: (usize, usize),
}

impl Visualizer {
    /// Open a resizable window sized to the canvas.  When `sim_tx` is given, every
    /// [`poll_input`](Self::poll_input) sends the pointer state on it.
    pub fn new(title: &str, width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self, Error> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize:     true,
                scale_mode: ScaleMode::Stretch,
                ..WindowOptions::default()
            },
        ).map_err(|e| Error::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, sim_tx, canvas: (width, height) })
    }

    /// Handle window input.  Returns false when the user asked to quit
    /// (`q`, `Escape`, or closing the window).
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let quit = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        if quit(Key::Q) || quit(Key::Escape) {
            return false;
        }

        if let Some(tx) = &self.sim_tx {
            // Window pixels → canvas pixels; the canvas is stretched to fit.
            let (ww, wh) = self.window.get_size();
            let (cw, ch) = self.canvas;
            let input = match self.window.get_mouse_pos(MouseMode::Discard) {
                Some((x, y)) if ww > 0 && wh > 0 => SimInput::Pointer {
                    x: x * cw as f32 / ww as f32,
                    y: y * ch as f32 / wh as f32,
                    pinched: self.window.get_mouse_down(MouseButton::Left),
                },
                _ => SimInput::Gone,
            };
            let _ = tx.send(input);
        }

        true
    }

    /// Show one finished frame.
    pub fn present(&mut self, canvas: &Canvas) -> Result<(), Error> {
        self.canvas = (canvas.width(), canvas.height());
        self.window
            .update_with_buffer(canvas.buf(), canvas.width(), canvas.height())
            .map_err(|e| Error::Window(e.to_string()))
    }
}
