//! One keyboard session: frame in, keystrokes and a rendered canvas out.
//!
//! [`Session`] owns the frame source, the detector, and the keystroke sink,
//! plus the interaction state that carries over between frames.  It has no
//! window; the app loop presents [`Session::canvas`] after each
//! [`Session::step`].

use std::time::Instant;

use hand_landmarks::HandDetector;
use key_grid::KeyBoxes;
use tracing::{debug, info};

use crate::camera::FrameSource;
use crate::canvas::Canvas;
use crate::config::Config;
use crate::dispatch::InteractionState;
use crate::inject::KeySink;
use crate::interaction::{self, FrameReport, PinchRules};
use crate::render::{render_frame, Scene, BG_COLOR};
use crate::Error;

// ════════════════════════════════════════════════════════════════════════════
// SessionOptions
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    /// Flip every frame left-to-right before detection.
    pub mirror:      bool,
    /// Draw the camera image under the keys.
    pub show_camera: bool,
    /// Characters of typed text kept on screen.
    pub text_tail:   usize,
    pub status_bar:  bool,
    pub rules:       PinchRules,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            mirror:      true,
            show_camera: false,
            text_tail:   50,
            status_bar:  true,
            rules:       PinchRules::default(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(cfg: &Config) -> Self {
        SessionOptions {
            mirror:      cfg.camera.mirror,
            show_camera: cfg.display.show_camera,
            text_tail:   cfg.display.text_tail,
            status_bar:  true,
            rules:       PinchRules::from(&cfg.keyboard),
        }
    }
}

/// Counters reported when a session ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames:      u64,
    /// Frames in which at least one hand was detected.
    pub hand_frames: u64,
    pub keystrokes:  u64,
    pub text:        String,
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session {
    source:   Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    sink:     Box<dyn KeySink>,
    opts:     SessionOptions,

    state:    InteractionState,
    boxes:    KeyBoxes,
    canvas:   Canvas,
    stats:    SessionStats,
    hovered:  Option<&'static str>,
}

impl Session {
    pub fn new(
        source:   Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
        sink:     Box<dyn KeySink>,
        opts:     SessionOptions,
    ) -> Self {
        let (w, h) = source.resolution();
        info!(source = source.name(), detector = detector.name(), sink = sink.name(),
              width = w, height = h, "session started");
        Session {
            source,
            detector,
            sink,
            opts,
            state:  InteractionState::new(),
            boxes:  KeyBoxes::compute(w, h),
            canvas: Canvas::new(w as usize, h as usize, BG_COLOR),
            stats:  SessionStats::default(),
            hovered: None,
        }
    }

    pub fn state(&self)  -> &InteractionState { &self.state }
    pub fn boxes(&self)  -> &KeyBoxes         { &self.boxes }
    pub fn canvas(&self) -> &Canvas           { &self.canvas }

    pub fn stats(&self) -> SessionStats {
        SessionStats { text: self.state.text.clone(), ..self.stats.clone() }
    }

    /// Process one frame captured at `now`.
    ///
    /// A frame-source error comes back as [`Error::Capture`] and means the
    /// source is done; a detector error is [`Error::Detector`].
    pub fn step(&mut self, now: Instant) -> Result<FrameReport, Error> {
        let mut frame = self.source.next_frame()?;
        if self.opts.mirror {
            frame.flip_horizontal();
        }

        if (frame.width, frame.height) != self.boxes.canvas_size() {
            debug!(width = frame.width, height = frame.height, "frame size changed, recomputing layout");
            self.boxes = KeyBoxes::compute(frame.width, frame.height);
            self.canvas.resize(frame.width as usize, frame.height as usize, BG_COLOR);
        }

        let hands = self.detector.detect(&frame)?;

        let state = std::mem::take(&mut self.state);
        let (state, report) = interaction::step(
            state, &self.boxes, &hands, now, &self.opts.rules, self.sink.as_mut(),
        );
        self.state = state;

        if report.hovered != self.hovered {
            debug!(from = ?self.hovered, to = ?report.hovered, "hover");
            self.hovered = report.hovered;
        }

        self.stats.frames += 1;
        if !hands.is_empty() {
            self.stats.hand_frames += 1;
        }
        if report.accepted.is_some() {
            self.stats.keystrokes += 1;
        }

        let status = self.opts.status_bar.then(|| status_line(&self.state, &report));
        let scene = Scene {
            boxes:   &self.boxes,
            hovered: report.hovered,
            hands:   &hands,
            text:    self.state.tail(self.opts.text_tail),
            camera:  self.opts.show_camera.then_some(&frame),
            status:  status.as_deref(),
        };
        render_frame(&mut self.canvas, &scene);

        Ok(report)
    }
}

fn status_line(state: &InteractionState, report: &FrameReport) -> String {
    let mut parts = Vec::with_capacity(4);
    if state.caps_lock { parts.push("caps".to_string()); }
    if state.shift     { parts.push("shift".to_string()); }
    parts.push(report.phase.as_str().to_string());
    parts.push(format!("key: {}", report.hovered.unwrap_or("-")));
    parts.join("  ")
}
