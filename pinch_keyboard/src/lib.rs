//! # pinch_keyboard
//!
//! Camera-driven virtual keyboard.  A QWERTY layout is drawn over the video
//! frame; hovering the index fingertip over a key highlights it, and pinching
//! thumb and index finger together types it into the focused application.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Index fingertip inside a key | Highlight every key with that identifier |
//! | Thumb tip < 25 px from fingertip, over a key | Press the key (at most once per 500 ms) |
//!
//! ## Key → Effect mapping
//!
//! | Key | Sent | Buffer |
//! |---|---|---|
//! | `Space` | Space | `' '` appended |
//! | `delete` | Backspace | last char removed |
//! | `return` | Return | `'\n'` appended |
//! | `capslock` | nothing | caps lock toggled |
//! | `shift` | nothing | next key uppercased |
//! | anything else | the identifier, uppercased under caps/shift | same text appended |
//!
//! ## Frame pipeline
//!
//! ```text
//!  camera ──► mirror ──► detector ──► hit test / pinch / debounce ──► keystroke
//!                                              │
//!                                              └──► render ──► window
//! ```
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: the mouse pointer is the fingertip and
//!   the left button pinches.  Keystrokes are logged, not sent.
//! * `camera`: webcam capture via `nokhwa`, hands from the detector sidecar.
//! * `inject`: real OS keystrokes via `enigo`.
//!
//! ### Window shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `Q` / `Escape` | Quit |

use thiserror::Error;

pub mod app;
pub mod camera;
pub mod canvas;
pub mod config;
pub mod dispatch;
pub mod inject;
pub mod interaction;
pub mod render;
pub mod session;
pub mod sim;
pub mod visualizer;

pub use camera::{BlankSource, CaptureError, FrameSource};
pub use config::Config;
pub use dispatch::{dispatch, InteractionState, KeyAction};
pub use inject::{InjectError, KeySink, LogSink, SpecialKey};
pub use interaction::{step, FrameReport, Phase, PinchRules};
pub use session::{Session, SessionOptions, SessionStats};

/// Everything that can stop the keyboard.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no camera could be opened (tried indices {tried:?})")]
    NoCamera { tried: Vec<u32> },
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Detector(#[from] hand_landmarks::DetectError),
    #[error("window error: {0}")]
    Window(String),
    #[error("bad config {path}: {reason}")]
    Config { path: String, reason: String },
}
