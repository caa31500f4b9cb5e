//! # hand_landmarks
//!
//! Everything the keyboard needs to know about hands, and nothing about how
//! they are found.
//!
//! * [`Frame`]: one RGB video frame.
//! * [`HandLandmarks`]: the 21 normalized points of one detected hand
//!   (MediaPipe numbering: 4 = thumb tip, 8 = index fingertip).
//! * [`HandDetector`]: the capability `detect(frame) -> hands`.
//!
//! Two detectors ship here:
//!
//! | Detector | Use |
//! |---|---|
//! | [`MediaPipeSidecar`] | real model, run as a child process speaking JSON lines |
//! | [`ScriptedDetector`] | replays a fixed sequence of hand sets (tests, demos) |
//!
//! ## Sidecar protocol
//!
//! ```text
//! sidecar → "READY\n"
//! loop:
//!   host    → width:u32le height:u32le channels:u32le  <width*height*channels RGB bytes>
//!   sidecar → {"hands":[{"handedness":"Left","score":0.93,"landmarks":[{"x":..,"y":..,"z":..} ×21]}],"error":null}\n
//! ```
//!
//! The sidecar is started as `command args.. --min-detection-confidence X
//! --min-tracking-confidence Y` and exits on EOF.  A per-frame failure goes in
//! `error` and the host treats it as no hands.  The bundled implementation is
//! `sidecar/hand_sidecar.py` ([`BUNDLED_SCRIPT`]).

pub mod detector;
pub mod frame;
pub mod landmark;
pub mod sidecar;

pub use detector::{HandDetector, ScriptedDetector};
pub use frame::Frame;
pub use landmark::{index, HandLandmarks, Handedness, Landmark, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use sidecar::{parse_detection, MediaPipeSidecar, SidecarConfig, BUNDLED_SCRIPT};

use thiserror::Error;

/// Errors raised while talking to a detector.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to start detector `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source:  std::io::Error,
    },
    #[error("detector handshake failed: {0}")]
    Handshake(String),
    #[error("detector closed its output")]
    Closed,
    #[error("detector I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed detector output {line:?}: {source}")]
    Malformed {
        line:   String,
        #[source]
        source: serde_json::Error,
    },
}
