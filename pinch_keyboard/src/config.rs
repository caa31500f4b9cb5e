use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use hand_landmarks::SidecarConfig;

use crate::Error;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub camera:   CameraConfig,
    pub detector: DetectorConfig,
    pub keyboard: KeyboardConfig,
    pub display:  DisplayConfig,
}

impl Config {
    /// Read `path`.  A missing file yields the defaults; a file that exists
    /// but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text).map_err(|reason| Error::Config {
            path: path.display().to_string(),
            reason,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }
}

// ============================================================================
// Camera
// ============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Device indices tried in order; the first that opens is used.
    pub indices: Vec<u32>,
    /// Flip frames left-to-right before detection so the view is a mirror.
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            indices: vec![0, 1, 2, 3],
            mirror: true,
        }
    }
}

// ============================================================================
// Detector
// ============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Program that speaks the sidecar protocol (see `hand_landmarks`).
    pub command: String,
    /// Defaults to the bundled `hand_landmarks/sidecar/hand_sidecar.py`.
    /// The two confidences are appended as flags.
    pub args: Vec<String>,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let sidecar = SidecarConfig::default();
        Self {
            command: sidecar.command,
            args: sidecar.args,
            min_detection_confidence: sidecar.min_detection_confidence,
            min_tracking_confidence: sidecar.min_tracking_confidence,
        }
    }
}

impl DetectorConfig {
    pub fn sidecar(&self) -> SidecarConfig {
        SidecarConfig {
            command: self.command.clone(),
            args: self.args.clone(),
            min_detection_confidence: self.min_detection_confidence,
            min_tracking_confidence: self.min_tracking_confidence,
        }
    }
}

// ============================================================================
// Keyboard
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Thumb-to-fingertip distance, in pixels, below which a pinch counts.
    pub pinch_threshold_px: f32,
    /// Minimum time between two accepted keystrokes.
    pub debounce_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            pinch_threshold_px: 25.0,
            debounce_ms: 500,
        }
    }
}

impl KeyboardConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// ============================================================================
// Display
// ============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    /// Number of trailing buffer characters drawn on screen.
    pub text_tail: usize,
    /// Draw the camera image under the keyboard instead of a flat background.
    pub show_camera: bool,
    /// Canvas size in simulation mode.
    pub sim_width: u32,
    pub sim_height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Virtual Pinch Keyboard".to_string(),
            text_tail: 50,
            show_camera: false,
            sim_width: 1280,
            sim_height: 720,
        }
    }
}
