//! MediaPipe hand landmarker run as a child process.
//!
//! We start the configured command, wait for it to print `READY`, then
//! exchange one binary frame for one JSON line per call to
//! [`HandDetector::detect`].  The default command runs
//! `sidecar/hand_sidecar.py` from this crate, which wraps MediaPipe Hands and
//! needs `mediapipe` and `numpy` installed for `python3`.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::landmark::{Handedness, Landmark, LANDMARK_COUNT};
use crate::{DetectError, Frame, HandDetector, HandLandmarks};

/// Path of the bundled sidecar script.
pub const BUNDLED_SCRIPT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/sidecar/hand_sidecar.py");

/// How to launch the sidecar and which confidences to ask it for.
///
/// Both confidences are appended to `args` as `--min-detection-confidence X
/// --min-tracking-confidence Y`.
#[derive(Clone, Debug, PartialEq)]
pub struct SidecarConfig {
    pub command: String,
    pub args:    Vec<String>,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence:  f32,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        SidecarConfig {
            command: "python3".to_string(),
            args:    vec![BUNDLED_SCRIPT.to_string()],
            min_detection_confidence: 0.7,
            min_tracking_confidence:  0.7,
        }
    }
}

// ── wire format ───────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default = "full_score")]
    score:      f32,
    landmarks:  Vec<LandmarkJson>,
}

fn full_score() -> f32 { 1.0 }

#[derive(Deserialize, Debug)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Normalized coordinates further than this outside `[0, 1]` are treated as
/// detector garbage.  MediaPipe reports joints a little past the frame edge
/// when a hand is partly out of view.
const COORD_LIMIT: f32 = 2.0;

fn plausible(lm: &LandmarkJson) -> bool {
    [lm.x, lm.y, lm.z].iter().all(|v| v.is_finite() && v.abs() <= COORD_LIMIT)
}

/// Parse one sidecar reply.
///
/// Hands scoring below `min_confidence`, carrying the wrong number of
/// landmarks, or with any coordinate non-finite or beyond ±2.0 are
/// dropped.  A reply with an `error` field yields no hands.
pub fn parse_detection(line: &str, min_confidence: f32) -> Result<Vec<HandLandmarks>, DetectError> {
    let reply: DetectionJson = serde_json::from_str(line.trim()).map_err(|source| {
        DetectError::Malformed { line: line.trim().to_string(), source }
    })?;

    if let Some(error) = reply.error {
        warn!("detector reported: {}", error);
        return Ok(Vec::new());
    }

    let mut hands = Vec::with_capacity(reply.hands.len());
    for hand in reply.hands {
        if hand.score < min_confidence {
            continue;
        }
        if hand.landmarks.len() != LANDMARK_COUNT {
            warn!("expected {} landmarks, got {}", LANDMARK_COUNT, hand.landmarks.len());
            continue;
        }
        if !hand.landmarks.iter().all(plausible) {
            warn!("dropping hand with out-of-range landmarks");
            continue;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (dst, src) in landmarks.iter_mut().zip(hand.landmarks.iter()) {
            *dst = Landmark::new(src.x, src.y, src.z);
        }
        hands.push(HandLandmarks {
            landmarks,
            score: hand.score,
            handedness: Handedness::from_label(&hand.handedness),
        });
    }
    Ok(hands)
}

// ════════════════════════════════════════════════════════════════════════════
// MediaPipeSidecar
// ════════════════════════════════════════════════════════════════════════════

/// A running sidecar process.  Killed when dropped.
pub struct MediaPipeSidecar {
    process: Child,
    stdin:   ChildStdin,
    stdout:  BufReader<ChildStdout>,
    min_detection_confidence: f32,
    line:    String,
}

impl MediaPipeSidecar {
    /// Start the sidecar and wait for its `READY` line.
    pub fn spawn(cfg: &SidecarConfig) -> Result<Self, DetectError> {
        info!("starting hand detector: {} {}", cfg.command, cfg.args.join(" "));

        let mut process = Command::new(&cfg.command)
            .args(&cfg.args)
            .arg("--min-detection-confidence")
            .arg(cfg.min_detection_confidence.to_string())
            .arg("--min-tracking-confidence")
            .arg(cfg.min_tracking_confidence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DetectError::Spawn { command: cfg.command.clone(), source })?;

        let (stdin, stdout) = match (process.stdin.take(), process.stdout.take()) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                let _ = process.kill();
                return Err(DetectError::Handshake("child pipes unavailable".to_string()));
            }
        };

        let mut sidecar = MediaPipeSidecar {
            process,
            stdin,
            stdout: BufReader::new(stdout),
            min_detection_confidence: cfg.min_detection_confidence,
            line: String::new(),
        };

        // Dropping `sidecar` on any error below kills the child.
        if sidecar.stdout.read_line(&mut sidecar.line)? == 0 {
            return Err(DetectError::Handshake("exited before READY".to_string()));
        }
        if sidecar.line.trim() != "READY" {
            return Err(DetectError::Handshake(format!("expected READY, got {:?}", sidecar.line.trim())));
        }

        info!("hand detector ready");
        Ok(sidecar)
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<(), DetectError> {
        self.stdin.write_all(&frame.width.to_le_bytes())?;
        self.stdin.write_all(&frame.height.to_le_bytes())?;
        self.stdin.write_all(&3u32.to_le_bytes())?;
        self.stdin.write_all(&frame.rgb)?;
        self.stdin.flush()?;
        Ok(())
    }
}

impl HandDetector for MediaPipeSidecar {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<HandLandmarks>, DetectError> {
        self.send_frame(frame)?;

        self.line.clear();
        if self.stdout.read_line(&mut self.line)? == 0 {
            return Err(DetectError::Closed);
        }
        debug!(reply = %self.line.trim(), "detector");
        parse_detection(&self.line, self.min_detection_confidence)
    }

    fn name(&self) -> &str { "mediapipe" }
}

impl Drop for MediaPipeSidecar {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_json(score: f32, n: usize) -> String {
        let pts: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, i as f32 / 100.0))
            .collect();
        format!(
            r#"{{"handedness":"Right","score":{},"landmarks":[{}]}}"#,
            score,
            pts.join(",")
        )
    }

    #[test]
    fn parses_one_hand() {
        let line = format!(r#"{{"hands":[{}],"error":null}}"#, hand_json(0.9, 21));
        let hands = parse_detection(&line, 0.7).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Handedness::Right);
        assert_eq!(hands[0].index_tip().x, 0.08);
    }

    #[test]
    fn empty_reply_is_no_hands() {
        assert!(parse_detection(r#"{"hands":[]}"#, 0.7).unwrap().is_empty());
        assert!(parse_detection("{}", 0.7).unwrap().is_empty());
    }

    #[test]
    fn low_confidence_dropped() {
        let line = format!(r#"{{"hands":[{},{}]}}"#, hand_json(0.5, 21), hand_json(0.95, 21));
        let hands = parse_detection(&line, 0.7).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].score, 0.95);
    }

    #[test]
    fn wrong_landmark_count_dropped() {
        let line = format!(r#"{{"hands":[{}]}}"#, hand_json(0.9, 20));
        assert!(parse_detection(&line, 0.7).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_landmarks_dropped() {
        let good = hand_json(0.9, 21);
        let far = good.replacen(r#""x":0.08"#, r#""x":1e12"#, 1);
        let line = format!(r#"{{"hands":[{},{}]}}"#, far, good);
        let hands = parse_detection(&line, 0.7).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].index_tip().x, 0.08);

        let slightly_off = good.replacen(r#""x":0.08"#, r#""x":-0.3"#, 1);
        let line = format!(r#"{{"hands":[{}]}}"#, slightly_off);
        assert_eq!(parse_detection(&line, 0.7).unwrap().len(), 1);
    }

    #[test]
    fn reported_error_is_no_hands() {
        let hands = parse_detection(r#"{"hands":[],"error":"model not loaded"}"#, 0.7).unwrap();
        assert!(hands.is_empty());
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_detection("not json", 0.7),
            Err(DetectError::Malformed { .. })
        ));
    }

    #[test]
    fn default_runs_the_bundled_script() {
        let cfg = SidecarConfig::default();
        assert_eq!(cfg.command, "python3");
        assert_eq!(cfg.args, vec![BUNDLED_SCRIPT.to_string()]);
        assert!(std::path::Path::new(BUNDLED_SCRIPT).is_file());
    }

    #[test]
    fn spawn_missing_command_fails() {
        let cfg = SidecarConfig {
            command: "definitely-not-a-real-hand-detector".to_string(),
            args: vec![],
            ..SidecarConfig::default()
        };
        assert!(matches!(MediaPipeSidecar::spawn(&cfg), Err(DetectError::Spawn { .. })));
    }
}
