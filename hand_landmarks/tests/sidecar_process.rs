//! `MediaPipeSidecar` against small shell stand-ins that speak the protocol.

#![cfg(unix)]

use hand_landmarks::{DetectError, Frame, HandDetector, Handedness, MediaPipeSidecar, SidecarConfig};

/// Header (12 bytes) plus a 2×2 RGB frame (12 bytes).
const FRAME_BYTES: usize = 24;

fn reply_line() -> String {
    let pts: Vec<String> = (0..21)
        .map(|i| format!(r#"{{"x":{},"y":0.5,"z":0.0}}"#, if i == 8 { 0.25 } else { 0.75 }))
        .collect();
    format!(r#"{{"hands":[{{"handedness":"Left","score":0.9,"landmarks":[{}]}}],"error":null}}"#, pts.join(","))
}

/// Run `script` under `sh -c`.  The confidence flags land in `$1`..`$4`.
fn shell(script: String) -> SidecarConfig {
    SidecarConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script, "sidecar".to_string()],
        min_detection_confidence: 0.6,
        min_tracking_confidence: 0.5,
    }
}

/// Answers every full frame with one hand until stdin closes.
fn echo_sidecar() -> SidecarConfig {
    shell(format!(
        r#"echo READY
while [ "$(head -c {n} | wc -c)" -eq {n} ]; do
  echo '{reply}'
done"#,
        n = FRAME_BYTES,
        reply = reply_line(),
    ))
}

#[test]
fn handshake_then_one_reply_per_frame() {
    let mut det = MediaPipeSidecar::spawn(&echo_sidecar()).unwrap();
    let frame = Frame::blank(2, 2);
    for _ in 0..3 {
        let hands = det.detect(&frame).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].handedness, Handedness::Left);
        assert_eq!(hands[0].index_tip().x, 0.25);
        assert_eq!(hands[0].thumb_tip().x, 0.75);
    }
    assert_eq!(det.name(), "mediapipe");
}

#[test]
fn confidences_are_passed_as_flags() {
    let cfg = shell(format!(
        r#"if [ "$1 $2 $3 $4" = "--min-detection-confidence 0.6 --min-tracking-confidence 0.5" ]; then
  echo READY
else
  echo "bad args: $*"
fi
head -c {n} >/dev/null
echo '{{"hands":[]}}'"#,
        n = FRAME_BYTES,
    ));
    let mut det = MediaPipeSidecar::spawn(&cfg).unwrap();
    assert!(det.detect(&Frame::blank(2, 2)).unwrap().is_empty());
}

#[test]
fn low_scoring_hands_are_filtered_by_detection_confidence() {
    let mut cfg = echo_sidecar();
    cfg.min_detection_confidence = 0.95;
    let mut det = MediaPipeSidecar::spawn(&cfg).unwrap();
    assert!(det.detect(&Frame::blank(2, 2)).unwrap().is_empty());
}

#[test]
fn exit_before_ready_is_handshake_error() {
    let err = MediaPipeSidecar::spawn(&shell("exit 1".to_string())).err();
    assert!(matches!(err, Some(DetectError::Handshake(msg)) if msg.contains("before READY")));
}

#[test]
fn wrong_greeting_is_handshake_error() {
    let err = MediaPipeSidecar::spawn(&shell("echo hello".to_string())).err();
    assert!(matches!(err, Some(DetectError::Handshake(msg)) if msg.contains("hello")));
}

#[test]
fn sidecar_exit_mid_session_is_an_error() {
    let mut det = MediaPipeSidecar::spawn(&shell("echo READY".to_string())).unwrap();
    // Depending on timing the write hits a closed pipe or the read sees EOF.
    assert!(matches!(
        det.detect(&Frame::blank(2, 2)),
        Err(DetectError::Closed) | Err(DetectError::Io(_))
    ));
}

#[test]
fn garbage_reply_is_malformed() {
    let cfg = shell(format!("echo READY; head -c {} >/dev/null; echo 'not json'", FRAME_BYTES));
    let mut det = MediaPipeSidecar::spawn(&cfg).unwrap();
    assert!(matches!(det.detect(&Frame::blank(2, 2)), Err(DetectError::Malformed { .. })));
}
