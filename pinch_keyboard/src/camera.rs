//! Frame sources.
//!
//! [`FrameSource`] yields RGB frames one at a time.  The webcam backend uses
//! `nokhwa` (feature `camera`); [`BlankSource`] produces empty frames of a
//! fixed size for simulation mode and tests.

use std::fmt::Display;

use hand_landmarks::Frame;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The device stopped delivering frames.
    #[error("frame read failed: {0}")]
    Read(String),
    /// A finite source has nothing left.
    #[error("frame source exhausted")]
    Exhausted,
}

/// Anything that yields video frames.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError>;
    /// Size of the frames this source produces.
    fn resolution(&self) -> (u32, u32);
    fn name(&self) -> &str;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> { (**self).next_frame() }
    fn resolution(&self) -> (u32, u32) { (**self).resolution() }
    fn name(&self) -> &str { (**self).name() }
}

// ── blank frames ──────────────────────────────────────────────────────────

/// Black frames of a fixed size, optionally only `limit` of them.
#[derive(Clone, Debug)]
pub struct BlankSource {
    width:  u32,
    height: u32,
    limit:  Option<u64>,
    served: u64,
}

impl BlankSource {
    pub fn new(width: u32, height: u32) -> Self {
        BlankSource { width, height, limit: None, served: 0 }
    }

    /// Stop with [`CaptureError::Exhausted`] after `n` frames.
    pub fn with_limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }
}

impl FrameSource for BlankSource {
    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if self.limit.map_or(false, |n| self.served >= n) {
            return Err(CaptureError::Exhausted);
        }
        self.served += 1;
        Ok(Frame::blank(self.width, self.height))
    }

    fn resolution(&self) -> (u32, u32) { (self.width, self.height) }
    fn name(&self) -> &str { "blank" }
}

// ── device probing ────────────────────────────────────────────────────────

/// Try `open` on each index in order and keep the first device that works.
/// Fails with [`crate::Error::NoCamera`] listing every index tried.
pub fn open_first_with<S, E, F>(indices: &[u32], mut open: F) -> Result<S, crate::Error>
where
    S: FrameSource,
    E: Display,
    F: FnMut(u32) -> Result<S, E>,
{
    for &index in indices {
        match open(index) {
            Ok(source) => {
                let (width, height) = source.resolution();
                info!(index, camera = source.name(), width, height, "camera opened");
                return Ok(source);
            }
            Err(e) => warn!(index, "camera unavailable: {}", e),
        }
    }
    Err(crate::Error::NoCamera { tried: indices.to_vec() })
}

// ── webcam (feature = "camera") ───────────────────────────────────────────

#[cfg(feature = "camera")]
pub use webcam::{open_first, NokhwaCamera};

#[cfg(feature = "camera")]
mod webcam {
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
    use nokhwa::Camera;
    use tracing::warn;

    use super::{open_first_with, CaptureError, FrameSource};
    use crate::Error;
    use hand_landmarks::Frame;

    pub struct NokhwaCamera {
        camera: Camera,
        name:   String,
    }

    impl NokhwaCamera {
        pub fn open(index: u32) -> Result<Self, nokhwa::NokhwaError> {
            let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(index), format)?;
            camera.open_stream()?;
            let name = format!("{} (#{})", camera.info().human_name(), index);
            Ok(NokhwaCamera { camera, name })
        }
    }

    impl FrameSource for NokhwaCamera {
        fn next_frame(&mut self) -> Result<Frame, CaptureError> {
            let buffer = self.camera.frame().map_err(|e| CaptureError::Read(e.to_string()))?;
            let image = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| CaptureError::Read(e.to_string()))?;
            let (w, h) = (image.width(), image.height());
            Frame::from_rgb(w, h, image.into_raw())
                .ok_or_else(|| CaptureError::Read(format!("short frame buffer for {}x{}", w, h)))
        }

        fn resolution(&self) -> (u32, u32) {
            let r = self.camera.resolution();
            (r.width(), r.height())
        }

        fn name(&self) -> &str { &self.name }
    }

    impl Drop for NokhwaCamera {
        fn drop(&mut self) {
            if let Err(e) = self.camera.stop_stream() {
                warn!("stopping camera stream: {}", e);
            }
        }
    }

    /// Open the first device in `indices` that works.
    pub fn open_first(indices: &[u32]) -> Result<NokhwaCamera, Error> {
        open_first_with(indices, NokhwaCamera::open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_source_is_endless_by_default() {
        let mut src = BlankSource::new(64, 48);
        for _ in 0..5 {
            let f = src.next_frame().unwrap();
            assert_eq!((f.width, f.height), (64, 48));
        }
        assert_eq!(src.resolution(), (64, 48));
    }

    #[test]
    fn blank_source_limit() {
        let mut src = BlankSource::new(8, 8).with_limit(2);
        assert!(src.next_frame().is_ok());
        assert!(src.next_frame().is_ok());
        assert!(matches!(src.next_frame(), Err(CaptureError::Exhausted)));
    }

    #[test]
    fn open_first_tries_indices_in_order() {
        let mut tried = Vec::new();
        let src = open_first_with(&[0, 1, 2, 3], |i| {
            tried.push(i);
            if i == 2 { Ok(BlankSource::new(320, 240)) } else { Err(format!("no device {}", i)) }
        })
        .unwrap();
        assert_eq!(tried, vec![0, 1, 2]);
        assert_eq!(src.resolution(), (320, 240));
    }

    #[test]
    fn open_first_reports_every_index_when_none_open() {
        let mut tried = Vec::new();
        let err = open_first_with(&[0, 1, 2, 3], |i| {
            tried.push(i);
            Err::<BlankSource, _>("busy")
        })
        .err();
        assert_eq!(tried, vec![0, 1, 2, 3]);
        assert!(matches!(err, Some(crate::Error::NoCamera { tried }) if tried == vec![0, 1, 2, 3]));
    }

    #[test]
    fn open_first_with_no_indices_is_no_camera() {
        let err = open_first_with(&[], |_| Ok::<_, String>(BlankSource::new(1, 1))).err();
        assert!(matches!(err, Some(crate::Error::NoCamera { tried }) if tried.is_empty()));
    }
}
