//! Raw RGB video frames.

/// One video frame, tightly packed RGB8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width:  u32,
    pub height: u32,
    pub rgb:    Vec<u8>,
}

impl Frame {
    /// Wrap a pixel buffer.  Returns `None` when the buffer length does not
    /// match `width × height × 3`.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Option<Self> {
        if rgb.len() != width as usize * height as usize * 3 {
            return None;
        }
        Some(Frame { width, height, rgb })
    }

    /// A black frame.
    pub fn blank(width: u32, height: u32) -> Self {
        Frame { width, height, rgb: vec![0; width as usize * height as usize * 3] }
    }

    /// Mirror the frame left-to-right in place.
    pub fn flip_horizontal(&mut self) {
        let w = self.width as usize;
        if w == 0 {
            return;
        }
        for row in self.rgb.chunks_exact_mut(w * 3) {
            for x in 0..w / 2 {
                let (a, b) = (x * 3, (w - 1 - x) * 3);
                for c in 0..3 {
                    row.swap(a + c, b + c);
                }
            }
        }
    }
}
