//! Hand landmark sets.

use key_grid::Point;

/// Number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices (MediaPipe hand model numbering).
pub mod index {
    pub const WRIST:      usize = 0;
    pub const THUMB_CMC:  usize = 1;
    pub const THUMB_MCP:  usize = 2;
    pub const THUMB_IP:   usize = 3;
    pub const THUMB_TIP:  usize = 4;
    pub const INDEX_MCP:  usize = 5;
    pub const INDEX_PIP:  usize = 6;
    pub const INDEX_DIP:  usize = 7;
    pub const INDEX_TIP:  usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP:   usize = 13;
    pub const RING_PIP:   usize = 14;
    pub const RING_DIP:   usize = 15;
    pub const RING_TIP:   usize = 16;
    pub const PINKY_MCP:  usize = 17;
    pub const PINKY_PIP:  usize = 18;
    pub const PINKY_DIP:  usize = 19;
    pub const PINKY_TIP:  usize = 20;
}

/// Bone segments drawn for the skeleton overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

/// One landmark.  `x`/`y` are normalized to the frame (0.0–1.0, may stray
/// slightly outside), `z` is depth relative to the wrist.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    pub fn to_pixel(&self, width: u32, height: u32) -> Point {
        Point::from_normalized(self.x, self.y, width, height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn from_label(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "left"  => Handedness::Left,
            "right" => Handedness::Right,
            _       => Handedness::Unknown,
        }
    }
}

/// All 21 landmarks of one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub landmarks:  [Landmark; LANDMARK_COUNT],
    pub score:      f32,
    pub handedness: Handedness,
}

impl HandLandmarks {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks { landmarks, score: 1.0, handedness: Handedness::Unknown }
    }

    pub fn thumb_tip(&self) -> Landmark { self.landmarks[index::THUMB_TIP] }
    pub fn index_tip(&self) -> Landmark { self.landmarks[index::INDEX_TIP] }

    /// Index fingertip in pixels.
    pub fn index_tip_px(&self, width: u32, height: u32) -> Point {
        self.index_tip().to_pixel(width, height)
    }

    /// Thumb tip in pixels.
    pub fn thumb_tip_px(&self, width: u32, height: u32) -> Point {
        self.thumb_tip().to_pixel(width, height)
    }

    /// Every landmark in pixels, in index order.
    pub fn pixel_points(&self, width: u32, height: u32) -> [Point; LANDMARK_COUNT] {
        let mut out = [Point::default(); LANDMARK_COUNT];
        for (p, lm) in out.iter_mut().zip(self.landmarks.iter()) {
            *p = lm.to_pixel(width, height);
        }
        out
    }

    /// Build a flat hand whose index fingertip sits at `index_px` and whose
    /// thumb tip sits at `thumb_px` on a `width × height` frame.  The other
    /// joints are laid out below the fingertip in a plausible open-hand
    /// shape; only the two tips matter to the keyboard.
    pub fn synthetic(index_px: (f32, f32), thumb_px: (f32, f32), width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let (ix, iy) = index_px;
        // Palm below and slightly right of the fingertip.
        let wrist = (ix + 20.0, iy + 170.0);

        let mut pts = [(0.0f32, 0.0f32); LANDMARK_COUNT];
        pts[index::WRIST] = wrist;
        for (k, joint) in [index::THUMB_CMC, index::THUMB_MCP, index::THUMB_IP, index::THUMB_TIP]
            .into_iter()
            .enumerate()
        {
            let t = (k + 1) as f32 / 4.0;
            pts[joint] = lerp(wrist, thumb_px, t);
        }
        let fingers = [
            (index::INDEX_MCP,  index_px),
            (index::MIDDLE_MCP, (ix + 28.0, iy - 4.0)),
            (index::RING_MCP,   (ix + 52.0, iy + 6.0)),
            (index::PINKY_MCP,  (ix + 72.0, iy + 24.0)),
        ];
        for (mcp, tip) in fingers {
            let base = lerp(wrist, tip, 0.45);
            for k in 0..4 {
                let t = k as f32 / 3.0;
                pts[mcp + k] = lerp(base, tip, t);
            }
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (lm, (x, y)) in landmarks.iter_mut().zip(pts.iter()) {
            *lm = Landmark::new(x / w, y / h, 0.0);
        }
        HandLandmarks::new(landmarks)
    }
}

fn lerp(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
