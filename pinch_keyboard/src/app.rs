//! Top-level run loop.
//!
//! Picks the frame source and detector (webcam + sidecar, or the simulated
//! pointer hand), opens the window, and drives a [`Session`] until the user
//! quits or the camera stops.

use std::sync::mpsc::{self, Sender};
use std::time::Instant;

use hand_landmarks::HandDetector;
use tracing::{info, warn};

use crate::camera::{BlankSource, FrameSource};
use crate::config::Config;
use crate::inject::open_key_sink;
use crate::session::{Session, SessionOptions, SessionStats};
use crate::sim::{PointerDetector, SimInput};
use crate::visualizer::Visualizer;
use crate::Error;

// ════════════════════════════════════════════════════════════════════════════
// RunOptions
// ════════════════════════════════════════════════════════════════════════════

/// Command-line overrides on top of [`Config`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Drive the keyboard with the mouse instead of a camera.
    pub simulate: bool,
    /// Log keystrokes instead of sending them.
    pub dry_run:  bool,
    /// Use only this camera index.
    pub camera:   Option<u32>,
}

struct Pipeline {
    source:   Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    sim_tx:   Option<Sender<SimInput>>,
}

fn simulated(cfg: &Config) -> Pipeline {
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    info!("simulation mode: move the mouse over a key, hold the left button to pinch");
    Pipeline {
        source:   Box::new(BlankSource::new(cfg.display.sim_width, cfg.display.sim_height)),
        detector: Box::new(PointerDetector::new(sim_rx)),
        sim_tx:   Some(sim_tx),
    }
}

#[cfg(feature = "camera")]
fn webcam(cfg: &Config, opts: &RunOptions) -> Result<Pipeline, Error> {
    use hand_landmarks::MediaPipeSidecar;

    let indices = match opts.camera {
        Some(i) => vec![i],
        None    => cfg.camera.indices.clone(),
    };
    let source = crate::camera::open_first(&indices)?;
    let detector = MediaPipeSidecar::spawn(&cfg.detector.sidecar())?;
    Ok(Pipeline {
        source:   Box::new(source),
        detector: Box::new(detector),
        sim_tx:   None,
    })
}

fn pipeline(cfg: &Config, opts: &RunOptions) -> Result<Pipeline, Error> {
    if opts.simulate {
        return Ok(simulated(cfg));
    }
    #[cfg(feature = "camera")]
    {
        webcam(cfg, opts)
    }
    #[cfg(not(feature = "camera"))]
    {
        if let Some(i) = opts.camera {
            warn!(index = i, "camera index ignored");
        }
        warn!("built without the `camera` feature; falling back to simulation");
        Ok(simulated(cfg))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run()
// ════════════════════════════════════════════════════════════════════════════

/// Open everything and loop until quit.  A camera that stops delivering
/// frames ends the session normally; detector and window failures are
/// returned.
pub fn run(cfg: Config, opts: RunOptions) -> Result<SessionStats, Error> {
    let Pipeline { source, detector, sim_tx } = pipeline(&cfg, &opts)?;
    let (w, h) = source.resolution();

    let sink = open_key_sink(opts.dry_run);
    let mut session = Session::new(source, detector, sink, SessionOptions::from(&cfg));
    let mut vis = Visualizer::new(&cfg.display.title, w as usize, h as usize, sim_tx)?;

    while vis.poll_input() {
        match session.step(Instant::now()) {
            Ok(_) => {}
            Err(Error::Capture(e)) => {
                warn!("{}; stopping", e);
                break;
            }
            Err(e) => return Err(e),
        }
        vis.present(session.canvas())?;
    }

    let stats = session.stats();
    info!(frames = stats.frames, hand_frames = stats.hand_frames,
          keystrokes = stats.keystrokes, "session ended");
    info!("typed: {:?}", stats.text);
    Ok(stats)
}
