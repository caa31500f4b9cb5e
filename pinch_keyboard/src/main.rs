//! pinch_keyboard: interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use key_grid::{print_boxes, KeyBoxes};
use pinch_keyboard::app::{run, RunOptions};
use pinch_keyboard::Config;

#[derive(Parser, Debug)]
#[command(name = "pinch_keyboard", about = "Type by pinching over an on-screen keyboard")]
struct Cli {
    /// TOML config file (missing file means defaults)
    #[arg(long, default_value = "pinch_keyboard.toml")]
    config: PathBuf,

    /// Drive the keyboard with the mouse instead of a camera
    #[arg(long)]
    simulate: bool,

    /// Use only this camera index instead of probing
    #[arg(long, value_name = "INDEX")]
    camera: Option<u32>,

    /// Log keystrokes instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Print the key boxes for the configured canvas size and exit
    #[arg(long)]
    print_layout: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinch_keyboard=info,hand_landmarks=info".into()),
        )
        .init();

    let cfg = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if cli.print_layout {
        print_boxes(&KeyBoxes::compute(cfg.display.sim_width, cfg.display.sim_height));
        return Ok(());
    }

    info!("pinch_keyboard v{} starting", env!("CARGO_PKG_VERSION"));
    #[cfg(feature = "camera")]
    info!("mode: {}", if cli.simulate { "simulation" } else { "camera" });
    #[cfg(not(feature = "camera"))]
    info!("mode: simulation (build with --features camera for a webcam)");

    let opts = RunOptions {
        simulate: cli.simulate,
        dry_run:  cli.dry_run,
        camera:   cli.camera,
    };
    let stats = run(cfg, opts).context("keyboard session failed")?;

    println!();
    println!("  Frames:     {}", stats.frames);
    println!("  Keystrokes: {}", stats.keystrokes);
    println!("  Typed:      {:?}", stats.text);
    Ok(())
}
