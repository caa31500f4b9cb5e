//! Print the computed key boxes for a canvas size.
//!
//! ```text
//! key_grid [WIDTH] [HEIGHT]      (default 1280 720)
//! ```

use key_grid::{compute_key_boxes, print_boxes};

fn main() {
    let mut args = std::env::args().skip(1);
    let width: u32  = args.next().and_then(|a| a.trim().parse().ok()).unwrap_or(1280);
    let height: u32 = args.next().and_then(|a| a.trim().parse().ok()).unwrap_or(720);

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             Pinch Keyboard: Key Box Layout           ║");
    println!("╚══════════════════════════════════════════════════════╝");
    print_boxes(&compute_key_boxes(width, height));
}
