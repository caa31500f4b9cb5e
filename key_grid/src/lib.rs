//! # key_grid
//!
//! The on-screen keyboard model: a fixed table of five key rows, the pixel
//! boxes those keys occupy on a canvas of a given size, and the geometric
//! primitives (distance, strict point-in-rectangle) used to hit-test a
//! fingertip against them.
//!
//! Everything here is pure and deterministic in the canvas size.  No crate
//! dependencies.
//!
//! ## Quick start
//!
//! ```rust
//! use key_grid::{compute_key_boxes, Point};
//!
//! let boxes = compute_key_boxes(1280, 720);
//! let a = boxes.rect_of("a").unwrap();
//! let hit = boxes.hit_test(a.center()).unwrap();
//! assert_eq!(hit.key.id, "a");
//! assert!(boxes.hit_test(Point::new(0, 0)).is_none());
//! ```
//!
//! ## Layout rules
//!
//! | Quantity | Value |
//! |---|---|
//! | base key width | `width / 16` |
//! | base key height | `height / 12` |
//! | horizontal gap | `base width / 10` |
//! | vertical gap | `base height / 5` |
//! | first row top | `height / 3` |
//! | row left edge | centered on **row 0**, shared by every row |
//!
//! Wide keys (`tab`, `delete`, `capslock`, `return`, `shift`) are 1.5× the
//! base width, `Space` is 4×.

pub mod geometry;
pub mod layout;

pub use geometry::{distance, Point, Rect};
pub use layout::{compute_key_boxes, print_boxes, KeyBox, KeyBoxes, KeyDescriptor, ROWS};
