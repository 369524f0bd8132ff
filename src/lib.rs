//! Recursively subdivided disc.
//!
//! Clicking inside the disc splits the region under the cursor into two
//! half-size halves; a balance command reshapes the resulting binary tree by
//! moving subtrees from the heavier side of each split to the lighter one.
//! One pass takes at most one corrective step per split, which evens out every
//! tree of up to six leaves; larger trees may need further passes.
//!
//! Layers:
//! - [`domain`]: the tree, its implicit geometry and the drawing interface
//! - [`application`]: the session host and event replay
//! - [`infrastructure`]: filesystem boundary, SVG canvas, service wiring
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
