//! Domain layer: the subdivision tree and its geometry
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod display;
pub mod error;
pub mod event;
pub mod geometry;
pub mod node;
pub mod render;
pub mod tree;

pub use display::ToTermTree;
pub use error::DomainError;
pub use event::Event;
pub use node::{Children, Node, SplitOutcome};
pub use render::{Canvas, DrawCommand, DrawList, LabelStyle};
pub use tree::SubdivisionTree;
