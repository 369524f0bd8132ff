//! Drawing collaborator interface.
//!
//! The tree renders itself by issuing outline and label calls against a
//! [`Canvas`]. What a canvas does with them (record, rasterise, export) is up
//! to the implementation.

use std::fmt;

use kurbo::{Circle, Point};

/// Sink for the draw calls issued while rendering a tree.
pub trait Canvas {
    /// Stroke the outline of `disc`.
    fn outline(&mut self, disc: Circle);

    /// Draw `text` centred on `position` at font size `size`.
    fn label(&mut self, text: &str, position: Point, size: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Outline(Circle),
    Label {
        text: String,
        position: Point,
        size: f64,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Outline(disc) => write!(
                f,
                "outline {} {} {}",
                disc.center.x, disc.center.y, disc.radius
            ),
            DrawCommand::Label {
                text,
                position,
                size,
            } => write!(f, "label {:?} {} {} {}", text, position.x, position.y, size),
        }
    }
}

/// A canvas that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn outlines(&self) -> impl Iterator<Item = &Circle> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Outline(disc) => Some(disc),
            DrawCommand::Label { .. } => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for DrawList {
    fn outline(&mut self, disc: Circle) {
        self.commands.push(DrawCommand::Outline(disc));
    }

    fn label(&mut self, text: &str, position: Point, size: f64) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
            position,
            size,
        });
    }
}

/// Label sizing: half the disc radius, capped at `max_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub max_size: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self { max_size: 16.0 }
    }
}

impl LabelStyle {
    pub fn size_for(&self, radius: f64) -> f64 {
        (radius / 2.0).min(self.max_size)
    }
}
