//! The subdivision tree: absent until the first split, then a single owned root.

use kurbo::{Circle, Point};

use crate::domain::error::DomainError;
use crate::domain::node::{Node, SplitOutcome};
use crate::domain::render::{Canvas, LabelStyle};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdivisionTree {
    root: Option<Node>,
}

impl SubdivisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: Node) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total leaf count; 0 for an absent tree.
    pub fn weight(&self) -> usize {
        self.root.as_ref().map_or(0, Node::weight)
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Split the leaf selected by `target` within the root disc.
    ///
    /// On an absent tree this only plants the root leaf; `target` is ignored.
    pub fn split(&mut self, disc: Circle, target: Point) -> SplitOutcome {
        match self.root.as_mut() {
            None => {
                self.root = Some(Node::leaf());
                SplitOutcome::Planted
            }
            Some(root) => root.subdivide_at(disc, target),
        }
    }

    /// Rebalance the whole tree; returns the number of corrective steps.
    pub fn balance(&mut self) -> usize {
        self.root.as_mut().map_or(0, Node::balance)
    }

    pub fn render(&self, disc: Circle, canvas: &mut dyn Canvas, style: &LabelStyle) {
        if let Some(root) = &self.root {
            root.render(disc, canvas, style);
        }
    }

    pub fn check_weights(&self) -> Result<(), DomainError> {
        self.root.as_ref().map_or(Ok(()), Node::check_weights)
    }
}
