//! Subdivision nodes: point-directed splitting and weight rebalancing.
//!
//! Every node is either a leaf or owns exactly two children. The only derived
//! state is `weight`, the number of leaves below (and including) the node.
//! Geometry is not stored; callers pass the disc a node occupies and the
//! children's discs are derived with [`geometry::halves`].

use std::fmt;
use std::mem;

use kurbo::{Circle, Point};
use tracing::trace;

use crate::domain::error::DomainError;
use crate::domain::geometry;
use crate::domain::render::{Canvas, LabelStyle};

/// Result of a split trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The tree was absent and now holds a single leaf.
    Planted,
    /// A leaf was replaced by a pair of fresh leaves.
    Split,
    /// The target fell outside both child discs of an already split node.
    /// Nothing changed.
    Rejected,
}

impl SplitOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, SplitOutcome::Rejected)
    }
}

impl fmt::Display for SplitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitOutcome::Planted => f.write_str("planted"),
            SplitOutcome::Split => f.write_str("split"),
            SplitOutcome::Rejected => f.write_str("rejected"),
        }
    }
}

/// The two subtrees of a split node. Created and dropped together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Children {
    pub left: Node,
    pub right: Node,
}

impl Children {
    fn leaves() -> Self {
        Self {
            left: Node::leaf(),
            right: Node::leaf(),
        }
    }

    /// Heavier child; the left one on a tie.
    fn heavier_mut(&mut self) -> &mut Node {
        if self.right.weight > self.left.weight {
            &mut self.right
        } else {
            &mut self.left
        }
    }

    /// Lighter child; the right one unless the left is strictly lighter.
    fn lighter_mut(&mut self) -> &mut Node {
        if self.left.weight >= self.right.weight {
            &mut self.right
        } else {
            &mut self.left
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    weight: usize,
    children: Option<Box<Children>>,
}

impl Default for Node {
    fn default() -> Self {
        Self::leaf()
    }
}

impl Node {
    pub fn leaf() -> Self {
        Self {
            weight: 1,
            children: None,
        }
    }

    pub fn branch(left: Node, right: Node) -> Self {
        Self {
            weight: left.weight + right.weight,
            children: Some(Box::new(Children { left, right })),
        }
    }

    /// Number of leaves in this subtree.
    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<&Children> {
        self.children.as_deref()
    }

    pub fn left(&self) -> Option<&Node> {
        self.children().map(|c| &c.left)
    }

    pub fn right(&self) -> Option<&Node> {
        self.children().map(|c| &c.right)
    }

    /// Number of levels, counting a lone leaf as 1.
    pub fn depth(&self) -> usize {
        match self.children() {
            None => 1,
            Some(c) => 1 + c.left.depth().max(c.right.depth()),
        }
    }

    /// Counts leaves by walking the subtree, independent of stored weights.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some(c) => c.left.leaf_count() + c.right.leaf_count(),
        }
    }

    fn refresh_weight(&mut self) {
        self.weight = match self.children() {
            None => 1,
            Some(c) => c.left.weight + c.right.weight,
        };
    }

    /// Split the leaf under `target`, descending from a node occupying `disc`.
    ///
    /// A leaf is split unconditionally. A split node hands the call to the
    /// first child disc (left, then right) containing `target`, or rejects it
    /// when neither does.
    pub fn subdivide_at(&mut self, disc: Circle, target: Point) -> SplitOutcome {
        let Some(children) = self.children.as_deref_mut() else {
            self.children = Some(Box::new(Children::leaves()));
            self.weight = 2;
            return SplitOutcome::Split;
        };

        let (left_disc, right_disc) = geometry::halves(disc);
        let outcome = if geometry::selects(left_disc, target) {
            children.left.subdivide_at(left_disc, target)
        } else if geometry::selects(right_disc, target) {
            children.right.subdivide_at(right_disc, target)
        } else {
            trace!(?target, ?disc, "target outside both child discs");
            return SplitOutcome::Rejected;
        };

        self.refresh_weight();
        outcome
    }

    /// Rebalance this subtree bottom-up.
    ///
    /// After both children are balanced, a level whose sides differ by more
    /// than one gets a single corrective step. Returns how many such steps
    /// were taken in the whole subtree.
    pub fn balance(&mut self) -> usize {
        let Some(children) = self.children.as_deref_mut() else {
            return 0;
        };
        let Children { left, right } = children;

        let mut steps = left.balance() + right.balance();
        if left.weight > right.weight + 1 {
            Self::transplant(left, right);
            steps += 1;
        } else if right.weight > left.weight + 1 {
            Self::transplant(right, left);
            steps += 1;
        }
        steps
    }

    /// Move weight from `heavy` into `light`, its sibling.
    ///
    /// `largest` is the heavier child of `heavy`. If the lighter child of
    /// `light` is exactly one leaf short of `largest`, the two trade subtrees.
    /// Otherwise `largest` trades subtrees with `light` itself.
    fn transplant(heavy: &mut Node, light: &mut Node) {
        // heavy outweighs a sibling of weight >= 1 by at least 2, so it is split
        let Some(heavy_children) = heavy.children.as_deref_mut() else {
            return;
        };
        let largest = heavy_children.heavier_mut();

        let partner = light
            .children
            .as_deref_mut()
            .map(Children::lighter_mut)
            .filter(|smallest| smallest.weight + 1 == largest.weight);

        if let Some(smallest) = partner {
            trace!(
                largest = largest.weight,
                smallest = smallest.weight,
                "swapping matched subtrees"
            );
            mem::swap(&mut largest.children, &mut smallest.children);
            smallest.refresh_weight();
            largest.refresh_weight();
        } else {
            trace!(
                largest = largest.weight,
                light = light.weight,
                "transplanting into light side"
            );
            mem::swap(&mut largest.children, &mut light.children);
            largest.refresh_weight();
        }

        heavy.refresh_weight();
        light.refresh_weight();
    }

    /// Issue draw calls for this subtree occupying `disc`.
    pub fn render(&self, disc: Circle, canvas: &mut dyn Canvas, style: &LabelStyle) {
        canvas.outline(disc);
        let size = style.size_for(disc.radius);
        let Some(children) = self.children() else {
            canvas.label("1", disc.center, size);
            return;
        };

        let (left_disc, right_disc) = geometry::halves(disc);
        children.left.render(left_disc, canvas, style);
        children.right.render(right_disc, canvas, style);
        canvas.label(
            &self.weight.to_string(),
            geometry::label_anchor(disc),
            size,
        );
    }

    /// Verify that every stored weight equals the leaf count below it.
    pub fn check_weights(&self) -> Result<(), DomainError> {
        self.check_weights_at(0).map(|_| ())
    }

    fn check_weights_at(&self, depth: usize) -> Result<usize, DomainError> {
        let expected = match self.children() {
            None => 1,
            Some(c) => c.left.check_weights_at(depth + 1)? + c.right.check_weights_at(depth + 1)?,
        };
        if self.weight != expected {
            return Err(DomainError::WeightMismatch {
                depth,
                stored: self.weight,
                expected,
            });
        }
        Ok(expected)
    }

    /// Largest weight difference between the two sides of any split node.
    pub fn max_imbalance(&self) -> usize {
        match self.children() {
            None => 0,
            Some(c) => c
                .left
                .weight
                .abs_diff(c.right.weight)
                .max(c.left.max_imbalance())
                .max(c.right.max_imbalance()),
        }
    }
}
