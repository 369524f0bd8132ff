//! Implicit node geometry.
//!
//! A node's disc is never stored. It is derived from the root disc and the
//! left/right path taken to reach the node: each step halves the radius and
//! shifts the centre horizontally by half the parent's radius.

use kurbo::{Circle, Point};

/// Discs of the left and right children of a node occupying `disc`.
pub fn halves(disc: Circle) -> (Circle, Circle) {
    let half = disc.radius / 2.0;
    let Point { x, y } = disc.center;
    (
        Circle::new((x - half, y), half),
        Circle::new((x + half, y), half),
    )
}

/// Whether `point` selects `disc`. Points on the rim count as inside.
pub fn selects(disc: Circle, point: Point) -> bool {
    (point - disc.center).hypot2() <= disc.radius * disc.radius
}

/// Anchor of a branch's weight label: half a radius below the centre.
pub fn label_anchor(disc: Circle) -> Point {
    Point::new(disc.center.x, disc.center.y + disc.radius / 2.0)
}
