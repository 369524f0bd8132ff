//! Terminal tree view of a subdivision, one line per node.

use kurbo::Circle;
use termtree::Tree;
use tracing::instrument;

use crate::domain::geometry;
use crate::domain::node::Node;
use crate::domain::tree::SubdivisionTree;

/// Conversion into a printable `termtree` with each node's weight and disc.
pub trait ToTermTree {
    fn to_term_tree(&self, disc: Circle) -> Tree<String>;
}

fn describe(node: &Node, disc: Circle) -> String {
    let kind = if node.is_leaf() { "leaf" } else { "split" };
    format!(
        "{} {} @ ({}, {}) r={}",
        kind, node.weight(), disc.center.x, disc.center.y, disc.radius
    )
}

impl ToTermTree for Node {
    fn to_term_tree(&self, disc: Circle) -> Tree<String> {
        let tree = Tree::new(describe(self, disc));
        match self.children() {
            None => tree,
            Some(children) => {
                let (left, right) = geometry::halves(disc);
                tree.with_leaves([
                    children.left.to_term_tree(left),
                    children.right.to_term_tree(right),
                ])
            }
        }
    }
}

impl ToTermTree for SubdivisionTree {
    #[instrument(level = "debug", skip(self))]
    fn to_term_tree(&self, disc: Circle) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_term_tree(disc),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_pair_when_converted_then_lists_both_children() {
        let tree = SubdivisionTree::from_root(Node::branch(Node::leaf(), Node::leaf()));
        let rendered = tree
            .to_term_tree(Circle::new((400.0, 400.0), 350.0))
            .to_string();

        assert!(rendered.starts_with("split 2 @ (400, 400) r=350"));
        assert!(rendered.contains("leaf 1 @ (225, 400) r=175"));
        assert!(rendered.contains("leaf 1 @ (575, 400) r=175"));
    }

    #[test]
    fn given_absent_tree_when_converted_then_placeholder() {
        let rendered = SubdivisionTree::new()
            .to_term_tree(Circle::new((0.0, 0.0), 1.0))
            .to_string();
        assert_eq!(rendered.trim(), "Empty tree");
    }
}
