//! Splitting and rebalancing through the public tree API.

use kurbo::{Circle, Point};
use rstest::{fixture, rstest};

use otcirc::domain::{Node, SplitOutcome, SubdivisionTree};
use otcirc::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn leaf() -> Node {
    Node::leaf()
}

fn pair() -> Node {
    Node::branch(leaf(), leaf())
}

#[fixture]
fn disc() -> Circle {
    Circle::new((400.0, 400.0), 350.0)
}

/// Tree after planting and splitting the root once.
#[fixture]
fn split_once(disc: Circle) -> SubdivisionTree {
    let mut tree = SubdivisionTree::new();
    assert_eq!(tree.split(disc, Point::new(400.0, 400.0)), SplitOutcome::Planted);
    assert_eq!(tree.split(disc, Point::new(400.0, 400.0)), SplitOutcome::Split);
    tree
}

fn assert_invariants(tree: &SubdivisionTree) {
    tree.check_weights().expect("weights consistent");
    if let Some(root) = tree.root() {
        assert_eq!(root.weight(), root.leaf_count());
    }
}

// ============================================================
// Split
// ============================================================

#[rstest]
#[case(Point::new(400.0, 400.0))]
#[case(Point::new(-5000.0, 12.0))]
#[case(Point::new(f64::MAX, f64::MIN))]
fn given_absent_tree_when_split_anywhere_then_single_leaf(disc: Circle, #[case] target: Point) {
    let mut tree = SubdivisionTree::new();
    let outcome = tree.split(disc, target);

    assert_eq!(outcome, SplitOutcome::Planted);
    assert_eq!(tree.weight(), 1);
    assert_eq!(tree.depth(), 1);
}

#[rstest]
fn given_far_point_then_left_region_point_when_split_then_depth_two(disc: Circle) {
    let mut tree = SubdivisionTree::new();
    tree.split(disc, Point::new(5000.0, 5000.0));
    let outcome = tree.split(disc, Point::new(225.0, 400.0));

    assert_eq!(outcome, SplitOutcome::Split);
    let root = tree.root().expect("root");
    assert_eq!(root.weight(), 2);
    assert_eq!(root.left().map(Node::weight), Some(1));
    assert_eq!(root.right().map(Node::weight), Some(1));
    assert_invariants(&tree);
}

#[rstest]
#[case::above(Point::new(400.0, 100.0))]
#[case::below(Point::new(400.0, 700.0))]
#[case::far_left(Point::new(20.0, 400.0))]
#[case::far_right(Point::new(780.0, 400.0))]
fn given_split_root_when_target_outside_both_children_then_rejected(
    disc: Circle,
    split_once: SubdivisionTree,
    #[case] target: Point,
) {
    let mut tree = split_once.clone();
    let outcome = tree.split(disc, target);

    assert_eq!(outcome, SplitOutcome::Rejected);
    assert!(!outcome.is_success());
    assert_eq!(tree, split_once);
}

#[rstest]
#[case::left(Point::new(225.0, 400.0), 2, 1)]
#[case::right(Point::new(575.0, 400.0), 1, 2)]
#[case::left_rim(Point::new(50.0, 400.0), 2, 1)]
#[case::shared_rim(Point::new(400.0, 400.0), 2, 1)]
fn given_split_root_when_target_in_child_then_that_child_splits(
    disc: Circle,
    mut split_once: SubdivisionTree,
    #[case] target: Point,
    #[case] left_weight: usize,
    #[case] right_weight: usize,
) {
    assert_eq!(split_once.split(disc, target), SplitOutcome::Split);

    let root = split_once.root().expect("root");
    assert_eq!(root.weight(), 3);
    assert_eq!(root.left().map(Node::weight), Some(left_weight));
    assert_eq!(root.right().map(Node::weight), Some(right_weight));
    assert_invariants(&split_once);
}

#[rstest]
fn given_repeated_left_clicks_when_split_then_builds_left_spine(disc: Circle) {
    let mut tree = SubdivisionTree::new();
    // each click sits on the centre of the leftmost leaf at the next depth
    let targets = [400.0, 400.0, 225.0, 137.5, 93.75];
    for x in targets {
        assert!(tree.split(disc, Point::new(x, 400.0)).is_success());
    }

    assert_eq!(tree.weight(), 5);
    assert_eq!(tree.depth(), 5);
    assert_invariants(&tree);
}

// ============================================================
// Balance
// ============================================================

#[rstest]
fn given_left_heavy_four_over_leaf_when_balanced_then_within_one_and_total_kept() {
    let mut tree = SubdivisionTree::from_root(Node::branch(Node::branch(pair(), pair()), leaf()));
    tree.balance();

    let root = tree.root().expect("root");
    assert_eq!(root.weight(), 5);
    let left = root.left().map(Node::weight).unwrap_or_default();
    let right = root.right().map(Node::weight).unwrap_or_default();
    assert!(left.abs_diff(right) <= 1, "left {left}, right {right}");
    assert_eq!(root.max_imbalance(), 1);
    assert_invariants(&tree);
}

#[rstest]
#[case::left_spine(
    Node::branch(Node::branch(pair(), leaf()), leaf()),
    Node::branch(pair(), pair())
)]
#[case::exact_partner(
    Node::branch(Node::branch(pair(), pair()), pair()),
    Node::branch(Node::branch(leaf(), pair()), Node::branch(leaf(), pair()))
)]
#[case::right_heavy(
    Node::branch(leaf(), Node::branch(pair(), pair())),
    Node::branch(pair(), Node::branch(leaf(), pair()))
)]
#[case::already_balanced(
    Node::branch(pair(), Node::branch(leaf(), pair())),
    Node::branch(pair(), Node::branch(leaf(), pair()))
)]
fn given_shape_when_balanced_then_converges_to_expected(#[case] start: Node, #[case] expected: Node) {
    let total = start.weight();
    let mut tree = SubdivisionTree::from_root(start);
    tree.balance();

    assert_eq!(tree.root(), Some(&expected));
    assert_eq!(tree.weight(), total);
    assert!(expected.max_imbalance() <= 1);
    assert_invariants(&tree);
}

#[rstest]
#[case(Node::branch(Node::branch(pair(), pair()), leaf()))]
#[case(Node::branch(Node::branch(pair(), leaf()), leaf()))]
#[case(Node::branch(leaf(), Node::branch(pair(), pair())))]
fn given_tree_when_balanced_twice_then_second_pass_is_noop(#[case] start: Node) {
    let mut tree = SubdivisionTree::from_root(start);
    tree.balance();
    let once = tree.clone();

    assert_eq!(tree.balance(), 0);
    assert_eq!(tree, once);
}

#[rstest]
fn given_deep_left_spine_from_clicks_when_balanced_then_leaf_count_kept(disc: Circle) {
    let mut tree = SubdivisionTree::new();
    for x in [400.0, 400.0, 225.0, 137.5] {
        tree.split(disc, Point::new(x, 400.0));
    }
    // spine: (((l, l), l), l)
    assert_eq!(
        tree.root(),
        Some(&Node::branch(Node::branch(pair(), leaf()), leaf()))
    );

    tree.balance();

    assert_eq!(tree.weight(), 4);
    assert_eq!(tree.root().map(Node::leaf_count), Some(4));
    assert!(tree.root().map_or(0, Node::max_imbalance) <= 1);
    assert_invariants(&tree);
}

/// Every distinct tree shape with exactly `leaves` leaves.
fn all_shapes(leaves: usize) -> Vec<Node> {
    if leaves == 1 {
        return vec![leaf()];
    }
    let mut shapes = Vec::new();
    for left_leaves in 1..leaves {
        for left in all_shapes(left_leaves) {
            for right in all_shapes(leaves - left_leaves) {
                shapes.push(Node::branch(left.clone(), right));
            }
        }
    }
    shapes
}

#[rstest]
fn given_every_shape_up_to_six_leaves_when_balanced_then_within_one_and_stable(
    #[values(1, 2, 3, 4, 5, 6)] leaves: usize,
) {
    let shapes = all_shapes(leaves);
    assert_eq!(shapes.len(), [1, 1, 2, 5, 14, 42][leaves - 1]);

    for start in shapes {
        let mut tree = SubdivisionTree::from_root(start.clone());
        tree.balance();
        let once = tree.clone();

        let root = tree.root().expect("root");
        assert!(root.max_imbalance() <= 1, "{start:?} -> {root:?}");
        assert_eq!(tree.weight(), leaves);
        assert_invariants(&tree);
        assert_eq!(tree.balance(), 0, "{start:?}");
        assert_eq!(tree, once);
    }
}

// A single corrective step per level cannot even out a seven-leaf spine:
// the first pass leaves the root split 4/3 but its left child at 1/3.
#[rstest]
fn given_seven_leaf_left_spine_from_clicks_when_balanced_then_needs_second_pass(disc: Circle) {
    let mut tree = SubdivisionTree::new();
    for x in [400.0, 400.0, 225.0, 137.5, 93.75, 71.875, 60.9375] {
        assert!(tree.split(disc, Point::new(x, 400.0)).is_success());
    }
    let spine = (0..6).fold(leaf(), |acc, _| Node::branch(acc, leaf()));
    assert_eq!(tree.root(), Some(&spine));

    assert_eq!(tree.balance(), 4);
    assert_eq!(
        tree.root(),
        Some(&Node::branch(
            Node::branch(leaf(), Node::branch(leaf(), pair())),
            Node::branch(leaf(), pair())
        ))
    );
    assert_eq!(tree.root().map(Node::max_imbalance), Some(2));
    assert_invariants(&tree);

    assert_eq!(tree.balance(), 1);
    assert_eq!(
        tree.root(),
        Some(&Node::branch(
            Node::branch(pair(), pair()),
            Node::branch(leaf(), pair())
        ))
    );
    assert_eq!(tree.root().map(Node::max_imbalance), Some(1));
    assert_invariants(&tree);
}

#[rstest]
fn given_balanced_tree_when_split_again_then_geometry_follows_new_shape(disc: Circle) {
    // after balancing, the right child is a pair, so a click on the right
    // child's left half reaches a leaf at depth 2
    let mut tree = SubdivisionTree::from_root(Node::branch(Node::branch(pair(), leaf()), leaf()));
    tree.balance();

    let outcome = tree.split(disc, Point::new(487.5, 400.0));

    assert_eq!(outcome, SplitOutcome::Split);
    assert_eq!(tree.root().and_then(Node::right).map(Node::weight), Some(3));
    assert_invariants(&tree);
}
