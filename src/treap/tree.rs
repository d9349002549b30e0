use crate::treap::node::Node;
use std::cmp::Ordering;

pub type Tree = Option<Box<Node>>;

/// Horizontal indent added per level of depth in the rotated diagram.
pub const INDENT_WIDTH: usize = 10;

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    child.left = Some(node);
    child
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    child.right = Some(node);
    child
}

pub fn insert(tree: &mut Tree, new_node: Node) {
    match tree.take() {
        Some(mut node) => {
            if new_node.key < node.key {
                insert(&mut node.left, new_node);
                if node.is_heap_property_violated(&node.left) {
                    node = rotate_right(node);
                }
            } else {
                insert(&mut node.right, new_node);
                if node.is_heap_property_violated(&node.right) {
                    node = rotate_left(node);
                }
            }
            *tree = Some(node);
        },
        None => *tree = Some(Box::new(new_node)),
    }
}

pub fn get(tree: &Tree, key: char) -> Option<u32> {
    tree.as_ref().and_then(|node| {
        match key.cmp(&node.key) {
            Ordering::Less => get(&node.left, key),
            Ordering::Greater => get(&node.right, key),
            Ordering::Equal => Some(node.priority),
        }
    })
}

pub fn contains(tree: &Tree, key: char) -> bool {
    get(tree, key).is_some()
}

// right subtree first so the rendered tree reads rotated 90 degrees,
// with the right child on top
pub fn write_diagram(tree: &Tree, depth: usize, lines: &mut Vec<String>) {
    if let Some(ref node) = tree {
        write_diagram(&node.right, depth + 1, lines);
        lines.push(format!(
            "{:width$}{}|{}",
            "",
            node.priority,
            node.key,
            width = depth * INDENT_WIDTH
        ));
        write_diagram(&node.left, depth + 1, lines);
    }
}
