use crate::arena::{Handle, TypedArena};
use crate::entry::Entry;
use crate::splay_tree::node::Node;
use log::trace;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// Nodes of a splay tree and the handle of its root.
#[derive(Clone)]
pub struct Tree<K, V> {
    pub arena: TypedArena<Node<K, V>>,
    pub root: Option<Handle>,
}

impl<K, V> Tree<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: TypedArena::with_capacity(capacity),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

/// Outcome of `upsert`.
#[derive(Debug, Eq, PartialEq)]
pub enum Upsert<V> {
    Inserted,
    Replaced(V),
    Duplicate,
}

// Points whichever link referred to `old` (its parent's child slot, or the root) at `new`.
fn relink_parent<K, V>(
    tree: &mut Tree<K, V>,
    parent: Option<Handle>,
    old: Handle,
    new: Option<Handle>,
) {
    match parent {
        None => tree.root = new,
        Some(parent) => {
            let parent_node = &mut tree.arena[parent];
            if parent_node.left == Some(old) {
                parent_node.left = new;
            } else {
                parent_node.right = new;
            }
        },
    }
}

// Replaces the subtree rooted at `old` with the subtree rooted at `new`. The children of `old` are
// left untouched.
fn transplant<K, V>(tree: &mut Tree<K, V>, old: Handle, new: Option<Handle>) {
    let parent = tree.arena[old].parent;
    relink_parent(tree, parent, old, new);
    if let Some(new) = new {
        tree.arena[new].parent = parent;
    }
}

pub fn rotate_right<K, V>(tree: &mut Tree<K, V>, node: Handle) {
    let child = match tree.arena[node].left {
        Some(child) => child,
        None => return,
    };
    let parent = tree.arena[node].parent;
    relink_parent(tree, parent, node, Some(child));
    tree.arena[child].parent = parent;

    let inner = tree.arena[child].right;
    tree.arena[node].left = inner;
    if let Some(inner) = inner {
        tree.arena[inner].parent = Some(node);
    }

    tree.arena[child].right = Some(node);
    tree.arena[node].parent = Some(child);
}

pub fn rotate_left<K, V>(tree: &mut Tree<K, V>, node: Handle) {
    let child = match tree.arena[node].right {
        Some(child) => child,
        None => return,
    };
    let parent = tree.arena[node].parent;
    relink_parent(tree, parent, node, Some(child));
    tree.arena[child].parent = parent;

    let inner = tree.arena[child].left;
    tree.arena[node].right = inner;
    if let Some(inner) = inner {
        tree.arena[inner].parent = Some(node);
    }

    tree.arena[child].left = Some(node);
    tree.arena[node].parent = Some(child);
}

/// Rotates `node` up until it is the root of the tree.
pub fn splay<K, V>(tree: &mut Tree<K, V>, node: Handle) {
    let mut rotations = 0;
    while let Some(parent) = tree.arena[node].parent {
        let node_is_left = tree.arena[parent].left == Some(node);
        match tree.arena[parent].parent {
            // zig or zag
            None => {
                if node_is_left {
                    rotate_right(tree, parent);
                } else {
                    rotate_left(tree, parent);
                }
                rotations += 1;
            },
            Some(grandparent) => {
                let parent_is_left = tree.arena[grandparent].left == Some(parent);
                match (node_is_left, parent_is_left) {
                    // zig-zig
                    (true, true) => {
                        rotate_right(tree, grandparent);
                        rotate_right(tree, parent);
                    },
                    // zag-zag
                    (false, false) => {
                        rotate_left(tree, grandparent);
                        rotate_left(tree, parent);
                    },
                    // zig-zag: after the first rotation the grandparent is the new parent
                    (true, false) => {
                        rotate_right(tree, parent);
                        rotate_left(tree, grandparent);
                    },
                    // zag-zig
                    (false, true) => {
                        rotate_left(tree, parent);
                        rotate_right(tree, grandparent);
                    },
                }
                rotations += 2;
            },
        }
    }
    trace!("splayed node {} to the root in {} rotations", node.index(), rotations);
}

/// Returns the node holding `key` without changing the shape of the tree.
pub fn find_node<K, V, Q>(tree: &Tree<K, V>, key: &Q) -> Option<Handle>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut curr = tree.root;
    while let Some(handle) = curr {
        let node = &tree.arena[handle];
        curr = match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => node.left,
            Ordering::Greater => node.right,
            Ordering::Equal => return Some(handle),
        };
    }
    None
}

/// Inserts a key-value pair or, if `overwrite` is set, replaces the value of an existing key. The
/// touched node is splayed in every case, including a rejected duplicate.
pub fn upsert<K, V>(tree: &mut Tree<K, V>, key: K, value: V, overwrite: bool) -> Upsert<V>
where
    K: Ord,
{
    let mut parent = None;
    let mut is_left = false;
    let mut curr = tree.root;
    while let Some(handle) = curr {
        let node = &mut tree.arena[handle];
        match key.cmp(&node.entry.key) {
            Ordering::Less => {
                curr = node.left;
                is_left = true;
            },
            Ordering::Greater => {
                curr = node.right;
                is_left = false;
            },
            Ordering::Equal => {
                let outcome = if overwrite {
                    Upsert::Replaced(mem::replace(&mut node.entry.value, value))
                } else {
                    Upsert::Duplicate
                };
                splay(tree, handle);
                return outcome;
            },
        }
        parent = Some(handle);
    }

    let new_node = tree.arena.allocate(Node::new(key, value, parent));
    match parent {
        None => tree.root = Some(new_node),
        Some(parent) => {
            if is_left {
                tree.arena[parent].left = Some(new_node);
            } else {
                tree.arena[parent].right = Some(new_node);
            }
        },
    }
    splay(tree, new_node);
    Upsert::Inserted
}

/// Splays `node` to the root, unlinks it and returns its entry. A node with two children is
/// replaced by its in-order successor.
pub fn delete<K, V>(tree: &mut Tree<K, V>, node: Handle) -> Entry<K, V> {
    splay(tree, node);
    let (left, right) = (tree.arena[node].left, tree.arena[node].right);
    match (left, right) {
        (None, _) => transplant(tree, node, right),
        (_, None) => transplant(tree, node, left),
        (Some(left), Some(right)) => {
            let successor = subtree_min(tree, right);
            if successor != right {
                let successor_right = tree.arena[successor].right;
                transplant(tree, successor, successor_right);
                tree.arena[successor].right = Some(right);
                tree.arena[right].parent = Some(successor);
            }
            transplant(tree, node, Some(successor));
            tree.arena[successor].left = Some(left);
            tree.arena[left].parent = Some(successor);
        },
    }
    tree.arena.free(node).entry
}

pub fn subtree_min<K, V>(tree: &Tree<K, V>, mut node: Handle) -> Handle {
    while let Some(left) = tree.arena[node].left {
        node = left;
    }
    node
}

pub fn subtree_max<K, V>(tree: &Tree<K, V>, mut node: Handle) -> Handle {
    while let Some(right) = tree.arena[node].right {
        node = right;
    }
    node
}
