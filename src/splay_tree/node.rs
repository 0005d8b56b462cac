use crate::arena::Handle;
use crate::entry::Entry;

/// A node of the splay tree. Links are handles into the tree's arena; `parent` is a back
/// reference used only for navigation.
#[derive(Clone)]
pub struct Node<K, V> {
    pub entry: Entry<K, V>,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    pub fn new(key: K, value: V, parent: Option<Handle>) -> Self {
        Node {
            entry: Entry { key, value },
            parent,
            left: None,
            right: None,
        }
    }
}
