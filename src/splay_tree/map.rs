use crate::arena::{Handle, TypedArena};
use crate::error::{Error, Result};
use crate::splay_tree::node::Node;
use crate::splay_tree::tree::{self, Tree, Upsert};
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a splay tree.
///
/// A splay tree is a self-adjusting binary search tree with the additional property that recently
/// accessed items are quick to access again. After each insertion, splaying lookup, or removal,
/// the node that was touched is "splayed" to the root of the tree through a sequence of rotations,
/// which gives amortized `O(log N)` cost per operation.
///
/// Nodes are stored in a typed arena and linked by handles, so the parent links never own the
/// nodes they point to.
///
/// Lookups that splay (`get`, `try_get`, `get_mut`) take `&mut self`. `peek`, `contains_key` and
/// `contains` leave the shape of the tree untouched and work through a shared reference.
///
/// # Examples
///
/// ```
/// use splay_collections::splay_tree::SplayMap;
///
/// let mut map = SplayMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.try_get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.root_key(), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.root_key(), Some(&0));
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct SplayMap<K, V> {
    tree: Tree<K, V>,
    len: usize,
}

impl<K, V> SplayMap<K, V> {
    /// Constructs a new, empty `SplayMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `SplayMap<K, V>` that can hold `capacity` entries before its node
    /// arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::with_capacity(1024);
    /// assert!(map.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        SplayMap {
            tree: Tree::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of entries the map can hold before its node arena reallocates.
    pub fn capacity(&self) -> usize {
        self.tree.arena.capacity()
    }

    /// Adds a key-value pair to the map. Returns `Error::DuplicateKey` if the key already exists,
    /// in which case the stored value is left unchanged and the existing entry is splayed to the
    /// root.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::Error;
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.add(1, 1), Ok(()));
    /// assert_eq!(map.add(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<()>
    where
        K: Ord,
    {
        match tree::upsert(&mut self.tree, key, value, false) {
            Upsert::Inserted => {
                self.len += 1;
                Ok(())
            },
            Upsert::Duplicate => {
                debug!("rejected duplicate key in splay map of {} entries", self.len);
                Err(Error::DuplicateKey)
            },
            Upsert::Replaced(_) => unreachable!(),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned. The entry is splayed to the root either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Ok(&1));
    /// assert_eq!(map.insert(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Ok(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match tree::upsert(&mut self.tree, key, value, true) {
            Upsert::Inserted => {
                self.len += 1;
                None
            },
            Upsert::Replaced(old_value) => Some(old_value),
            Upsert::Duplicate => unreachable!(),
        }
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = tree::find_node(&self.tree, key)?;
        Some(self.remove_node(node))
    }

    /// Removes a key-value pair from the map only if the key exists and its value equals `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove_entry_if_eq(&1, &2), None);
    /// assert_eq!(map.remove_entry_if_eq(&1, &1), Some((1, 1)));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry_if_eq<Q>(&mut self, key: &Q, value: &V) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        let node = tree::find_node(&self.tree, key)?;
        if self.tree.arena[node].entry.value != *value {
            return None;
        }
        Some(self.remove_node(node))
    }

    fn remove_node(&mut self, node: Handle) -> (K, V) {
        self.len -= 1;
        tree::delete(&mut self.tree, node).into_pair()
    }

    /// Checks if a key exists in the map. Note that `contains_key` does not splay the tree in
    /// order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::find_node(&self.tree, key).is_some()
    }

    /// Checks if a key exists in the map and is associated with `value`. Does not splay the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains(&1, &"a"));
    /// assert!(!map.contains(&1, &"b"));
    /// assert!(!map.contains(&2, &"a"));
    /// ```
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: PartialEq,
    {
        self.peek(key).map_or(false, |stored| stored == value)
    }

    /// Returns an immutable reference to the value associated with a particular key and splays
    /// its entry to the root. Returns `Error::KeyNotFound` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::Error;
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// assert_eq!(map.root_key(), Some(&1));
    /// ```
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.try_get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns an immutable reference to the value associated with a particular key and splays
    /// its entry to the root. Returns `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.try_get(&0), None);
    /// assert_eq!(map.try_get(&1), Some(&1));
    /// ```
    pub fn try_get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Returns a mutable reference to the value associated with a particular key and splays its
    /// entry to the root. Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = tree::find_node(&self.tree, key)?;
        tree::splay(&mut self.tree, node);
        Some(&mut self.tree.arena[node].entry.value)
    }

    /// Returns an immutable reference to the value associated with a particular key without
    /// splaying the tree. Returns `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.peek(&1), Some(&1));
    /// assert_eq!(map.root_key(), Some(&2));
    /// ```
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tree::find_node(&self.tree, key).map(|node| &self.tree.arena[node].entry.value)
    }

    /// Returns the key at the root of the tree, which is the most recently touched key. Returns
    /// `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// assert_eq!(map.root_key(), Some(&2));
    /// ```
    pub fn root_key(&self) -> Option<&K> {
        self.tree.root.map(|root| &self.tree.arena[root].entry.key)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let map: SplayMap<u32, u32> = SplayMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing splay map of {} entries", self.len);
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty. Note that `min`
    /// does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.tree.root.map(|root| {
            let node = tree::subtree_min(&self.tree, root);
            &self.tree.arena[node].entry.key
        })
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty. Note that `max`
    /// does not splay the tree in order to use a non-mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        self.tree.root.map(|root| {
            let node = tree::subtree_max(&self.tree, root);
            &self.tree.arena[node].entry.key
        })
    }

    /// Returns the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.keys(), vec![&1, &2]);
    /// ```
    pub fn keys(&self) -> Vec<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns the values of the map in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.values(), vec![&"a", &"b"]);
    /// ```
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Clones every key-value pair into `destination` in ascending key order, starting at
    /// `offset`. Returns `Error::InvalidArgument` if `offset` is past the end of `destination` or
    /// if there is not enough room after `offset` for every entry. Nothing is written on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(2, 20);
    /// map.insert(1, 10);
    ///
    /// let mut buffer = [(0, 0); 3];
    /// assert!(map.copy_to(&mut buffer, 1).is_ok());
    /// assert_eq!(buffer, [(0, 0), (1, 10), (2, 20)]);
    /// assert!(map.copy_to(&mut buffer, 2).is_err());
    /// ```
    pub fn copy_to(&self, destination: &mut [(K, V)], offset: usize) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        if offset > destination.len() {
            debug!("copy_to offset {} is past destination of length {}", offset, destination.len());
            return Err(Error::InvalidArgument("offset is past the end of the destination"));
        }
        if self.len > destination.len() - offset {
            debug!(
                "copy_to destination of length {} cannot hold {} entries at offset {}",
                destination.len(),
                self.len,
                offset,
            );
            return Err(Error::InvalidArgument("destination is too small to hold every entry"));
        }
        for (slot, (key, value)) in destination[offset..].iter_mut().zip(self.iter()) {
            *slot = (key.clone(), value.clone());
        }
        Ok(())
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal and does not splay the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SplayMapIter<'_, K, V> {
        SplayMapIter {
            arena: &self.tree.arena,
            current: self.tree.root,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay_collections::splay_tree::SplayMap;
    ///
    /// let mut map = SplayMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> SplayMapIterMut<'_, K, V> {
        SplayMapIterMut {
            current: self.tree.root,
            nodes: self.tree.arena.blocks_mut(),
            stack: Vec::new(),
        }
    }
}

impl<K, V> IntoIterator for SplayMap<K, V> {
    type IntoIter = SplayMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.root,
            nodes: self.tree.arena.into_blocks(),
            stack: Vec::new(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a SplayMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = SplayMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut SplayMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = SplayMapIterMut<'a, K, V>;
    type Item = (&'a K, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `SplayMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct SplayMapIntoIter<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<K, V> Iterator for SplayMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.nodes[handle.index()].as_ref().and_then(|node| node.left);
        }
        let handle = self.stack.pop()?;
        let node = self.nodes[handle.index()].take()?;
        self.current = node.right;
        Some(node.entry.into_pair())
    }
}

/// An iterator for `SplayMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct SplayMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    arena: &'a TypedArena<Node<K, V>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, K, V> Iterator for SplayMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = arena[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &arena[handle];
            self.current = node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A mutable iterator for `SplayMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct SplayMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    nodes: Vec<Option<&'a mut Node<K, V>>>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, K, V> Iterator for SplayMapIterMut<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = self.nodes[handle.index()].as_ref().and_then(|node| node.left);
        }
        let handle = self.stack.pop()?;
        let node = self.nodes[handle.index()].take()?;
        self.current = node.right;
        let entry = &mut node.entry;
        Some((&entry.key, &mut entry.value))
    }
}

impl<K, V> Default for SplayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for SplayMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &SplayMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for SplayMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> fmt::Debug for SplayMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for SplayMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = SplayMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for SplayMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, Q> Index<&'a Q> for SplayMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.peek(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, Q> IndexMut<&'a Q> for SplayMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}
