//! Owned singly linked list used as a bucket by the separate-chaining map.

/// A node in a [`Chain`]
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// The key stored in this node
    key: K,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Node<K, V>>>,
}

impl<K, V> Node<K, V> {
    /// The node's key
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The node's value
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The following node, if any
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}

/// A singly linked list of key-value nodes.
///
/// New nodes are always linked in at the head. Each chain owns its nodes outright,
/// so there is no sharing and no way to form a cycle.
#[derive(Debug, Clone)]
pub struct Chain<K, V> {
    /// First node of the chain
    head: Option<Box<Node<K, V>>>,
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Chain<K, V> {
    /// Creates an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// The first node, if any
    #[must_use]
    pub fn head(&self) -> Option<&Node<K, V>> {
        self.head.as_deref()
    }

    /// Returns true if the chain has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links a new node in at the head.
    ///
    /// Does not look for an existing node with the same key.
    pub fn insert(&mut self, key: K, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { key, value, next }));
    }

    /// Unlinks the head node and returns its pair
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let node = self.head.take()?;
        let Node { key, value, next } = *node;
        self.head = next;
        Some((key, value))
    }

    /// Iterates the pairs from head to tail
    #[must_use]
    pub fn iter(&self) -> ChainIter<'_, K, V> {
        ChainIter { next: self.head.as_deref() }
    }
}

impl<K: PartialEq, V> Chain<K, V> {
    /// Returns the first node holding `key`
    pub fn contains(&self, key: &K) -> Option<&Node<K, V>> {
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            if node.key == *key {
                return Some(node);
            }
            current = node.next.as_deref();
        }
        None
    }

    /// Returns the first node holding `key`, mutably
    pub fn find_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.key == *key {
                return Some(node);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Mutable access to the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_mut(key).map(|node| &mut node.value)
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != *key) {
            link = &mut link.as_mut()?.next;
        }

        let node = link.take()?;
        let Node { value, next, .. } = *node;
        *link = next;
        Some(value)
    }
}

impl<K, V> Drop for Chain<K, V> {
    // unlink one node at a time so long chains do not recurse on drop
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Iterator over the pairs of a [`Chain`], head first
#[derive(Debug, Clone)]
pub struct ChainIter<'a, K, V> {
    /// Node to yield next
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for ChainIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}
