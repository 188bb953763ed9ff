//! Singly linked bucket chains.
//!
//! Every node is owned by exactly one link: either a chain head or the `next`
//! field of the node before it. Unlinking moves the `Box` out, so a removed
//! node can never be reached from the table again.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    /// The full hash the entry was inserted with, kept so that resizes never
    /// rehash keys and so that walks can skip mismatches without comparing
    /// keys.
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
    next: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(hash: u64, key: K, value: V) -> Box<Self> {
        Box::new(Self {
            hash,
            key,
            value,
            next: None,
        })
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Outcome of a chain walk.
pub(crate) struct Lookup<T> {
    pub(crate) found: Option<T>,
    /// Whether the walk stepped past at least one entry with another key.
    pub(crate) collided: bool,
}

pub(crate) enum Insertion<V> {
    /// The key was already present; this is the value it held.
    Replaced(V),
    /// A new node was appended at the tail.
    Appended { collided: bool },
}

pub(crate) struct Chain<K, V> {
    head: Link<K, V>,
}

impl<K, V> Chain<K, V> {
    pub(crate) const fn new() -> Self {
        Self { head: None }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    pub(crate) fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Lookup<&Node<K, V>> {
        let mut collided = false;
        for node in self.iter() {
            if node.hash == hash && eq(&node.key) {
                return Lookup {
                    found: Some(node),
                    collided,
                };
            }
            collided = true;
        }

        Lookup {
            found: None,
            collided,
        }
    }

    /// Walks to the link holding the entry matching `hash` and `eq`, or to
    /// the empty link at the tail if there is none.
    ///
    /// Each node is tested through a shared borrow. The mutable cursor only
    /// ever moves forward, so no loan on an earlier link survives a step.
    fn seek(&mut self, hash: u64, eq: impl Fn(&K) -> bool) -> (&mut Link<K, V>, bool) {
        let mut collided = false;
        let mut link = &mut self.head;
        while link
            .as_deref()
            .is_some_and(|node| !(node.hash == hash && eq(&node.key)))
        {
            collided = true;
            if let Some(node) = link {
                link = &mut node.next;
            }
        }

        (link, collided)
    }

    pub(crate) fn find_mut(
        &mut self,
        hash: u64,
        eq: impl Fn(&K) -> bool,
    ) -> Lookup<&mut Node<K, V>> {
        let (link, collided) = self.seek(hash, eq);
        Lookup {
            found: link.as_deref_mut(),
            collided,
        }
    }

    /// Replaces the value of a matching entry in place, or appends a new
    /// entry at the tail.
    ///
    /// Replacing is not a collision. Appending is one exactly when the chain
    /// already held an entry.
    pub(crate) fn insert(&mut self, hash: u64, key: K, value: V) -> Insertion<V>
    where
        K: Eq,
    {
        // A miss walks the whole chain, so `collided` is set exactly when the
        // chain was non-empty.
        let (link, collided) = self.seek(hash, |k| *k == key);
        match link {
            Some(node) => Insertion::Replaced(mem::replace(&mut node.value, value)),
            None => {
                *link = Some(Node::new(hash, key, value));
                Insertion::Appended { collided }
            }
        }
    }

    /// Appends `node` at the tail without looking for duplicates.
    pub(crate) fn push_back(&mut self, mut node: Box<Node<K, V>>) {
        node.next = None;

        let mut link = &mut self.head;
        while let Some(existing) = link {
            link = &mut existing.next;
        }
        *link = Some(node);
    }

    /// Detaches and returns the head node.
    pub(crate) fn pop_front(&mut self) -> Option<Box<Node<K, V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    /// Unlinks the entry matching `hash` and `eq`, splicing its successor
    /// into the link that pointed at it.
    pub(crate) fn remove(
        &mut self,
        hash: u64,
        eq: impl Fn(&K) -> bool,
    ) -> Lookup<Box<Node<K, V>>> {
        let (link, collided) = self.seek(hash, eq);
        let found = match link.take() {
            Some(mut node) => {
                *link = node.next.take();
                Some(node)
            }
            None => None,
        };

        Lookup { found, collided }
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Chain<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        let nodes: Vec<&Node<K, V>> = self.iter().collect();

        let mut head = None;
        for node in nodes.into_iter().rev() {
            head = Some(Box::new(Node {
                hash: node.hash,
                key: node.key.clone(),
                value: node.value.clone(),
                next: head,
            }));
        }

        Self { head }
    }
}

impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop would use stack
        // proportional to the chain length.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

pub(crate) struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<K, V> Default for Iter<'_, K, V> {
    fn default() -> Self {
        Self { next: None }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node
        })
    }
}

pub(crate) struct IterMut<'a, K, V> {
    next: Option<&'a mut Node<K, V>>,
}

impl<K, V> Default for IterMut<'_, K, V> {
    fn default() -> Self {
        Self { next: None }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let Node {
            key, value, next, ..
        } = self.next.take()?;
        self.next = next.as_deref_mut();

        let key: &'a K = key;
        Some((key, value))
    }
}
