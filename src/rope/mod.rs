mod chunk;
mod chunk_size;
mod error;
mod node;
mod walk;
#[cfg(test)]
mod tests;

use std::convert::Infallible;
use std::fmt;
use std::mem;
use std::rc::Rc;
use std::str::FromStr;

use tracing::{debug, trace};

use self::chunk::Chunk;
use self::node::Node;

pub use self::chunk_size::ChunkSize;
pub use self::error::{position, Result, RopeError};
pub use self::walk::{NodeKind, RopeStats, Walk};

///
/// A byte string stored as a weighted binary tree of shared chunks
///
/// Cloning a rope is a shallow copy: the new rope shares its nodes and bytes with
/// the original, and whichever one is edited first copies the nodes it changes.
///
pub struct Rope {
    root: Rc<Node>,
}

impl Rope {
    ///
    /// Builds a rope with an automatically chosen leaf size
    ///
    pub fn new(bytes: impl Into<Rc<[u8]>>) -> Self {
        Self::build(bytes, ChunkSize::Auto)
    }

    ///
    /// Builds a rope whose leaves hold at most `chunk_size` bytes
    ///
    pub fn with_chunk_size(bytes: impl Into<Rc<[u8]>>, chunk_size: usize) -> Self {
        Self::build(bytes, ChunkSize::Fixed(chunk_size))
    }

    pub fn build(bytes: impl Into<Rc<[u8]>>, chunk_size: ChunkSize) -> Self {
        let bytes = bytes.into();
        let leaf_size = chunk_size.resolve(bytes.len());
        debug!(len = bytes.len(), leaf_size, "building rope");

        Self {
            root: Node::build(Chunk::new(bytes), leaf_size),
        }
    }

    fn from_root(root: Rc<Node>) -> Self {
        Self { root }
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Returns the byte at `pos`
    ///
    pub fn at(&self, pos: usize) -> Result<u8> {
        let out_of_bounds = || RopeError::IndexOutOfBounds {
            index: pos,
            len: self.len(),
        };

        if pos >= self.len() {
            return Err(out_of_bounds());
        }

        self.root.at(pos).ok_or_else(out_of_bounds)
    }

    ///
    /// Flattens the rope into a contiguous buffer
    ///
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.len());
        for leaf in self.leaves() {
            result.extend_from_slice(leaf);
        }

        result
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    ///
    /// A new root shell sharing its children and bytes with this rope
    ///
    pub fn shallow_copy(&self) -> Self {
        Self::from_root(Rc::new(Node::clone(&self.root)))
    }

    ///
    /// A copy that shares no storage with this rope, rebuilt with automatic leaf sizing
    ///
    pub fn deep_clone(&self) -> Self {
        self.clone_with(ChunkSize::Auto)
    }

    ///
    /// Materializes this rope and rebuilds it with a new leaf size
    ///
    pub fn clone_with(&self, chunk_size: ChunkSize) -> Self {
        debug!(len = self.len(), %chunk_size, "rebuilding rope");
        Self::build(self.to_bytes(), chunk_size)
    }

    ///
    /// Joins this rope with `other` without modifying either
    ///
    pub fn concat(&self, other: &Rope) -> Rope {
        self.concat_all([other])
    }

    ///
    /// Joins this rope with each rope in `others`, in order. With no operands the
    /// result is another handle on this rope's root.
    ///
    pub fn concat_all<'a, I>(&self, others: I) -> Rope
    where
        I: IntoIterator<Item = &'a Rope>,
    {
        let first = Self::from_root(Rc::clone(&self.root));

        others.into_iter().fold(first, |rope, other| {
            Self::from_root(Node::new_internal(
                Rc::new(Node::clone(&rope.root)),
                Rc::new(Node::clone(&other.root)),
            ))
        })
    }

    ///
    /// Cuts the rope at `pos`. This rope keeps `[0, pos)` and the returned rope holds the rest.
    ///
    pub fn split(&mut self, pos: usize) -> Result<Rope> {
        let len = self.len();
        if pos > len {
            return Err(RopeError::InvalidPosition { pos, len });
        }

        trace!(pos, len, "split");
        let root = mem::replace(&mut self.root, Node::empty());
        let (head, tail) = Node::split(root, pos);
        self.root = head;

        Ok(Self::from_root(tail))
    }

    ///
    /// Inserts `bytes` so that they start at `pos`
    ///
    pub fn insert(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        let len = self.len();
        if pos > len {
            return Err(RopeError::InvalidPosition { pos, len });
        }

        trace!(pos, inserted = bytes.len(), "insert");
        let piece = Self::from_root(Node::new_leaf(Chunk::new(Rc::from(bytes))));

        *self = if pos == 0 {
            piece.concat(self)
        } else {
            let tail = self.split(pos)?;
            self.concat_all([&piece, &tail])
        };

        Ok(())
    }

    ///
    /// Removes up to `n` bytes starting at `pos`. A span running past the end stops at the end.
    ///
    pub fn delete(&mut self, pos: usize, n: usize) -> Result<()> {
        let mut doomed = self.split(pos)?;
        let n = n.min(doomed.len());
        trace!(pos, n, "delete");

        let rest = doomed.split(n)?;
        *self = self.concat(&rest);

        Ok(())
    }

    ///
    /// Pre-order traversal of the tree, yielding each node with its depth
    ///
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.root)
    }

    ///
    /// The leaf chunks of this rope, in text order
    ///
    pub fn leaves(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.walk().filter_map(|(_, kind)| match kind {
            NodeKind::Leaf(bytes) => Some(bytes),
            NodeKind::Internal { .. } => None,
        })
    }

    pub fn stats(&self) -> RopeStats {
        RopeStats::collect(self.walk())
    }

    ///
    /// True if every internal node's weight matches the length of its left subtree
    ///
    pub fn is_consistent(&self) -> bool {
        self.root.checked_len().is_some()
    }

    fn eq_bytes(&self, other: &[u8]) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut rest = other;
        for leaf in self.leaves() {
            let (head, tail) = rest.split_at(leaf.len());
            if head != leaf {
                return false;
            }
            rest = tail;
        }

        true
    }
}

impl Clone for Rope {
    fn clone(&self) -> Self {
        self.shallow_copy()
    }
}

impl Drop for Rope {
    fn drop(&mut self) {
        if let Some(root) = Rc::get_mut(&mut self.root) {
            if matches!(root, Node::Internal { .. }) {
                mem::replace(root, Node::Leaf(Chunk::empty())).dismantle();
            }
        }
    }
}

impl Default for Rope {
    fn default() -> Self {
        Self::from_root(Node::empty())
    }
}

impl From<&[u8]> for Rope {
    fn from(bytes: &[u8]) -> Self {
        Rope::new(bytes)
    }
}

impl From<Vec<u8>> for Rope {
    fn from(bytes: Vec<u8>) -> Self {
        Rope::new(bytes)
    }
}

impl From<&str> for Rope {
    fn from(text: &str) -> Self {
        Rope::new(text.as_bytes())
    }
}

impl From<String> for Rope {
    fn from(text: String) -> Self {
        Rope::new(text.into_bytes())
    }
}

impl FromStr for Rope {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Rope::from(s))
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves: Vec<_> = self.leaves().map(String::from_utf8_lossy).collect();

        f.debug_struct("Rope")
            .field("len", &self.len())
            .field("leaves", &leaves)
            .finish()
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Rope) -> bool {
        self.eq_bytes(&other.to_bytes())
    }
}

impl Eq for Rope {}

impl PartialEq<[u8]> for Rope {
    fn eq(&self, other: &[u8]) -> bool {
        self.eq_bytes(other)
    }
}

impl PartialEq<&[u8]> for Rope {
    fn eq(&self, other: &&[u8]) -> bool {
        self.eq_bytes(other)
    }
}

impl PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        self.eq_bytes(other.as_bytes())
    }
}

impl PartialEq<&str> for Rope {
    fn eq(&self, other: &&str) -> bool {
        self.eq_bytes(other.as_bytes())
    }
}
