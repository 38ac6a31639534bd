use std::rc::Rc;

use super::chunk::Chunk;

///
/// A node in a rope
///
/// Internal nodes always have a left child. The right child goes missing once a
/// split has detached everything after the cut point.
///
/// Trees grow deeper with every edit, so nothing below walks them recursively.
///
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Leaf(Chunk),
    Internal {
        left: Rc<Node>,
        right: Option<Rc<Node>>,
        /// Length of the left subtree
        weight: usize,
    },
}

/// What `split` did at one internal node on its way down
enum Step {
    /// The cut fell in the right subtree, so the left one stays whole.
    Right { left: Rc<Node>, weight: usize },

    /// The cut fell in the left subtree. `right` goes to the tail.
    Left {
        weight: usize,
        right: Option<Rc<Node>>,
    },
}

impl Node {
    pub(crate) fn new_leaf(chunk: Chunk) -> Rc<Self> {
        Rc::new(Node::Leaf(chunk))
    }

    pub(crate) fn empty() -> Rc<Self> {
        Node::new_leaf(Chunk::empty())
    }

    pub(crate) fn new_internal(left: Rc<Self>, right: Rc<Self>) -> Rc<Self> {
        Rc::new(Node::Internal {
            weight: left.len(),
            left,
            right: Some(right),
        })
    }

    /// Halves `chunk` until every piece fits in `chunk_size` bytes.
    pub(crate) fn build(chunk: Chunk, chunk_size: usize) -> Rc<Self> {
        if chunk.len() <= chunk_size {
            return Node::new_leaf(chunk);
        }

        let mid = chunk.len() / 2;
        let (left, right) = chunk.split_at(mid);
        Rc::new(Node::Internal {
            left: Node::build(left, chunk_size),
            right: Some(Node::build(right, chunk_size)),
            weight: mid,
        })
    }

    pub(crate) fn len(&self) -> usize {
        let mut node = self;
        let mut len = 0;

        loop {
            match node {
                Node::Leaf(chunk) => return len + chunk.len(),
                Node::Internal {
                    weight,
                    right: Some(right),
                    ..
                } => {
                    len += weight;
                    node = &**right;
                }
                Node::Internal { weight, right: None, .. } => return len + weight,
            }
        }
    }

    pub(crate) fn at(&self, pos: usize) -> Option<u8> {
        let mut node = self;
        let mut pos = pos;

        loop {
            match node {
                Node::Internal {
                    weight,
                    right: Some(right),
                    ..
                } if pos >= *weight => {
                    pos -= weight;
                    node = &**right;
                }
                Node::Internal { left, .. } => node = &**left,
                Node::Leaf(chunk) => return chunk.as_bytes().get(pos).copied(),
            }
        }
    }

    ///
    /// Cuts the tree under `node` at `pos`, returning `[0, pos)` and `[pos, end)`.
    ///
    /// Nodes this tree owns outright are taken apart and reused. A node that is
    /// shared with another rope is copied first, so the other rope never sees the cut.
    ///
    pub(crate) fn split(node: Rc<Node>, pos: usize) -> (Rc<Node>, Rc<Node>) {
        let mut steps = Vec::new();
        let mut node = node;
        let mut pos = pos;

        let (mut head, mut tail) = loop {
            match Rc::try_unwrap(node).unwrap_or_else(|shared| Node::clone(&shared)) {
                Node::Internal {
                    left,
                    right: Some(right),
                    weight,
                } if pos >= weight => {
                    steps.push(Step::Right { left, weight });
                    pos -= weight;
                    node = right;
                }

                Node::Internal { left, right, weight } => {
                    steps.push(Step::Left {
                        weight: pos.min(weight),
                        right,
                    });
                    node = left;
                }

                Node::Leaf(chunk) => {
                    let (head, tail) = chunk.split_at(pos.min(chunk.len()));
                    let head = Rc::new(Node::Internal {
                        weight: head.len(),
                        left: Node::new_leaf(head),
                        right: None,
                    });

                    break (head, Node::new_leaf(tail));
                }
            }
        };

        let mut tail_len = tail.len();
        while let Some(step) = steps.pop() {
            match step {
                Step::Right { left, weight } => {
                    head = Rc::new(Node::Internal {
                        left,
                        right: Some(head),
                        weight,
                    });
                }

                Step::Left { weight, right } => {
                    head = Rc::new(Node::Internal {
                        left: head,
                        right: None,
                        weight,
                    });

                    if let Some(right) = right {
                        let right_len = right.len();
                        tail = Rc::new(Node::Internal {
                            left: tail,
                            right: Some(right),
                            weight: tail_len,
                        });
                        tail_len += right_len;
                    }
                }
            }
        }

        (head, tail)
    }

    /// Length of this subtree, or `None` if some weight disagrees with its left subtree.
    pub(crate) fn checked_len(&self) -> Option<usize> {
        enum Visit<'a> {
            Enter(&'a Node),
            Leave { weight: usize, has_right: bool },
        }

        let mut visits = vec![Visit::Enter(self)];
        let mut lens = Vec::new();

        while let Some(visit) = visits.pop() {
            match visit {
                Visit::Enter(Node::Leaf(chunk)) => lens.push(chunk.len()),
                Visit::Enter(Node::Internal { left, right, weight }) => {
                    visits.push(Visit::Leave {
                        weight: *weight,
                        has_right: right.is_some(),
                    });
                    if let Some(right) = right {
                        visits.push(Visit::Enter(&**right));
                    }
                    visits.push(Visit::Enter(&**left));
                }
                Visit::Leave { weight, has_right } => {
                    let right_len = if has_right { lens.pop()? } else { 0 };
                    let left_len = lens.pop()?;
                    if left_len != weight {
                        return None;
                    }

                    lens.push(left_len + right_len);
                }
            }
        }

        lens.pop()
    }

    /// Frees a tree one node at a time, stopping wherever another rope still holds on.
    pub(crate) fn dismantle(self) {
        let mut pending = Vec::new();

        if let Node::Internal { left, right, .. } = self {
            pending.push(left);
            pending.extend(right);
        }

        while let Some(node) = pending.pop() {
            if let Ok(Node::Internal { left, right, .. }) = Rc::try_unwrap(node) {
                pending.push(left);
                pending.extend(right);
            }
        }
    }
}
