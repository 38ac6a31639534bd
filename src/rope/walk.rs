use super::node::Node;

///
/// What a visited node looks like from the outside
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// A leaf and the bytes it holds
    Leaf(&'a [u8]),

    /// An internal node. `weight` is the length of its left subtree.
    Internal { weight: usize, has_right: bool },
}

///
/// Pre-order iterator over the nodes of a rope, yielding `(depth, node)`
///
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, NodeKind<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;

        match node {
            Node::Leaf(chunk) => Some((depth, NodeKind::Leaf(chunk.as_bytes()))),
            Node::Internal { left, right, weight } => {
                if let Some(right) = right {
                    self.stack.push((depth + 1, &**right));
                }
                self.stack.push((depth + 1, &**left));

                let kind = NodeKind::Internal {
                    weight: *weight,
                    has_right: right.is_some(),
                };

                Some((depth, kind))
            }
        }
    }
}

///
/// Shape of a rope's tree
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RopeStats {
    /// Total bytes held by the leaves
    pub len: usize,

    pub nodes: usize,
    pub leaves: usize,

    /// Edges on the longest root-to-leaf path
    pub depth: usize,
}

impl RopeStats {
    pub(crate) fn collect(walk: Walk<'_>) -> Self {
        walk.fold(RopeStats::default(), |mut stats, (depth, kind)| {
            stats.nodes += 1;
            stats.depth = stats.depth.max(depth);

            if let NodeKind::Leaf(bytes) = kind {
                stats.leaves += 1;
                stats.len += bytes.len();
            }

            stats
        })
    }
}
