//! Huffman tree construction.
//!
//! The tree is built with the classic greedy merge: every distinct byte
//! becomes a leaf in a min-priority queue keyed by frequency, and the two
//! lightest nodes are merged until a single root remains.
//!
//! # Tie-breaking
//!
//! Queue entries are ordered by `(frequency, sequence)`. Leaves receive
//! sequence numbers in ascending byte order; each merged node receives the
//! next number when it is created. The first node popped becomes the left
//! child. The resulting tree (and therefore the compressed byte layout) is
//! fully determined by the frequency table.

use crate::frequency::ByteFrequencies;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A byte value and its frequency.
    Leaf {
        /// The encoded byte.
        byte: u8,
        /// Occurrence count (zero for trees read back from a stream).
        frequency: u64,
    },
    /// An inner node owning exactly two subtrees.
    Internal {
        /// Sum of the children's frequencies.
        frequency: u64,
        /// Subtree reached with a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached with a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Frequency stored in this node.
    pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Merge two nodes under a new internal node.
    pub fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Compare shape and leaf bytes, ignoring frequencies.
    pub fn same_structure(&self, other: &HuffmanNode) -> bool {
        match (self, other) {
            (Self::Leaf { byte: a, .. }, Self::Leaf { byte: b, .. }) => a == b,
            (
                Self::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Self::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1.same_structure(l2) && r1.same_structure(r2),
            _ => false,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Priority queue entry; the heap pops the smallest `(frequency, sequence)`.
#[derive(Debug)]
struct Pending {
    frequency: u64,
    sequence: u32,
    node: HuffmanNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.frequency, self.sequence).cmp(&(other.frequency, other.sequence))
    }
}

/// A complete Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for a frequency table.
    ///
    /// Returns `None` for an empty table: there is nothing to code.
    pub fn build(frequencies: &ByteFrequencies) -> Option<Self> {
        let mut heap: BinaryHeap<Reverse<Pending>> = frequencies
            .iter()
            .enumerate()
            .map(|(sequence, (byte, frequency))| {
                Reverse(Pending {
                    frequency,
                    sequence: sequence as u32,
                    node: HuffmanNode::Leaf { byte, frequency },
                })
            })
            .collect();

        let mut next_sequence = heap.len() as u32;

        while heap.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = HuffmanNode::merge(left.node, right.node);
            heap.push(Reverse(Pending {
                frequency: node.frequency(),
                sequence: next_sequence,
                node,
            }));
            next_sequence += 1;
        }

        let root = heap.pop()?.0.node;
        log::trace!(
            "built Huffman tree: {} leaves, depth {}",
            root.leaf_count(),
            root.depth()
        );
        Some(Self { root })
    }

    /// Wrap an existing root node.
    ///
    /// The tree must be at most [`crate::code::MAX_CODE_LENGTH`] levels deep
    /// for codes to be assigned to it.
    pub fn from_root(root: HuffmanNode) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves (distinct bytes).
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path (0 for a leaf root).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Compare shape and leaf bytes, ignoring frequencies.
    pub fn same_structure(&self, other: &HuffmanTree) -> bool {
        self.root.same_structure(&other.root)
    }
}
