use std::borrow::Cow;
use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{CodecError, Result};
use crate::freq::FreqTable;
use crate::priority::PrioritySequence;

/// Node of the prefix-code tree.
///
/// An internal node's label is its left label followed by its right label,
/// and its frequency is the sum of both children.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Leaf {
        ch: char,
        freq: u64,
    },
    Internal {
        label: String,
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

pub type HuffmanTree = Node;

impl Node {
    pub fn merge(left: Box<Node>, right: Box<Node>) -> Node {
        let mut label = left.label().into_owned();
        label.push_str(&right.label());
        Node::Internal {
            label,
            freq: left.freq() + right.freq(),
            left,
            right,
        }
    }

    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    /// Every leaf character beneath this node, in left-to-right order.
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Node::Leaf { ch, .. } => Cow::Owned(ch.to_string()),
            Node::Internal { label, .. } => Cow::Borrowed(label),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn contains(&self, ch: char) -> bool {
        match self {
            Node::Leaf { ch: leaf, .. } => *leaf == ch,
            Node::Internal { label, .. } => label.chars().any(|c| c == ch),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Walks from this node down to the leaf holding `ch`, recording `0` for
    /// every left turn and `1` for every right turn.
    ///
    /// A tree whose root is the leaf itself yields the empty path. Exactly
    /// one child of each internal node on the way must hold `ch`.
    pub fn path_to(&self, ch: char) -> Result<String> {
        let mut path = String::new();
        let mut current = self;

        loop {
            match current {
                Node::Leaf { ch: leaf, .. } if *leaf == ch => return Ok(path),
                Node::Leaf { .. } => return Err(CodecError::BrokenTree { ch }),
                Node::Internal { left, right, .. } => {
                    match (left.contains(ch), right.contains(ch)) {
                        (true, false) => {
                            path.push('0');
                            current = left.as_ref();
                        }
                        (false, true) => {
                            path.push('1');
                            current = right.as_ref();
                        }
                        _ => return Err(CodecError::BrokenTree { ch }),
                    }
                }
            }
        }
    }
}

/// Collects every leaf's path in one walk, `0` for left and `1` for right.
///
/// Fails with `BrokenTree` if a character sits on more than one leaf.
pub fn build_code_table(
    node: &Node,
    prefix: String,
    table: &mut HashMap<char, String>,
) -> Result<()> {
    match node {
        Node::Leaf { ch, .. } => {
            if table.insert(*ch, prefix).is_some() {
                return Err(CodecError::BrokenTree { ch: *ch });
            }
            Ok(())
        }
        Node::Internal { left, right, .. } => {
            build_code_table(left, format!("{}0", prefix), table)?;
            build_code_table(right, prefix + "1", table)
        }
    }
}

/// Builds the prefix-code tree by repeatedly merging the two lowest
/// frequency subtrees. Returns `None` for an empty table.
pub fn build_huffman_tree(frequencies: &FreqTable) -> Option<Box<HuffmanTree>> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut queue = PrioritySequence::new();
    for (ch, freq) in frequencies.iter() {
        queue.insert(Box::new(Node::Leaf { ch, freq }));
    }
    debug!("Initial forest size: {}", queue.len());

    loop {
        let first = queue.remove_front()?;
        let Some(second) = queue.remove_front() else {
            debug!("Tree construction complete.");
            return Some(first);
        };

        let merged = Node::merge(first, second);
        trace!("Merged {:?} (freq {})", merged.label(), merged.freq());
        queue.insert(Box::new(merged));
    }
}
