use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::huffman::Node;

struct HeapNode {
    freq: u64,
    seq: u64,
    node: Box<Node>,
}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapNode {}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse frequency for min-heap behavior; among equal frequencies
        // the most recently inserted entry pops first.
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Worklist of subtrees ordered ascending by frequency.
///
/// An entry inserted into a run of equal frequencies lands in front of
/// that run, so ties come out last-in first-out. This fixes which nodes
/// merge first and with it the exact shape of the tree.
#[derive(Default)]
pub struct PrioritySequence {
    heap: BinaryHeap<HeapNode>,
    next_seq: u64,
}

impl PrioritySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: Box<Node>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapNode {
            freq: node.freq(),
            seq,
            node,
        });
    }

    pub fn remove_front(&mut self) -> Option<Box<Node>> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
