use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use serde::{Deserialize, Serialize};

use crate::HuffmanError;

/// Occurrence count for every distinct byte of the input. A `BTreeMap` so
/// that iterating the symbols is deterministic, which the tie-break rule of
/// the tree construction relies on.
pub type FrequencyTable = BTreeMap<u8, u64>;

pub fn count_frequencies(data: &[u8]) -> FrequencyTable {
    let mut freq_table = FrequencyTable::new();
    for &byte in data.iter() {
        *freq_table.entry(byte).or_insert(0) += 1;
    }
    freq_table
}

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf { weight: u64, byte: u8 },
    Internal { weight: u64, left: NodeId, right: NodeId },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// An MSB-first (value, length) pair: the lowest `len` bits of `bits` are
/// the code, most significant bit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

/// Prefix-free code for every distinct byte of the input.
pub type CodeTable = BTreeMap<u8, Code>;

/// The prefix tree the codes are read off of. Nodes live in an arena and
/// point at each other through indices, so the structure is trivially
/// acyclic and nothing is shared between subtrees.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn from_bytes(data: &[u8]) -> Result<Self, HuffmanError> {
        Self::from_frequencies(&count_frequencies(data))
    }

    /// Standard greedy construction: keep merging the two lightest nodes
    /// until one root remains. Ties on weight are broken by ascending
    /// `NodeId`; leaves are allocated in ascending byte order and merged
    /// nodes in creation order, so equal-weight extraction is a fixed
    /// function of the frequency table and rebuilding yields an identical
    /// tree every time.
    pub fn from_frequencies(freq_table: &FrequencyTable) -> Result<Self, HuffmanError> {
        if freq_table.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut nodes: Vec<HuffNode> = Vec::with_capacity(2 * freq_table.len() - 1);
        let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();

        for (&byte, &weight) in freq_table.iter() {
            let id = nodes.len();
            nodes.push(HuffNode::Leaf { weight, byte });
            heap.push(Reverse((weight, id)));
        }

        while heap.len() > 1 {
            let Reverse((w1, left)) = heap.pop().unwrap();
            let Reverse((w2, right)) = heap.pop().unwrap();

            let id = nodes.len();
            nodes.push(HuffNode::Internal { weight: w1 + w2, left, right });
            heap.push(Reverse((w1 + w2, id)));
        }

        let Reverse((_, root)) = heap.pop().unwrap();

        Ok(HuffmanTree { nodes, root })
    }

    /// Walks the tree with an explicit work list, appending '0' when
    /// descending left and '1' when descending right, and records the
    /// accumulated path at each leaf. A lone-leaf tree gets the 1-bit code
    /// "0", since an empty code could never be read back.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut stack: Vec<(NodeId, u64, u8)> = vec![(self.root, 0, 0)];

        while let Some((id, bits, len)) = stack.pop() {
            match self.nodes[id] {
                HuffNode::Leaf { byte, .. } => {
                    table.insert(byte, Code { bits, len: len.max(1) });
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right, (bits << 1) | 1, len + 1));
                    stack.push((left, bits << 1, len + 1));
                }
            }
        }

        table
    }

    pub fn root(&self) -> &HuffNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, HuffNode::Leaf { .. }))
            .count()
    }
}
