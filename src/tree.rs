//! Huffman tree construction, code derivation, and the on-disk tree codec.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::io::{Read, Write};

use log::{debug, trace};

use crate::bitio::{BitReader, BitWriter};
use crate::error::Error;
use crate::freq::{FreqTable, SENTINEL, Symbol};

/// Width of a serialized node's data field. The largest symbol is 256, so
/// nine bits are needed.
const SYMBOL_WIDTH: u32 = 9;

/// Deepest node any valid tree can hold: 257 leaves bound the root-to-leaf
/// path at 256 edges. Headers nesting past this are corrupt.
const MAX_NODE_DEPTH: usize = 257;

/// Map from symbol to its root-first code bits (false = left, true = right).
pub type CodeTable = HashMap<Symbol, Vec<bool>>;

/// A node of the coding tree. Only leaves carry a symbol; an internal node's
/// weight is the sum of its children's.
#[derive(Debug)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap wrapper giving `BinaryHeap` min-heap behavior plus a pinned
/// tie-break: equal weights resolve to the earlier sequence number. Leaves
/// are numbered in ascending symbol order and merged nodes take the next
/// number, so construction is bit-exact across runs.
struct HeapEntry {
    weight: u64,
    seq: u32,
    node: Box<Node>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior in BinaryHeap (which is
        // max-heap by default).
        other
            .weight
            .cmp(&self.weight)
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The coding tree for one compression or expansion run.
#[derive(Debug)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Builds the minimum-weighted-path-length tree over every counted
    /// symbol. Fails with [`Error::DegenerateAlphabet`] when fewer than
    /// three leaves are available: a smaller alphabet cannot produce
    /// well-formed variable-length prefix codes.
    pub fn from_frequencies(freq: &FreqTable) -> Result<Self, Error> {
        let mut heap = BinaryHeap::new();
        let mut seq = 0u32;
        for (symbol, weight) in freq.iter() {
            heap.push(HeapEntry {
                weight,
                seq,
                node: Box::new(Node::Leaf { symbol, weight }),
            });
            seq += 1;
        }

        if heap.len() < 3 {
            return Err(Error::DegenerateAlphabet);
        }
        debug!("building tree from {} weighted leaves", heap.len());

        loop {
            let lower = match heap.pop() {
                Some(entry) => entry,
                None => return Err(Error::DegenerateAlphabet),
            };
            let higher = match heap.pop() {
                Some(entry) => entry,
                None => return Ok(HuffmanTree { root: *lower.node }),
            };

            let weight = lower.weight + higher.weight;
            heap.push(HeapEntry {
                weight,
                seq,
                node: Box::new(Node::Internal {
                    weight,
                    left: lower.node,
                    right: higher.node,
                }),
            });
            seq += 1;
        }
    }

    /// Derives each leaf's code from its root-to-leaf path: 0 when
    /// descending left, 1 when descending right.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        Self::fill_codes(&self.root, Vec::new(), &mut table);
        table
    }

    fn fill_codes(node: &Node, prefix: Vec<bool>, table: &mut CodeTable) {
        match node {
            Node::Leaf { symbol, .. } => {
                trace!("symbol {:#05x} assigned a {}-bit code", symbol, prefix.len());
                table.insert(*symbol, prefix);
            }
            Node::Internal { left, right, .. } => {
                let mut left_prefix = prefix.clone();
                left_prefix.push(false);
                Self::fill_codes(left, left_prefix, table);
                let mut right_prefix = prefix;
                right_prefix.push(true);
                Self::fill_codes(right, right_prefix, table);
            }
        }
    }

    /// Writes the tree in pre-order, ten bits per node: a flag bit (1 for a
    /// leaf, 0 for an internal node) followed by nine data bits holding the
    /// leaf's symbol, or the sentinel as a fixed placeholder for internal
    /// nodes. The recursive layout needs no node count: both children of an
    /// internal node are consumed before control returns to its parent.
    pub fn write_to<W: Write>(&self, output: &mut BitWriter<W>) -> Result<(), Error> {
        Self::write_node(&self.root, output)
    }

    fn write_node<W: Write>(node: &Node, output: &mut BitWriter<W>) -> Result<(), Error> {
        match node {
            Node::Leaf { symbol, .. } => {
                output.write_bit(true)?;
                output.write_bits(*symbol, SYMBOL_WIDTH)?;
            }
            Node::Internal { left, right, .. } => {
                output.write_bit(false)?;
                output.write_bits(SENTINEL, SYMBOL_WIDTH)?;
                Self::write_node(left, output)?;
                Self::write_node(right, output)?;
            }
        }
        Ok(())
    }

    /// Rebuilds a tree from its pre-order serialization. Weights are not
    /// stored on the wire and come back as zero; decoding only follows the
    /// shape of the tree.
    ///
    /// A header whose root is a lone leaf is rejected: every tree this
    /// format writes has at least three leaves, and a leaf root would give
    /// the decode walk nothing to consume.
    pub fn read_from<R: Read>(input: &mut BitReader<R>) -> Result<Self, Error> {
        let root = Self::read_node(input, 0)?;
        if matches!(root, Node::Leaf { .. }) {
            return Err(Error::DegenerateAlphabet);
        }
        Ok(HuffmanTree { root })
    }

    fn read_node<R: Read>(input: &mut BitReader<R>, depth: usize) -> Result<Node, Error> {
        if depth > MAX_NODE_DEPTH {
            return Err(Error::ExcessiveDepth(MAX_NODE_DEPTH));
        }
        let is_leaf = input.next_bit()?.ok_or(Error::TruncatedStream)? == 1;
        let data = input.next_bits(SYMBOL_WIDTH)?;
        if is_leaf {
            if data > SENTINEL {
                return Err(Error::InvalidSymbol(data));
            }
            Ok(Node::Leaf {
                symbol: data,
                weight: 0,
            })
        } else {
            let left = Self::read_node(input, depth + 1)?;
            let right = Self::read_node(input, depth + 1)?;
            Ok(Node::Internal {
                weight: left.weight() + right.weight(),
                left: Box::new(left),
                right: Box::new(right),
            })
        }
    }

    /// Walks the body bits root-to-leaf, emitting each decoded byte until
    /// the sentinel leaf is reached. Exhausting the bit source first means
    /// the stream was truncated or corrupt.
    pub fn decode_stream<R: Read, W: Write>(
        &self,
        input: &mut BitReader<R>,
        output: &mut W,
    ) -> Result<(), Error> {
        loop {
            let mut node = &self.root;
            loop {
                match node {
                    Node::Leaf { symbol, .. } => {
                        if *symbol == SENTINEL {
                            return Ok(());
                        }
                        output.write_all(&[*symbol as u8])?;
                        break;
                    }
                    Node::Internal { left, right, .. } => {
                        let bit = input.next_bit()?.ok_or(Error::TruncatedStream)?;
                        node = if bit == 1 { right } else { left };
                    }
                }
            }
        }
    }
}
