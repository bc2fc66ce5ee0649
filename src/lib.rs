//! # huffpack
//!
//! Lossless byte-stream compression built on canonical Huffman coding over
//! a 257-symbol alphabet: the 256 byte values plus a pseudo-EOF sentinel
//! that marks logical end-of-data on the wire.
//!
//! The compressed stream is a pre-order bit dump of the coding tree (ten
//! bits per node) followed by the variable-length codes of every input byte
//! and one sentinel code. There is no length field or checksum; decoding
//! stops when the sentinel is reached.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let mut input = BufReader::new(File::open("notes.txt")?);
//! let output = File::create("notes.huff")?;
//! huffpack::encode(&mut input, output)?;
//!
//! let compressed = BufReader::new(File::open("notes.huff")?);
//! let mut restored = File::create("notes.txt.out")?;
//! huffpack::decode(compressed, &mut restored)?;
//! # Ok::<(), huffpack::Error>(())
//! ```

pub mod bitio;
pub mod codec;
pub mod error;
pub mod freq;
pub mod tree;

pub use codec::{decode, encode};
pub use error::Error;
pub use freq::{ALPHABET_SIZE, FreqTable, SENTINEL, Symbol};
pub use tree::{CodeTable, HuffmanTree};
