//! Encode/decode orchestration over the tree and bit-stream primitives.

use std::io::{BufWriter, Read, Write};

use log::{debug, info};

use crate::bitio::{BitReader, BitWriter};
use crate::error::Error;
use crate::freq::{FreqTable, SENTINEL, Symbol};
use crate::tree::HuffmanTree;

/// Compresses `input` into `output`.
///
/// The input is buffered and walked twice: once to count frequencies, once
/// to emit codes. The header is the pre-order tree dump; the body is each
/// byte's code followed by one sentinel code, zero-padded to a whole byte.
pub fn encode(input: &mut impl Read, output: impl Write) -> Result<(), Error> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;

    let freq = FreqTable::from_bytes(&raw);
    debug!("input entropy: {:.4} bits/symbol", freq.entropy());
    let tree = HuffmanTree::from_frequencies(&freq)?;
    let table = tree.code_table();
    debug!("code table holds {} entries", table.len());

    let mut writer = BitWriter::new(output);
    tree.write_to(&mut writer)?;

    for &byte in &raw {
        let code = table
            .get(&Symbol::from(byte))
            .ok_or(Error::UnassignedSymbol(Symbol::from(byte)))?;
        for &bit in code {
            writer.write_bit(bit)?;
        }
    }

    // Logical end-of-data, independent of the container's byte padding.
    let eof_code = table.get(&SENTINEL).ok_or(Error::UnassignedSymbol(SENTINEL))?;
    for &bit in eof_code {
        writer.write_bit(bit)?;
    }

    writer.finish()?;
    info!("encoded {} input bytes", raw.len());
    Ok(())
}

/// Expands `input` (a stream produced by [`encode`]) into `output`.
///
/// The tree is rebuilt from the header, then the body bits are walked
/// root-to-leaf until the sentinel terminates decoding. A stream that runs
/// out of bits first is reported as truncated.
pub fn decode(input: impl Read, output: &mut impl Write) -> Result<(), Error> {
    let mut reader = BitReader::new(input);
    let tree = HuffmanTree::read_from(&mut reader)?;
    debug!("tree header reconstructed");

    let mut buffered = BufWriter::new(output);
    tree.decode_stream(&mut reader, &mut buffered)?;
    buffered.flush()?;
    info!("decode reached the end-of-data marker");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let mut compressed = Vec::new();
        encode(&mut Cursor::new(data), &mut compressed).unwrap();
        let mut restored = Vec::new();
        decode(Cursor::new(compressed), &mut restored).unwrap();
        restored
    }

    #[test]
    fn scenario_round_trip() {
        assert_eq!(round_trip(b"aaaabbbccd"), b"aaaabbbccd");
    }

    #[test]
    fn text_round_trip() {
        let data = b"it was the best of times, it was the worst of times".repeat(20);
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn binary_round_trip() {
        // Every byte value, skewed so weights differ.
        let mut data = Vec::new();
        for byte in 0u8..=255 {
            data.extend(std::iter::repeat_n(byte, 1 + (byte as usize % 7)));
        }
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn two_symbol_round_trip() {
        // Smallest accepted alphabet: two distinct bytes plus the sentinel.
        assert_eq!(round_trip(b"ababab"), b"ababab");
    }

    #[test]
    fn compression_shrinks_skewed_input() {
        let data = vec![b'a'; 4000]
            .into_iter()
            .chain(vec![b'b'; 100])
            .chain(vec![b'c'; 4])
            .collect::<Vec<u8>>();
        let mut compressed = Vec::new();
        encode(&mut Cursor::new(&data[..]), &mut compressed).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut compressed = Vec::new();
        let result = encode(&mut Cursor::new(b"" as &[u8]), &mut compressed);
        assert!(matches!(result, Err(Error::DegenerateAlphabet)));
    }

    #[test]
    fn single_symbol_input_is_rejected() {
        let mut compressed = Vec::new();
        let result = encode(&mut Cursor::new(b"xxxxxxxx" as &[u8]), &mut compressed);
        assert!(matches!(result, Err(Error::DegenerateAlphabet)));
    }

    #[test]
    fn truncated_body_is_detected() {
        let mut compressed = Vec::new();
        encode(&mut Cursor::new(b"aaaabbbccd" as &[u8]), &mut compressed).unwrap();

        let cut = &compressed[..compressed.len() - 1];
        let mut restored = Vec::new();
        let result = decode(Cursor::new(cut.to_vec()), &mut restored);
        assert!(matches!(result, Err(Error::TruncatedStream)));
    }

    #[test]
    fn leaf_only_stream_fails_instead_of_looping() {
        // Two bytes encoding a single-leaf header: flag 1, nine data bits
        // for b'a'. The decoder must reject this rather than emit 'a'
        // without end.
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bits(u16::from(b'a'), 9).unwrap();
        let stream = writer.finish().unwrap();
        assert_eq!(stream.len(), 2);

        let mut restored = Vec::new();
        let result = decode(Cursor::new(stream), &mut restored);
        assert!(matches!(result, Err(Error::DegenerateAlphabet)));
        assert!(restored.is_empty());
    }

    #[test]
    fn empty_stream_fails_to_decode() {
        let mut restored = Vec::new();
        let result = decode(Cursor::new(Vec::new()), &mut restored);
        assert!(matches!(result, Err(Error::TruncatedStream)));
    }
}
