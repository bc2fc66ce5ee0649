use thiserror::Error;

use crate::freq::Symbol;

/// Failures surfaced by the compression core. Every variant aborts the
/// current encode or decode run; there is no partial output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Fewer than three weighted leaves were available before merging.
    /// A one- or two-leaf tree cannot carry well-formed variable-length
    /// prefix codes under this format.
    #[error("cannot build a prefix code over fewer than three symbols")]
    DegenerateAlphabet,

    /// A byte showed up during the emit pass with no code assigned,
    /// meaning the frequency table does not match the data.
    #[error("symbol {0:#05x} has no assigned code")]
    UnassignedSymbol(Symbol),

    /// The bit source ran dry before the end-of-data marker was decoded.
    #[error("compressed stream ended before the end-of-data marker")]
    TruncatedStream,

    /// Bit-field reads and writes support at most 16 bits per call.
    #[error("bit field width {0} exceeds the supported maximum of 16")]
    UnsupportedBitWidth(u32),

    /// A header leaf carried a 9-bit value outside the 257-symbol alphabet.
    #[error("tree node carries out-of-range symbol {0}")]
    InvalidSymbol(u16),

    /// A header nested deeper than any tree over 257 symbols can, so the
    /// stream is corrupt rather than merely large.
    #[error("tree header nests deeper than the {0}-level maximum")]
    ExcessiveDepth(usize),
}
