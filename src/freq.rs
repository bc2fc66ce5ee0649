//! Symbol alphabet and frequency accounting.

use log::debug;

/// A coding symbol: byte values 0-255 plus the pseudo-EOF marker.
pub type Symbol = u16;

/// Reserved 257th symbol marking logical end-of-data. It never appears in
/// the input and is always counted once, so the decoder has an unambiguous
/// stop marker independent of byte padding.
pub const SENTINEL: Symbol = 256;

/// Number of distinct symbols: 256 byte values plus the sentinel.
pub const ALPHABET_SIZE: usize = 257;

/// Occurrence counts per symbol, built by one pass over the input.
/// The sentinel always carries weight 1.
pub struct FreqTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FreqTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        counts[SENTINEL as usize] = 1;
        let table = FreqTable { counts };
        debug!(
            "counted {} unique symbols over {} input bytes",
            table.distinct_symbols(),
            data.len()
        );
        table
    }

    pub fn count(&self, symbol: Symbol) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a nonzero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as Symbol, count))
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Shannon entropy of the counted distribution in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total: u64 = self.counts.iter().sum();
        let total_f = total as f64;

        self.counts
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total_f;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_always_counted_once() {
        let table = FreqTable::from_bytes(b"");
        assert_eq!(table.count(SENTINEL), 1);
        assert_eq!(table.distinct_symbols(), 1);
    }

    #[test]
    fn counts_match_input() {
        let table = FreqTable::from_bytes(b"aaaabbbccd");
        assert_eq!(table.count(b'a' as Symbol), 4);
        assert_eq!(table.count(b'b' as Symbol), 3);
        assert_eq!(table.count(b'c' as Symbol), 2);
        assert_eq!(table.count(b'd' as Symbol), 1);
        assert_eq!(table.count(SENTINEL), 1);
        assert_eq!(table.count(b'z' as Symbol), 0);
        assert_eq!(table.distinct_symbols(), 5);
    }

    #[test]
    fn iteration_skips_uncounted_symbols() {
        let table = FreqTable::from_bytes(b"aa");
        let entries: Vec<(Symbol, u64)> = table.iter().collect();
        assert_eq!(entries, vec![(b'a' as Symbol, 2), (SENTINEL, 1)]);
    }

    #[test]
    fn iteration_is_in_ascending_symbol_order() {
        let table = FreqTable::from_bytes(b"cba");
        let symbols: Vec<Symbol> = table.iter().map(|(symbol, _)| symbol).collect();
        assert_eq!(
            symbols,
            vec![b'a' as Symbol, b'b' as Symbol, b'c' as Symbol, SENTINEL]
        );
    }

    #[test]
    fn uniform_distribution_entropy() {
        // Four symbols, equal weight: exactly 2 bits/symbol.
        let mut data = Vec::new();
        for byte in [b'a', b'b', b'c', b'd'] {
            data.extend(std::iter::repeat_n(byte, 64));
        }
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in &data {
            counts[byte as usize] += 1;
        }
        let table = FreqTable { counts };
        assert!((table.entropy() - 2.0).abs() < 1e-9);
    }
}
