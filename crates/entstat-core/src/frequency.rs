//! Per-symbol occurrence counts and the order-0 statistics derived from them.

/// Occurrence counts for every symbol of an alphabet.
///
/// `total()` always equals the sum of all per-symbol counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u64>,
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table for symbols in `[0, alphabet_size)`.
    pub fn new(alphabet_size: usize) -> Self {
        assert!(alphabet_size >= 2, "alphabet needs at least two symbols");
        Self {
            counts: vec![0; alphabet_size],
            total: 0,
        }
    }

    /// Count one occurrence of `symbol`.
    ///
    /// Panics if `symbol` is outside the alphabet.
    #[inline]
    pub fn record(&mut self, symbol: u8) {
        let alphabet = self.counts.len();
        let slot = self
            .counts
            .get_mut(symbol as usize)
            .unwrap_or_else(|| panic!("symbol {symbol} outside alphabet of size {alphabet}"));
        *slot += 1;
        self.total += 1;
    }

    pub fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Shannon entropy in bits per symbol. Zero for an empty table.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let n = self.total as f64;
        let mut h = 0.0;
        for &c in &self.counts {
            if c > 0 {
                let p = c as f64 / n;
                h -= p * p.log2();
            }
        }
        h
    }

    /// Pearson chi-square statistic against a uniform distribution.
    ///
    /// Zero for an empty table.
    pub fn chi_square(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let expected = self.total as f64 / self.counts.len() as f64;
        self.counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Degrees of freedom of [`chi_square`](Self::chi_square).
    pub fn degrees_of_freedom(&self) -> u32 {
        (self.counts.len() - 1) as u32
    }

    /// Arithmetic mean of the symbol values. Zero for an empty table.
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let weighted: u128 = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, &c)| value as u128 * c as u128)
            .sum();
        weighted as f64 / self.total as f64
    }
}
