//! Running sums for the lag-1 serial correlation coefficient.
//!
//! The coefficient is computed over the cyclic extension of the stream: after
//! the last real pair, one wrap-around pair `(last, first)` is added so that
//! `n` symbols contribute exactly `n` pairs.

/// Accumulates the sums needed for serial correlation, one symbol at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStatsAccumulator {
    first: Option<u8>,
    previous: Option<u8>,
    count: u64,
    /// Set once two adjacent symbols differ, i.e. the stream is not constant.
    varied: bool,
    sum: u128,
    sum_squares: u128,
    sum_products: u128,
}

impl PairStatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next symbol of the stream.
    #[inline]
    pub fn observe(&mut self, symbol: u8) {
        let v = symbol as u128;
        match self.previous {
            None => self.first = Some(symbol),
            Some(prev) => {
                self.sum_products += prev as u128 * v;
                self.varied |= prev != symbol;
            }
        }
        self.previous = Some(symbol);
        self.count += 1;
        self.sum += v;
        self.sum_squares += v * v;
    }

    /// Number of symbols observed so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Serial correlation coefficient including the wrap-around pair.
    ///
    /// `None` when the stream is empty or every symbol is identical, since the
    /// coefficient has a zero denominator there. Does not mutate the running
    /// sums, so it may be evaluated at any point of the stream.
    pub fn coefficient(&self) -> Option<f64> {
        let (first, last) = (self.first?, self.previous?);
        if !self.varied {
            return None;
        }
        let sum_products = self.sum_products + last as u128 * first as u128;
        let (numerator, denominator) = self
            .exact_terms(sum_products)
            .unwrap_or_else(|| self.float_terms(sum_products));
        Some(numerator / denominator)
    }

    /// Numerator and denominator in integer arithmetic, `None` on overflow.
    fn exact_terms(&self, sum_products: u128) -> Option<(f64, f64)> {
        let n = self.count as u128;
        let sum_sq = self.sum.checked_mul(self.sum)?;
        let denominator = n.checked_mul(self.sum_squares)?.checked_sub(sum_sq)?;
        let numerator = i128::try_from(n.checked_mul(sum_products)?)
            .ok()?
            .checked_sub(i128::try_from(sum_sq).ok()?)?;
        Some((numerator as f64, denominator as f64))
    }

    fn float_terms(&self, sum_products: u128) -> (f64, f64) {
        let n = self.count as f64;
        let sum_sq = (self.sum as f64) * (self.sum as f64);
        (
            n * sum_products as f64 - sum_sq,
            n * self.sum_squares as f64 - sum_sq,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scc(symbols: &[u8]) -> Option<f64> {
        let mut acc = PairStatsAccumulator::new();
        for &s in symbols {
            acc.observe(s);
        }
        acc.coefficient()
    }

    /// Direct two-pass evaluation over the cyclic sequence.
    fn reference_scc(symbols: &[u8]) -> f64 {
        let n = symbols.len();
        let x: Vec<f64> = symbols.iter().map(|&s| s as f64).collect();
        let mut t1 = 0.0;
        for i in 0..n {
            t1 += x[i] * x[(i + 1) % n];
        }
        let t2: f64 = x.iter().sum();
        let t3: f64 = x.iter().map(|v| v * v).sum();
        let nf = n as f64;
        (nf * t1 - t2 * t2) / (nf * t3 - t2 * t2)
    }

    #[test]
    fn empty_is_undefined() {
        assert_eq!(scc(&[]), None);
    }

    #[test]
    fn constant_is_undefined() {
        assert_eq!(scc(&[7; 100]), None);
        assert_eq!(scc(&[42]), None);
    }

    #[test]
    fn alternating_is_perfectly_anticorrelated() {
        let data: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { 200 } else { 50 }).collect();
        let r = scc(&data).unwrap();
        assert!((r + 1.0).abs() < 1e-12, "r = {r}");
    }

    #[test]
    fn matches_two_pass_reference() {
        let data: Vec<u8> = (0u32..997).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
        let r = scc(&data).unwrap();
        assert!((r - reference_scc(&data)).abs() < 1e-12);
    }

    #[test]
    fn wrap_around_pair_is_included() {
        // Pairs: (0,1), (1,2), and the wrap-around (2,0).
        // n=3, t1=0+2+0=2, t2=3, t3=5 -> (6-9)/(15-9) = -0.5
        assert_eq!(scc(&[0, 1, 2]), Some(-0.5));
    }

    /// Accumulator state for `n - 1` copies of `v` followed by `last`.
    fn long_stream(n: u64, v: u8, last: u8) -> PairStatsAccumulator {
        let (vn, v2, l) = (v as u128, (v as u128).pow(2), last as u128);
        let m = n as u128 - 1;
        PairStatsAccumulator {
            first: Some(v),
            previous: Some(last),
            count: n,
            varied: v != last,
            sum: vn * m + l,
            sum_squares: v2 * m + l * l,
            sum_products: v2 * (m - 1) + vn * l,
        }
    }

    #[test]
    fn very_long_constant_stream_is_undefined() {
        // count * v^2 is far beyond 2^53 here.
        let acc = long_stream(300_000_000_001, 201, 201);
        assert_eq!(acc.coefficient(), None);
    }

    #[test]
    fn very_long_stream_with_one_outlier_is_near_zero() {
        let n = 300_000_000_001u64;
        let r = long_stream(n, 201, 200).coefficient().unwrap();
        // Cyclic autocovariance of a single outlier is about -1/n.
        assert!(r.is_finite());
        assert!(r < 0.0 && r.abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn integer_overflow_falls_back_to_floats() {
        // 2^62 symbols alternating 255, 0: sum^2 no longer fits in u128.
        let n = 1u64 << 62;
        let half = (n / 2) as u128;
        let acc = PairStatsAccumulator {
            first: Some(255),
            previous: Some(0),
            count: n,
            varied: true,
            sum: 255 * half,
            sum_squares: 255 * 255 * half,
            sum_products: 0,
        };
        assert!(acc.exact_terms(acc.sum_products).is_none());
        let r = acc.coefficient().unwrap();
        assert!((r + 1.0).abs() < 1e-9, "r = {r}");
    }

    #[test]
    fn coefficient_is_repeatable() {
        let mut acc = PairStatsAccumulator::new();
        for s in [3, 1, 4, 1, 5, 9, 2, 6] {
            acc.observe(s);
        }
        assert_eq!(acc.coefficient(), acc.coefficient());
        assert_eq!(acc.count(), 8);
    }
}
