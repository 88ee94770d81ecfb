//! Monte Carlo estimate of π from consecutive byte groups.
//!
//! Every [`MC_GROUP_BYTES`] bytes form one sample: the first half is the
//! big-endian X coordinate, the second half the Y coordinate. Both are scaled
//! into the unit square and the sample counts as a hit when it falls inside
//! the quarter circle of radius 1. For uniform input, hits/samples tends to
//! π/4.

/// Bytes consumed per (x, y) sample.
pub const MC_GROUP_BYTES: usize = 6;

const COORD_BYTES: usize = MC_GROUP_BYTES / 2;
/// Largest coordinate value representable in `COORD_BYTES` bytes.
const COORD_MAX: f64 = ((1u64 << (8 * COORD_BYTES)) - 1) as f64;

/// Streaming in-circle tally over byte groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonteCarloEstimator {
    window: [u8; MC_GROUP_BYTES],
    filled: usize,
    samples: u64,
    inside: u64,
}

impl MonteCarloEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one byte to the current group, scoring it once full.
    #[inline]
    pub fn observe_byte(&mut self, byte: u8) {
        self.window[self.filled] = byte;
        self.filled += 1;
        if self.filled == MC_GROUP_BYTES {
            self.score_window();
            self.filled = 0;
        }
    }

    fn score_window(&mut self) {
        let (xs, ys) = self.window.split_at(COORD_BYTES);
        let x = coordinate(xs) / COORD_MAX;
        let y = coordinate(ys) / COORD_MAX;
        self.samples += 1;
        if x * x + y * y <= 1.0 {
            self.inside += 1;
        }
    }

    /// Completed samples so far. Trailing bytes of a partial group are ignored.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Samples that landed inside the circle.
    pub fn inside(&self) -> u64 {
        self.inside
    }

    /// `4 * inside / samples`, or `None` before the first complete group.
    pub fn estimate(&self) -> Option<f64> {
        (self.samples > 0).then(|| 4.0 * self.inside as f64 / self.samples as f64)
    }
}

fn coordinate(bytes: &[u8]) -> f64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64) as f64
}
