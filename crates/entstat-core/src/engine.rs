//! Single-pass analysis engine and its final report.

use serde::Serialize;
use std::f64::consts::PI;

use crate::frequency::FrequencyTable;
use crate::gamma::tail_probability;
use crate::mode::SymbolMode;
use crate::monte_carlo::MonteCarloEstimator;
use crate::serial::PairStatsAccumulator;

/// Streaming randomness statistics over one input stream.
///
/// Feed successive chunks with [`ingest`](Self::ingest); chunk boundaries do
/// not affect the result. [`finalize`](Self::finalize) consumes the engine, so
/// no data can be ingested after the report is produced.
#[derive(Debug, Clone)]
pub struct StatsEngine {
    mode: SymbolMode,
    frequencies: FrequencyTable,
    pairs: PairStatsAccumulator,
    monte_carlo: MonteCarloEstimator,
    bytes: u64,
}

impl StatsEngine {
    pub fn new(mode: SymbolMode) -> Self {
        log::debug!(
            "stats engine created: mode={mode}, alphabet={}",
            mode.alphabet_size()
        );
        Self {
            mode,
            frequencies: FrequencyTable::new(mode.alphabet_size()),
            pairs: PairStatsAccumulator::new(),
            monte_carlo: MonteCarloEstimator::new(),
            bytes: 0,
        }
    }

    pub fn mode(&self) -> SymbolMode {
        self.mode
    }

    /// Raw input bytes ingested so far.
    pub fn bytes_ingested(&self) -> u64 {
        self.bytes
    }

    /// Symbols ingested so far (bytes, or 8 per byte in bit mode).
    pub fn symbol_count(&self) -> u64 {
        self.frequencies.total()
    }

    /// Account for the next chunk of raw input. Empty chunks are a no-op.
    pub fn ingest(&mut self, chunk: &[u8]) {
        log::trace!("ingesting {} bytes", chunk.len());
        let Self {
            mode,
            frequencies,
            pairs,
            monte_carlo,
            bytes,
        } = self;
        for &byte in chunk {
            mode.for_each_symbol(byte, |symbol| {
                frequencies.record(symbol);
                pairs.observe(symbol);
            });
            monte_carlo.observe_byte(byte);
        }
        *bytes += chunk.len() as u64;
    }

    /// Compute every derived metric and end the analysis.
    pub fn finalize(self) -> Report {
        debug_assert_eq!(
            self.frequencies.total(),
            self.bytes * self.mode.symbols_per_byte()
        );
        let chi_square = self.frequencies.chi_square();
        let degrees_of_freedom = self.frequencies.degrees_of_freedom();
        let report = Report {
            mode: self.mode,
            symbol_count: self.frequencies.total(),
            entropy: self.frequencies.entropy(),
            chi_square,
            degrees_of_freedom,
            chi_square_tail_probability: tail_probability(chi_square, degrees_of_freedom),
            mean: self.frequencies.mean(),
            monte_carlo_pi: self.monte_carlo.estimate(),
            serial_correlation: self.pairs.coefficient(),
            occurrences: self.frequencies.counts().to_vec(),
        };
        log::debug!(
            "stats engine finalized: {} bytes, {} symbols, {} monte carlo samples",
            self.bytes,
            report.symbol_count,
            self.monte_carlo.samples()
        );
        report
    }
}

/// Result of one analysis run.
///
/// `None` marks a measure that is undefined for the input: Monte Carlo π
/// before one full sample group, serial correlation when every symbol is
/// identical (or there are none).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mode: SymbolMode,
    pub symbol_count: u64,
    /// Shannon entropy in bits per symbol.
    pub entropy: f64,
    pub chi_square: f64,
    /// Alphabet size minus one.
    pub degrees_of_freedom: u32,
    /// `P(X >= chi_square)` under the uniform hypothesis, in `[0, 1]`.
    pub chi_square_tail_probability: f64,
    pub mean: f64,
    pub monte_carlo_pi: Option<f64>,
    pub serial_correlation: Option<f64>,
    /// Occurrence count of every symbol value, indexed by value.
    pub occurrences: Vec<u64>,
}

impl Report {
    /// Size reduction an optimal order-0 coder would achieve, in percent.
    pub fn optimum_compression_percent(&self) -> f64 {
        let max = self.mode.max_entropy();
        (100.0 * (max - self.entropy) / max).max(0.0)
    }

    /// Relative error of the Monte Carlo estimate against π, in percent.
    pub fn monte_carlo_error_percent(&self) -> Option<f64> {
        self.monte_carlo_pi
            .map(|estimate| 100.0 * (PI - estimate).abs() / PI)
    }

    /// Fraction of the stream made up of `symbol`.
    pub fn fraction(&self, symbol: usize) -> Option<f64> {
        if self.symbol_count == 0 {
            return None;
        }
        let count = *self.occurrences.get(symbol)?;
        Some(count as f64 / self.symbol_count as f64)
    }
}
