//! # entstat-core
//!
//! **How random does this stream look?**
//!
//! `entstat-core` computes the classic battery of randomness statistics over a
//! byte stream of any length in a single forward pass, without buffering the
//! input: Shannon entropy, a chi-square goodness-of-fit statistic with its
//! tail probability, the arithmetic mean, a Monte Carlo estimate of π and the
//! serial correlation coefficient.
//!
//! ## Quick Start
//!
//! ```
//! use entstat_core::{StatsEngine, SymbolMode};
//!
//! let mut engine = StatsEngine::new(SymbolMode::Byte);
//! let data: Vec<u8> = (0..=255).collect();
//! engine.ingest(&data[..100]);
//! engine.ingest(&data[100..]);
//!
//! let report = engine.finalize();
//! assert_eq!(report.symbol_count, 256);
//! assert_eq!(report.mean, 127.5);
//! assert!((report.entropy - 8.0).abs() < 1e-12);
//! ```
//!
//! ## Architecture
//!
//! Raw bytes → [`StatsEngine::ingest`] → accumulators → [`StatsEngine::finalize`] → [`Report`]
//!
//! Two symbol modes:
//! - **Byte**: every byte is a symbol from an alphabet of 256.
//! - **Bit**: every byte yields 8 binary symbols, most-significant bit first.
//!   The Monte Carlo estimator still consumes whole bytes.
//!
//! Measures that are undefined for the input (serial correlation of a constant
//! stream, Monte Carlo π with fewer than [`MC_GROUP_BYTES`] bytes) are
//! reported as `None`.

pub mod engine;
pub mod frequency;
pub mod gamma;
pub mod mode;
pub mod monte_carlo;
pub mod serial;

pub use engine::{Report, StatsEngine};
pub use frequency::FrequencyTable;
pub use gamma::{ln_gamma, regularized_gamma_p, regularized_gamma_q, tail_probability};
pub use mode::SymbolMode;
pub use monte_carlo::{MC_GROUP_BYTES, MonteCarloEstimator};
pub use serial::PairStatsAccumulator;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
