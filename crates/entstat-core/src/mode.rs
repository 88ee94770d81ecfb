//! Symbol interpretation of the input stream.

use serde::Serialize;

/// How raw input bytes are decoded into symbols.
///
/// Fixed for the lifetime of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolMode {
    /// Each input byte is one symbol (alphabet size 256).
    #[default]
    Byte,
    /// Each input byte yields 8 binary symbols, most-significant bit first.
    Bit,
}

impl std::fmt::Display for SymbolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl SymbolMode {
    /// Number of distinct symbol values.
    pub const fn alphabet_size(self) -> usize {
        match self {
            Self::Byte => 256,
            Self::Bit => 2,
        }
    }

    /// Symbols produced by one input byte.
    pub const fn symbols_per_byte(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Bit => 8,
        }
    }

    /// Human-readable unit name ("byte" or "bit").
    pub const fn label(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Bit => "bit",
        }
    }

    /// Arithmetic mean of a uniformly random stream of symbols.
    pub fn expected_mean(self) -> f64 {
        (self.alphabet_size() - 1) as f64 / 2.0
    }

    /// Largest possible Shannon entropy, in bits per symbol.
    pub fn max_entropy(self) -> f64 {
        (self.alphabet_size() as f64).log2()
    }

    /// Invoke `f` for every symbol encoded in `byte`, in stream order.
    #[inline]
    pub fn for_each_symbol(self, byte: u8, mut f: impl FnMut(u8)) {
        match self {
            Self::Byte => f(byte),
            Self::Bit => {
                for shift in (0..8).rev() {
                    f((byte >> shift) & 1);
                }
            }
        }
    }
}
