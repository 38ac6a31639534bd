use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Smallest leaf the automatic policy will produce.
const MIN_AUTO_CHUNK: usize = 5;

/// Number of leaves the automatic policy aims for on large inputs.
const AUTO_LEAF_COUNT: usize = 20;

///
/// How large the leaves of a freshly built rope may be
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChunkSize {
    /// `max(len / 20, 5)`
    #[default]
    Auto,

    /// A fixed maximum leaf length. Zero is treated as one.
    Fixed(usize),
}

impl ChunkSize {
    /// The maximum leaf length to use for an input of `len` bytes.
    pub fn resolve(self, len: usize) -> usize {
        match self {
            ChunkSize::Auto => (len / AUTO_LEAF_COUNT).max(MIN_AUTO_CHUNK),
            ChunkSize::Fixed(size) => size.max(1),
        }
    }
}

impl FromStr for ChunkSize {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(ChunkSize::Auto),
            size => size.parse().map(ChunkSize::Fixed),
        }
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkSize::Auto => f.write_str("auto"),
            ChunkSize::Fixed(size) => write!(f, "{}", size),
        }
    }
}
