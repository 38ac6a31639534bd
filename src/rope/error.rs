use std::fmt;

/// Errors reported by rope operations.
///
/// A mutator that returns an error leaves the rope untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RopeError {
    /// A signed position below zero
    NegativeIndex(i64),

    /// `at` was asked for a byte past the end of the rope
    IndexOutOfBounds { index: usize, len: usize },

    /// A cut position (split, insert, delete) past the end of the rope
    InvalidPosition { pos: usize, len: usize },
}

impl fmt::Display for RopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RopeError::NegativeIndex(pos) => write!(f, "cannot index negative value {}", pos),
            RopeError::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for rope of length {}", index, len)
            }
            RopeError::InvalidPosition { pos, len } => {
                write!(f, "position {} is past the end of a rope of length {}", pos, len)
            }
        }
    }
}

impl std::error::Error for RopeError {}

pub type Result<T, E = RopeError> = std::result::Result<T, E>;

///
/// Converts a signed position into a rope offset, rejecting negative values.
///
pub fn position(pos: i64) -> Result<usize> {
    if pos < 0 {
        return Err(RopeError::NegativeIndex(pos));
    }

    Ok(pos as usize)
}
