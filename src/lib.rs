//!
//! `ropebuf` is a byte rope: a drop-in for a flat byte buffer when most of the work is
//! inserting, deleting and splitting in the middle of large text.
//!
//! Text lives in the leaves of a weighted binary tree. Every internal node records the
//! length of its left subtree, so finding a position is a walk from the root and an edit
//! only rebuilds the path to the leaf it touches.
//!
//! ```
//! use ropebuf::Rope;
//!
//! let mut rope = Rope::with_chunk_size("Hello to this beaufitul world!".as_bytes(), 15);
//! rope.insert(11, b"Banana!").unwrap();
//! rope.delete(0, 6).unwrap();
//!
//! assert_eq!(rope.to_string(), "to thBanana!is beaufitul world!");
//! assert_eq!(rope.at(0), Ok(b't'));
//! ```

pub mod rope;

pub use crate::rope::*;
