//! Sequence domain for Penney's game.
//!
//! - [`Coin`] — the two-symbol alphabet and its flip involution
//! - [`Sequence`] — one of the 8 ordered coin triples a player can call
//! - [`Pattern`] — uniform / palindromic / generic classification
mod coin;
mod pattern;
mod sequence;

pub use coin::*;
pub use pattern::*;
pub use sequence::*;
