//! Statistical verification of simulated play.
//!
//! Everything here is a pure function of its inputs plus simulator
//! randomness. Trials run in fixed-size chunks, each with its own generator
//! derived from `(seed, case, chunk)`, so a seeded [`Harness`] reproduces
//! its results exactly whether chunks run on one thread or many.

mod consistency;
mod estimate;
mod harness;
mod tournament;

pub use consistency::*;
pub use estimate::*;
pub use harness::*;
pub use tournament::*;
