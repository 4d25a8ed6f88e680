//! Penney's game: who calls the better three-coin sequence?
//!
//! This facade crate re-exports the workspace crates for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`] — Type aliases, tuning constants, logging and interrupts
//! - [`coins`] — Coins, sequences, and pattern classes
//! - [`game`] — Coin-race simulator, closed-form oracle, policies
//! - [`learning`] — Tabular Q-learning trainer
//! - [`verify`] — Monte Carlo estimates, consistency checks, tournaments

pub use penney_coins    as coins;
pub use penney_core     as core;
pub use penney_game     as game;
pub use penney_learning as learning;
pub use penney_verify   as verify;

#[cfg(feature = "server")]
mod cli;
#[cfg(feature = "server")]
pub use cli::*;
