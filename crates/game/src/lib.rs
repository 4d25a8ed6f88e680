//! Penney's game: who calls the sequence that shows up first.
//!
//! - [`Game`] / [`simulate`] — race two sequences over a stream of fair coins
//! - [`Oracle`] / [`Rule`] — closed-form optimal response and exact odds
//! - [`Policy`] — total mapping from opponent sequence to response
//! - [`WinRates`] — one win probability per opponent sequence
mod game;
mod oracle;
mod policy;
mod rates;
mod winner;

pub use game::*;
pub use oracle::*;
pub use policy::*;
pub use rates::*;
pub use winner::*;
