//! Tabular Q-learning over the 8×8 opponent/response space.
//!
//! # Module Structure
//!
//! - `config` — Validated hyperparameters (α, ε, episodes, seed)
//! - `table` — Value table and ε-greedy selection
//! - `trainer` — Episode loop, `solve`, policy extraction
//! - `metrics` — Training observability

mod config;
mod metrics;
mod table;
mod trainer;

pub use config::*;
pub use metrics::*;
pub use table::*;
pub use trainer::*;
