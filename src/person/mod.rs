//! Per-life running state

mod state;

pub use state::*;
