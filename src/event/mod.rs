//! Yearly life events: rolling them and applying their effects

mod processor;
pub mod selector;


pub use processor::*;
pub use selector::*;
