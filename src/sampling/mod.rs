//! Weighted categorical sampling shared by every decision axis

pub mod selector;
mod table;


pub use selector::*;
pub use table::*;
