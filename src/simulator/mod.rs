//! Life generation: the yearly walk, the records it produces, and sessions

mod engine;
mod record;
mod session;

#[cfg(test)]
mod property_tests;

pub use engine::*;
pub use record::*;
pub use session::*;
