//! LyfSim - randomized life-story simulator
//!
//! Generates the biography of a simulated person from age 18 until death by
//! walking the years one tick at a time and drawing every outcome (birth
//! location, education, occupation, yearly events, death) from weighted
//! probability tables.
//!
//! All tables live in one [`TableBundle`], loaded and validated once and then
//! passed by reference into every generator call. Randomness is injected: the
//! generator draws only from the `R: Rng` it is given, so a seeded source
//! reproduces the same life exactly.
//!
//! ```no_run
//! use lyfsim::{generate_life, load_tables, rng};
//!
//! let tables = load_tables("data")?;
//! let life = generate_life(&mut rng::seeded(42), &tables)?;
//! println!("{}", life);
//! # Ok::<(), lyfsim::LyfSimError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod person;
pub mod rng;
pub mod sampling;
pub mod simulator;

pub use config::{load_tables, LifeTables, TableBundle};
pub use error::{LyfSimError, Result};
pub use simulator::{
    generate_batch, generate_life, LifeGenerator, LifeRecord, Session, StageKind, StageOutcome,
    MAX_BATCH, MIN_BATCH,
};
