//! Event selection logic

use crate::config::{EventTable, LifeEventKind};
use rand::Rng;

/// Roll for this year's notable event.
///
/// An event happens with probability `annual_chance`; which one is then
/// drawn from the weighted pool. Returns `None` for an uneventful year.
#[inline]
pub fn roll_event<R: Rng + ?Sized>(rng: &mut R, table: &EventTable) -> Option<LifeEventKind> {
    if rng.gen::<f64>() >= table.annual_chance {
        return None;
    }
    Some(*table.pool.sample(rng))
}
