//! Event processing logic

use crate::config::{EventTable, LifeEventKind};
use crate::person::LifeState;
use rand::Rng;

/// What an event did to the person
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventOutcome {
    pub kind: LifeEventKind,
    pub health_lost: i32,
    pub pay_change: f64,
}

impl EventOutcome {
    #[inline]
    pub fn narrative(&self) -> &'static str {
        self.kind.description()
    }
}

/// Apply the configured effect of `kind` to `state`.
///
/// Kinds without a configured effect leave the state untouched.
pub fn apply_event<R: Rng + ?Sized>(
    rng: &mut R,
    state: &mut LifeState,
    table: &EventTable,
    kind: LifeEventKind,
) -> EventOutcome {
    let Some(effect) = table.effect(kind) else {
        return EventOutcome {
            kind,
            health_lost: 0,
            pay_change: 0.0,
        };
    };

    let before = state.health;
    if effect.health_loss_max > 0 {
        let loss = rng.gen_range(effect.health_loss_min..=effect.health_loss_max);
        state.change_health(-loss);
    }
    if effect.adverse_health {
        state.record_health_event();
    }
    if effect.pay_change != 0.0 {
        state.adjust_pay(effect.pay_change);
    }

    EventOutcome {
        kind,
        health_lost: before - state.health,
        pay_change: effect.pay_change,
    }
}
