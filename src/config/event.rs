//! Life event and mortality configuration structures

use crate::error::{LyfSimError, Result};
use crate::sampling::{weighted_random, ProbabilityTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Notable things that can happen in a simulated year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    Promotion,
    Relocation,
    HealthIssue,
    NewRelationship,
    BoughtHouse,
    FinancialDifficulty,
}

impl LifeEventKind {
    pub const ALL: [LifeEventKind; 6] = [
        LifeEventKind::Promotion,
        LifeEventKind::Relocation,
        LifeEventKind::HealthIssue,
        LifeEventKind::NewRelationship,
        LifeEventKind::BoughtHouse,
        LifeEventKind::FinancialDifficulty,
    ];

    /// Narrative line for the biography
    pub fn description(&self) -> &'static str {
        match self {
            LifeEventKind::Promotion => "Got promoted at work",
            LifeEventKind::Relocation => "Moved to a new city",
            LifeEventKind::HealthIssue => "Had a major health issue",
            LifeEventKind::NewRelationship => "Started a new relationship",
            LifeEventKind::BoughtHouse => "Bought a house",
            LifeEventKind::FinancialDifficulty => "Had financial difficulties",
        }
    }
}

impl fmt::Display for LifeEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// State changes applied when an event fires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    pub kind: LifeEventKind,
    /// Health lost, drawn uniformly from [min, max]
    #[serde(default)]
    pub health_loss_min: i32,
    #[serde(default)]
    pub health_loss_max: i32,
    /// Added to the running pay multiplier
    #[serde(default)]
    pub pay_change: f64,
    /// Counts toward the adverse health tally that skews the cause of death
    #[serde(default)]
    pub adverse_health: bool,
}

impl EventEffect {
    /// An effect that only adds narrative
    pub fn narrative(kind: LifeEventKind) -> Self {
        Self {
            kind,
            health_loss_min: 0,
            health_loss_max: 0,
            pay_change: 0.0,
            adverse_health: false,
        }
    }
}

/// Yearly event roll configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    /// Chance per year that a notable event happens at all
    pub annual_chance: f64,
    /// Which event happens, given that one does
    pub pool: ProbabilityTable<LifeEventKind>,
    /// Effects keyed by kind; kinds without an entry only add narrative
    #[serde(default)]
    pub effects: Vec<EventEffect>,
}

impl EventTable {
    pub fn effect(&self, kind: LifeEventKind) -> Option<&EventEffect> {
        self.effects.iter().find(|effect| effect.kind == kind)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.annual_chance) {
            return Err(LyfSimError::InvalidTable(format!(
                "annual event chance {} is not a probability",
                self.annual_chance
            )));
        }
        self.pool.validate()?;
        for effect in &self.effects {
            if effect.health_loss_min < 0 || effect.health_loss_min > effect.health_loss_max {
                return Err(LyfSimError::InvalidTable(format!(
                    "event '{}' has health loss range [{}, {}]",
                    effect.kind.description(),
                    effect.health_loss_min,
                    effect.health_loss_max
                )));
            }
            if !effect.pay_change.is_finite() {
                return Err(LyfSimError::InvalidTable(format!(
                    "event '{}' has a non-finite pay change",
                    effect.kind.description()
                )));
            }
        }
        Ok(())
    }
}

/// How a simulated life ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    NaturalCauses,
    Illness,
    HeartDisease,
    Accident,
}

impl DeathCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeathCause::NaturalCauses => "natural causes",
            DeathCause::Illness => "illness",
            DeathCause::HeartDisease => "heart disease",
            DeathCause::Accident => "accident",
        }
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cause-of-death weight, raised by each adverse health event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseWeight {
    pub cause: DeathCause,
    pub weight: f64,
    #[serde(default)]
    pub per_health_event: f64,
}

/// When a life ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MortalityModel {
    /// Yearly death chance from age and health; health 0 or `max_age` ends the life
    Hazard {
        max_age: u32,
        floor: f64,
        age_onset: u32,
        age_rate: f64,
        health_rate: f64,
    },
    /// Every life ends at exactly `age`
    Fixed { age: u32 },
}

impl MortalityModel {
    /// Oldest age a life can reach
    pub fn age_limit(&self) -> u32 {
        match self {
            MortalityModel::Hazard { max_age, .. } => *max_age,
            MortalityModel::Fixed { age } => *age,
        }
    }

    /// Yearly death probability under the hazard model; `None` for fixed lifespans
    pub fn yearly_hazard(&self, age: u32, health: i32) -> Option<f64> {
        match self {
            MortalityModel::Hazard {
                floor,
                age_onset,
                age_rate,
                health_rate,
                ..
            } => {
                let aging = (age as f64 - *age_onset as f64) * age_rate;
                let frailty = (100 - health) as f64 * health_rate;
                Some((aging + frailty).max(*floor))
            }
            MortalityModel::Fixed { .. } => None,
        }
    }
}

/// Mortality model plus cause-of-death weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityTable {
    pub model: MortalityModel,
    pub causes: Vec<CauseWeight>,
}

impl MortalityTable {
    /// Cause weights after `health_events` adverse health events
    pub fn cause_weights(&self, health_events: u32) -> SmallVec<[f64; 4]> {
        self.causes
            .iter()
            .map(|c| c.weight + c.per_health_event * health_events as f64)
            .collect()
    }

    /// Draw a cause of death after `health_events` adverse health events
    pub fn sample_cause<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        health_events: u32,
    ) -> Option<DeathCause> {
        let weighted: SmallVec<[(DeathCause, f64); 4]> = self
            .causes
            .iter()
            .zip(self.cause_weights(health_events))
            .map(|(c, weight)| (c.cause, weight))
            .collect();
        weighted_random(rng, &weighted).copied()
    }

    pub fn validate(&self) -> Result<()> {
        if self.causes.is_empty() {
            return Err(LyfSimError::InvalidTable(
                "mortality table has no causes of death".to_string(),
            ));
        }
        let mut base_total = 0.0;
        let mut per_event_total = 0.0;
        for cause in &self.causes {
            let valid = |w: f64| w.is_finite() && w >= 0.0;
            if !valid(cause.weight) || !valid(cause.per_health_event) {
                return Err(LyfSimError::InvalidTable(format!(
                    "cause '{}' has an invalid weight",
                    cause.cause
                )));
            }
            base_total += cause.weight;
            per_event_total += cause.per_health_event;
        }
        if base_total <= 0.0 {
            return Err(LyfSimError::InvalidTable(
                "cause of death weights sum to zero".to_string(),
            ));
        }
        if !base_total.is_finite() || !per_event_total.is_finite() {
            return Err(LyfSimError::InvalidTable(
                "cause of death weights overflow when summed".to_string(),
            ));
        }

        if let MortalityModel::Hazard {
            floor,
            age_rate,
            health_rate,
            ..
        } = &self.model
        {
            if !(0.0..=1.0).contains(floor)
                || !age_rate.is_finite()
                || *age_rate < 0.0
                || !health_rate.is_finite()
                || *health_rate < 0.0
            {
                return Err(LyfSimError::InvalidTable(
                    "hazard floor must be a probability and rates non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}
