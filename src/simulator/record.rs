//! Generated life records and their text rendering

use crate::config::{DeathCause, Education, EmploymentLevel, LifeEventKind, Location};
use serde::Serialize;
use std::fmt;

/// What a biography line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Birth,
    Education,
    Career,
    Event(LifeEventKind),
    Death,
}

/// One dated line of a biography
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOutcome {
    pub age: u32,
    pub kind: StageKind,
    pub text: String,
}

impl StageOutcome {
    pub fn new(age: u32, kind: StageKind, text: impl Into<String>) -> Self {
        Self {
            age,
            kind,
            text: text.into(),
        }
    }

    #[inline]
    pub fn is_event(&self) -> bool {
        matches!(self.kind, StageKind::Event(_))
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StageKind::Birth => f.write_str(&self.text),
            _ => write!(f, "Age {}: {}", self.age, self.text),
        }
    }
}

/// A complete simulated life
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifeRecord {
    pub name: String,
    pub location: Location,
    pub education: Education,
    pub occupation: String,
    /// Typical (median) yearly income of the occupation
    pub income: u64,
    pub employment: Option<EmploymentLevel>,
    pub starting_health: i32,
    pub final_health: i32,
    pub lowest_health: i32,
    pub health_events: u32,
    pub final_income: u64,
    pub peak_income: u64,
    pub lifetime_earnings: u64,
    pub death_age: u32,
    pub death_cause: DeathCause,
    /// Biography in chronological order, birth first and death last
    pub stages: Vec<StageOutcome>,
}

impl LifeRecord {
    /// Random events only, without the fixed milestones
    pub fn major_events(&self) -> impl Iterator<Item = &StageOutcome> {
        self.stages.iter().filter(|stage| stage.is_event())
    }
}

impl fmt::Display for LifeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== LIFE SIMULATION COMPLETE ===")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Died at age: {}", self.death_age)?;
        writeln!(f, "Cause of death: {}", self.death_cause)?;
        writeln!(f, "Final education: {}", self.education)?;
        writeln!(f, "Final career: {}", self.occupation)?;
        writeln!(f, "Typical income: ${}", format_dollars(self.income))?;
        writeln!(f, "Final income: ${}", format_dollars(self.final_income))?;
        writeln!(f, "Peak income: ${}", format_dollars(self.peak_income))?;
        writeln!(
            f,
            "Lifetime earnings: ${}",
            format_dollars(self.lifetime_earnings)
        )?;
        writeln!(f, "Final health: {}", self.final_health)?;
        writeln!(f, "Location type: {}", self.location)?;
        writeln!(f)?;
        writeln!(f, "=== MAJOR LIFE EVENTS ===")?;
        for stage in &self.stages {
            writeln!(f, "  • {}", stage)?;
        }
        Ok(())
    }
}

/// `1234567` -> `1,234,567`
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
