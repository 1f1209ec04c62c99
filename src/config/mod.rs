//! Configuration module for simulation tables
//!
//! Everything a life is sampled from lives in a [`TableBundle`]: the
//! [`LifeTables`] (probability tables and model constants) plus the
//! [`IncomeTable`]. The bundle is validated once when it is built and is
//! read-only afterwards, so one bundle can back any number of generator
//! calls.
//!
//! On disk the data directory holds `occupation_income.csv`, written with
//! built-in figures the first time it is missing, and an optional
//! `life_tables.json` whose fields override the built-in tables.

mod defaults;
mod demographic;
mod event;
mod income;

pub use defaults::{income_csv, income_entries};
pub use demographic::*;
pub use event::*;
pub use income::*;

use crate::error::{LyfSimError, Result};
use crate::sampling::ProbabilityTable;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the optional table overrides inside the data directory
pub const TABLES_FILE_NAME: &str = "life_tables.json";

/// Probability tables and model constants; missing JSON fields fall back to the built-ins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeTables {
    pub names: ByLocation<NameTable>,
    pub locations: ProbabilityTable<Location>,
    pub health: HealthModel,
    pub course: LifeCourse,
    /// Education outcome, conditioned on where the person grew up
    pub education: ByLocation<ProbabilityTable<Education>>,
    /// Occupation labels per education level; each must have an income entry
    pub occupations: ByEducation<ProbabilityTable<String>>,
    pub events: EventTable,
    pub mortality: MortalityTable,
}

impl LifeTables {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check every table and the cross-table age constraints
    pub fn validate(&self) -> Result<()> {
        for (location, names) in self.names.iter() {
            names.validate(location)?;
        }
        self.locations.validate()?;
        self.health.validate()?;
        self.course.validate()?;
        for (_, table) in self.education.iter() {
            table.validate()?;
        }
        for (_, table) in self.occupations.iter() {
            table.validate()?;
        }
        self.events.validate()?;
        self.mortality.validate()?;

        let limit = self.mortality.model.age_limit();
        if limit < self.course.graduation_age {
            return Err(LyfSimError::DataIntegrity(format!(
                "lives end by age {} but careers start at {}",
                limit, self.course.graduation_age
            )));
        }
        Ok(())
    }
}

/// The complete, validated set of tables a life is sampled from
#[derive(Debug, Clone)]
pub struct TableBundle {
    tables: LifeTables,
    income: IncomeTable,
}

impl TableBundle {
    /// Validate `tables` and check that every occupation has an income entry
    pub fn new(tables: LifeTables, income: IncomeTable) -> Result<Self> {
        tables.validate()?;

        for (education, table) in tables.occupations.iter() {
            if let Some(missing) = table.labels().find(|label| !income.contains(label)) {
                return Err(LyfSimError::DataIntegrity(format!(
                    "occupation '{}' ({}) has no income entry",
                    missing, education
                )));
            }
        }

        Ok(Self { tables, income })
    }

    /// Bundle of the built-in tables, without touching the filesystem
    pub fn built_in() -> Result<Self> {
        Self::new(
            LifeTables::default(),
            IncomeTable::new(defaults::income_entries())?,
        )
    }

    #[inline]
    pub fn tables(&self) -> &LifeTables {
        &self.tables
    }

    #[inline]
    pub fn income(&self) -> &IncomeTable {
        &self.income
    }
}

/// Load the table bundle from `data_dir`, creating the income file on first run
pub fn load_tables(data_dir: impl AsRef<Path>) -> Result<TableBundle> {
    let data_dir = data_dir.as_ref();
    fs::create_dir_all(data_dir).map_err(|e| LyfSimError::io(data_dir, e))?;

    let income_path = data_dir.join(INCOME_FILE_NAME);
    if !income_path.exists() {
        info!(
            "First run detected, writing default income data to {}",
            income_path.display()
        );
        fs::write(&income_path, income_csv()).map_err(|e| LyfSimError::io(&income_path, e))?;
    }
    let income = IncomeTable::load(&income_path)?;
    debug!(
        "Loaded {} occupations from {}",
        income.len(),
        income_path.display()
    );

    let tables_path = data_dir.join(TABLES_FILE_NAME);
    let tables = if tables_path.exists() {
        let text =
            fs::read_to_string(&tables_path).map_err(|e| LyfSimError::io(&tables_path, e))?;
        debug!("Using table overrides from {}", tables_path.display());
        LifeTables::from_json(&text)?
    } else {
        LifeTables::default()
    };

    TableBundle::new(tables, income)
}
