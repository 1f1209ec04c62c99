//! Occupation income table and its persisted CSV form

use super::defaults::career_alias;
use crate::error::{LyfSimError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// File name of the persisted income table inside the data directory
pub const INCOME_FILE_NAME: &str = "occupation_income.csv";

const INCOME_HEADER: &str = "occupation,median_income,min_income,max_income,employment_level";

/// How common the occupation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentLevel {
    High,
    Medium,
    Low,
}

impl EmploymentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentLevel::High => "high",
            EmploymentLevel::Medium => "medium",
            EmploymentLevel::Low => "low",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "high" => Some(EmploymentLevel::High),
            "medium" => Some(EmploymentLevel::Medium),
            "low" => Some(EmploymentLevel::Low),
            _ => None,
        }
    }
}

/// Income figures for one occupation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeEntry {
    pub occupation: String,
    /// Typical yearly income, the figure reported on a life record
    pub median: u64,
    /// Yearly pay range before experience scaling
    pub min: u64,
    pub max: u64,
    pub employment: Option<EmploymentLevel>,
}

impl IncomeEntry {
    /// A point income: the pay range collapses to the median
    pub fn new(occupation: impl Into<String>, median: u64) -> Self {
        Self {
            occupation: occupation.into(),
            median,
            min: median,
            max: median,
            employment: None,
        }
    }

    pub fn with_range(mut self, min: u64, max: u64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_employment(mut self, employment: EmploymentLevel) -> Self {
        self.employment = Some(employment);
        self
    }
}

/// Occupation label -> income lookup, in file order
#[derive(Debug, Clone)]
pub struct IncomeTable {
    entries: Vec<IncomeEntry>,
    index: AHashMap<String, usize>,
}

impl IncomeTable {
    /// Build a table, rejecting duplicate occupations and inverted ranges.
    ///
    /// Rows labelled with a known job title (`software_engineer`,
    /// `physician`, ...) also answer lookups for the career they pay for,
    /// unless that career has a row of its own.
    pub fn new(entries: Vec<IncomeEntry>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.min > entry.max {
                return Err(LyfSimError::InvalidTable(format!(
                    "occupation '{}' has min income {} above max {}",
                    entry.occupation, entry.min, entry.max
                )));
            }
            if index.insert(entry.occupation.clone(), position).is_some() {
                return Err(LyfSimError::InvalidTable(format!(
                    "occupation '{}' appears more than once",
                    entry.occupation
                )));
            }
        }
        for (position, entry) in entries.iter().enumerate() {
            if let Some(career) = career_alias(&entry.occupation) {
                index.entry(career.to_string()).or_insert(position);
            }
        }
        Ok(Self { entries, index })
    }

    #[inline]
    pub fn get(&self, occupation: &str) -> Option<&IncomeEntry> {
        self.index.get(occupation).map(|&position| &self.entries[position])
    }

    /// Look up an occupation, treating a miss as a data integrity fault
    pub fn lookup(&self, occupation: &str) -> Result<&IncomeEntry> {
        self.get(occupation).ok_or_else(|| {
            LyfSimError::DataIntegrity(format!(
                "occupation '{}' has no income entry",
                occupation
            ))
        })
    }

    pub fn contains(&self, occupation: &str) -> bool {
        self.index.contains_key(occupation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IncomeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse comma-delimited rows with a header line.
    ///
    /// `occupation` and `median_income` (or `income`) are required columns;
    /// `min_income`, `max_income` and `employment_level` are optional.
    pub fn parse_csv(text: &str) -> Result<Self> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = rows.next().ok_or(LyfSimError::MalformedIncomeData {
            line: 1,
            reason: "missing header row".to_string(),
        })?;
        let columns = Columns::from_header(header_line, header.trim_start_matches('\u{feff}'))?;

        let mut entries = Vec::new();
        let mut first_seen: AHashMap<String, usize> = AHashMap::new();

        for (line, row) in rows {
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != columns.width {
                return Err(malformed(
                    line,
                    format!("expected {} fields, found {}", columns.width, fields.len()),
                ));
            }

            let occupation = fields[columns.occupation];
            if occupation.is_empty() {
                return Err(malformed(line, "empty occupation label".to_string()));
            }
            if let Some(previous) = first_seen.insert(occupation.to_string(), line) {
                return Err(malformed(
                    line,
                    format!("duplicate occupation '{}' (first at line {})", occupation, previous),
                ));
            }

            let median = parse_amount(line, "median income", fields[columns.median])?;
            let min = match columns.min {
                Some(column) => parse_amount(line, "min income", fields[column])?,
                None => median,
            };
            let max = match columns.max {
                Some(column) => parse_amount(line, "max income", fields[column])?,
                None => median,
            };
            if min > max {
                return Err(malformed(
                    line,
                    format!("min income {} above max income {}", min, max),
                ));
            }

            let employment = match columns.employment.map(|column| fields[column]) {
                Some(level) if !level.is_empty() => Some(EmploymentLevel::parse(level).ok_or_else(
                    || malformed(line, format!("unknown employment level '{}'", level)),
                )?),
                _ => None,
            };

            entries.push(IncomeEntry {
                occupation: occupation.to_string(),
                median,
                min,
                max,
                employment,
            });
        }

        if entries.is_empty() {
            return Err(LyfSimError::InvalidTable(
                "income table has no occupation rows".to_string(),
            ));
        }

        Self::new(entries)
    }

    /// Render in the persisted CSV layout
    pub fn to_csv(&self) -> String {
        render_csv(self.entries.iter())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| LyfSimError::io(path, e))?;
        Self::parse_csv(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_csv()).map_err(|e| LyfSimError::io(path, e))
    }
}

/// Render entries in the persisted CSV layout
pub(crate) fn render_csv<'a>(entries: impl Iterator<Item = &'a IncomeEntry>) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(INCOME_HEADER);
    out.push('\n');
    for entry in entries {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            entry.occupation,
            entry.median,
            entry.min,
            entry.max,
            entry.employment.map_or("", |level| level.as_str())
        );
    }
    out
}

/// Column positions resolved from the header row
struct Columns {
    width: usize,
    occupation: usize,
    median: usize,
    min: Option<usize>,
    max: Option<usize>,
    employment: Option<usize>,
}

impl Columns {
    fn from_header(line: usize, header: &str) -> Result<Self> {
        let names: Vec<String> = header
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .collect();
        let find = |wanted: &[&str]| names.iter().position(|name| wanted.contains(&name.as_str()));

        let occupation = find(&["occupation"])
            .ok_or_else(|| malformed(line, "header lacks an 'occupation' column".to_string()))?;
        let median = find(&["median_income", "income"]).ok_or_else(|| {
            malformed(line, "header lacks a 'median_income' column".to_string())
        })?;

        Ok(Self {
            width: names.len(),
            occupation,
            median,
            min: find(&["min_income"]),
            max: find(&["max_income"]),
            employment: find(&["employment_level"]),
        })
    }
}

fn malformed(line: usize, reason: String) -> LyfSimError {
    LyfSimError::MalformedIncomeData { line, reason }
}

fn parse_amount(line: usize, what: &str, field: &str) -> Result<u64> {
    field
        .parse::<u64>()
        .map_err(|_| malformed(line, format!("{} '{}' is not a whole dollar amount", what, field)))
}
