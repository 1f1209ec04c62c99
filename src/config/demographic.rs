//! Demographic axes and per-axis lookup structures

use crate::error::{LyfSimError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a person grows up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Rural,
    Suburban,
    Urban,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Rural, Location::Suburban, Location::Urban];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Rural => "rural",
            Location::Suburban => "suburban",
            Location::Urban => "urban",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest completed education
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    HighSchool,
    College,
    Graduate,
}

impl Education {
    pub const ALL: [Education; 3] = [Education::HighSchool, Education::College, Education::Graduate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Education::HighSchool => "high_school",
            Education::College => "college",
            Education::Graduate => "graduate",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per [`Location`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByLocation<T> {
    pub rural: T,
    pub suburban: T,
    pub urban: T,
}

impl<T> ByLocation<T> {
    #[inline]
    pub fn get(&self, location: Location) -> &T {
        match location {
            Location::Rural => &self.rural,
            Location::Suburban => &self.suburban,
            Location::Urban => &self.urban,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        Location::ALL.into_iter().map(move |location| (location, self.get(location)))
    }
}

/// One value per [`Education`] level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByEducation<T> {
    pub high_school: T,
    pub college: T,
    pub graduate: T,
}

impl<T> ByEducation<T> {
    #[inline]
    pub fn get(&self, education: Education) -> &T {
        match education {
            Education::HighSchool => &self.high_school,
            Education::College => &self.college,
            Education::Graduate => &self.graduate,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Education, &T)> {
        Education::ALL.into_iter().map(move |education| (education, self.get(education)))
    }
}

/// First and last name pools for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameTable {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
}

impl NameTable {
    pub fn new(first_names: &[&str], last_names: &[&str]) -> Self {
        Self {
            first_names: first_names.iter().map(|s| s.to_string()).collect(),
            last_names: last_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Uniformly pick a first and a last name
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let first = self.first_names.choose(rng).map_or("Unknown", String::as_str);
        let last = self.last_names.choose(rng).map_or("Person", String::as_str);
        format!("{} {}", first, last)
    }

    pub fn validate(&self, location: Location) -> Result<()> {
        if self.first_names.is_empty() || self.last_names.is_empty() {
            return Err(LyfSimError::InvalidTable(format!(
                "name pool for {} must have first and last names",
                location
            )));
        }
        Ok(())
    }
}

/// Starting health and age-related decline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthModel {
    /// Base starting health per location
    pub base: ByLocation<i32>,
    /// Starting health varies uniformly by +/- this much
    pub spread: i32,
    pub floor: i32,
    pub ceiling: i32,
    /// Yearly decline starts after this age
    pub decline_onset_age: u32,
    pub max_annual_decline: i32,
}

impl HealthModel {
    /// Draw a starting health for `location`, clamped to [floor, ceiling]
    pub fn starting_health<R: Rng + ?Sized>(&self, location: Location, rng: &mut R) -> i32 {
        let jitter = rng.gen_range(-self.spread..=self.spread);
        self.base
            .get(location)
            .saturating_add(jitter)
            .clamp(self.floor, self.ceiling)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.spread) || self.max_annual_decline < 0 {
            return Err(LyfSimError::InvalidTable(
                "health spread must lie in [0, 100] and decline be non-negative".to_string(),
            ));
        }
        if let Some((location, base)) = self
            .base
            .iter()
            .find(|(_, base)| !(0..=100).contains(*base))
        {
            return Err(LyfSimError::InvalidTable(format!(
                "base health {} for {} must lie in [0, 100]",
                base, location
            )));
        }
        if self.floor > self.ceiling || self.ceiling > 100 || self.floor < 0 {
            return Err(LyfSimError::InvalidTable(format!(
                "health bounds [{}, {}] must sit inside [0, 100]",
                self.floor, self.ceiling
            )));
        }
        Ok(())
    }
}

/// Milestone ages and experience-based pay growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeCourse {
    /// Age at which the simulation starts
    pub start_age: u32,
    /// Age at which education completes and the career begins
    pub graduation_age: u32,
    /// Pay multiplier gained per year of experience
    pub experience_rate: f64,
    pub experience_cap: f64,
}

impl LifeCourse {
    /// Experience multiplier applied to the pay range at `age`
    #[inline]
    pub fn experience_multiplier(&self, age: u32) -> f64 {
        let years = age.saturating_sub(self.graduation_age) as f64;
        (1.0 + years * self.experience_rate).min(self.experience_cap)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_age >= self.graduation_age {
            return Err(LyfSimError::DataIntegrity(format!(
                "start age {} must precede graduation age {}",
                self.start_age, self.graduation_age
            )));
        }
        if !self.experience_rate.is_finite()
            || self.experience_rate < 0.0
            || !self.experience_cap.is_finite()
            || self.experience_cap < 1.0
        {
            return Err(LyfSimError::InvalidTable(
                "experience rate must be non-negative and cap at least 1.0".to_string(),
            ));
        }
        Ok(())
    }
}
