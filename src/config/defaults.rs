//! Built-in tables, loosely based on US demographic and labor statistics

use super::demographic::{ByEducation, ByLocation, Education, HealthModel, LifeCourse, Location, NameTable};
use super::event::{
    CauseWeight, DeathCause, EventEffect, EventTable, LifeEventKind, MortalityModel,
    MortalityTable,
};
use super::income::{render_csv, EmploymentLevel, IncomeEntry};
use super::LifeTables;
use crate::sampling::ProbabilityTable;

const RURAL_FIRST: &[&str] = &[
    "James", "Mary", "John", "Patricia", "Robert", "Jennifer", "Michael", "Linda", "William",
    "Elizabeth", "David", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Christopher", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark",
    "Helen", "Donald", "Sandra", "Steven", "Donna",
];
const RURAL_LAST: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson",
];

const SUBURBAN_FIRST: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
    "Mia", "James", "Charlotte", "Benjamin", "Amelia", "Lucas", "Evelyn", "Henry", "Abigail",
    "Alexander", "Harper", "Sebastian", "Emily", "Jack", "Elizabeth", "Owen", "Avery", "Theodore",
    "Sofia", "Aiden", "Ella", "Samuel",
];
const SUBURBAN_LAST: &[&str] = &[
    "Anderson", "Taylor", "Thomas", "Jackson", "White", "Harris", "Martin", "Thompson", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez", "Lewis", "Lee", "Walker", "Hall", "Allen",
    "Young", "Hernandez", "King", "Wright", "Lopez", "Hill",
];

const URBAN_FIRST: &[&str] = &[
    "Aiden", "Zoe", "Xavier", "Maya", "Kai", "Aria", "Diego", "Luna", "Mateo", "Zara", "Jamal",
    "Aaliyah", "Hassan", "Fatima", "Chen", "Priya", "Andre", "Jasmine", "Carlos", "Gabriela",
    "Malik", "Nia", "Oscar", "Camila", "Isaiah", "Keya", "Vincent", "Amara", "Dante", "Sage",
    "Phoenix", "River",
];
const URBAN_LAST: &[&str] = &[
    "Johnson", "Brown", "Davis", "Miller", "Wilson", "Garcia", "Martinez", "Hernandez", "Lopez",
    "Gonzalez", "Perez", "Sanchez", "Ramirez", "Rivera", "Torres", "Flores", "Washington",
    "Jefferson", "Adams", "Jackson", "White", "Harris", "Clark", "Lewis",
];

/// (occupation, median, min, max, employment level)
const INCOME_ROWS: &[(&str, u64, u64, u64, EmploymentLevel)] = &[
    ("retail", 28_500, 25_000, 35_000, EmploymentLevel::High),
    ("manufacturing", 42_000, 35_000, 55_000, EmploymentLevel::Medium),
    ("service", 24_000, 20_000, 30_000, EmploymentLevel::High),
    ("trades", 48_000, 40_000, 70_000, EmploymentLevel::Medium),
    ("military", 45_000, 35_000, 80_000, EmploymentLevel::Medium),
    ("office_worker", 38_000, 35_000, 65_000, EmploymentLevel::High),
    ("teacher", 47_000, 35_000, 55_000, EmploymentLevel::High),
    ("nurse", 65_000, 50_000, 75_000, EmploymentLevel::High),
    ("manager", 75_000, 55_000, 95_000, EmploymentLevel::Medium),
    ("engineer", 95_000, 65_000, 120_000, EmploymentLevel::High),
    ("doctor", 220_000, 150_000, 400_000, EmploymentLevel::Low),
    ("lawyer", 125_000, 60_000, 250_000, EmploymentLevel::Low),
    ("professor", 58_000, 45_000, 85_000, EmploymentLevel::Low),
    ("executive", 180_000, 100_000, 500_000, EmploymentLevel::Low),
    ("researcher", 72_000, 55_000, 95_000, EmploymentLevel::Low),
];

/// Job-title labels (as in BLS-style income files) and the career each one pays for
const OCCUPATION_ALIASES: &[(&str, &str)] = &[
    ("retail_salesperson", "retail"),
    ("manufacturing_worker", "manufacturing"),
    ("food_service", "service"),
    ("construction_worker", "trades"),
    ("military_enlisted", "military"),
    ("office_clerk", "office_worker"),
    ("registered_nurse", "nurse"),
    ("software_engineer", "engineer"),
    ("physician", "doctor"),
];

/// Career a job-title income row stands in for, if it is a known alias
pub(crate) fn career_alias(occupation: &str) -> Option<&'static str> {
    OCCUPATION_ALIASES
        .iter()
        .find(|(title, _)| *title == occupation)
        .map(|(_, career)| *career)
}

const HIGH_SCHOOL_CAREERS: &[&str] = &["retail", "manufacturing", "service", "trades", "military"];
const COLLEGE_CAREERS: &[&str] = &["office_worker", "teacher", "nurse", "manager", "engineer"];
const GRADUATE_CAREERS: &[&str] = &["doctor", "lawyer", "professor", "executive", "researcher"];

/// Default income entries in file order
pub fn income_entries() -> Vec<IncomeEntry> {
    INCOME_ROWS
        .iter()
        .map(|&(occupation, median, min, max, level)| {
            IncomeEntry::new(occupation, median)
                .with_range(min, max)
                .with_employment(level)
        })
        .collect()
}

/// Contents written to the income file on first run
pub fn income_csv() -> String {
    render_csv(income_entries().iter())
}

fn education_table(high_school: f64, college: f64, graduate: f64) -> ProbabilityTable<Education> {
    ProbabilityTable::builtin(vec![
        (Education::HighSchool, high_school),
        (Education::College, college),
        (Education::Graduate, graduate),
    ])
}

fn careers(labels: &[&str]) -> ProbabilityTable<String> {
    ProbabilityTable::builtin(labels.iter().map(|label| (label.to_string(), 1.0)).collect())
}

impl Default for HealthModel {
    fn default() -> Self {
        Self {
            base: ByLocation {
                rural: 75,
                suburban: 80,
                urban: 70,
            },
            spread: 15,
            floor: 20,
            ceiling: 100,
            decline_onset_age: 40,
            max_annual_decline: 2,
        }
    }
}

impl Default for LifeCourse {
    fn default() -> Self {
        Self {
            start_age: 18,
            graduation_age: 22,
            experience_rate: 0.02,
            experience_cap: 1.5,
        }
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self {
            annual_chance: 0.1,
            pool: ProbabilityTable::builtin(
                LifeEventKind::ALL.iter().map(|kind| (*kind, 1.0)).collect(),
            ),
            effects: vec![
                EventEffect {
                    pay_change: 0.10,
                    ..EventEffect::narrative(LifeEventKind::Promotion)
                },
                EventEffect {
                    health_loss_min: 10,
                    health_loss_max: 20,
                    adverse_health: true,
                    ..EventEffect::narrative(LifeEventKind::HealthIssue)
                },
                EventEffect {
                    pay_change: -0.05,
                    ..EventEffect::narrative(LifeEventKind::FinancialDifficulty)
                },
            ],
        }
    }
}

impl Default for MortalityTable {
    fn default() -> Self {
        let weighted = |cause, weight, per_health_event| CauseWeight {
            cause,
            weight,
            per_health_event,
        };
        Self {
            model: MortalityModel::Hazard {
                max_age: 95,
                floor: 0.001,
                age_onset: 60,
                age_rate: 0.002,
                health_rate: 0.001,
            },
            causes: vec![
                weighted(DeathCause::NaturalCauses, 0.60, 0.0),
                weighted(DeathCause::Illness, 0.20, 0.30),
                weighted(DeathCause::HeartDisease, 0.15, 0.10),
                weighted(DeathCause::Accident, 0.05, 0.0),
            ],
        }
    }
}

impl Default for LifeTables {
    fn default() -> Self {
        Self {
            names: ByLocation {
                rural: NameTable::new(RURAL_FIRST, RURAL_LAST),
                suburban: NameTable::new(SUBURBAN_FIRST, SUBURBAN_LAST),
                urban: NameTable::new(URBAN_FIRST, URBAN_LAST),
            },
            locations: ProbabilityTable::builtin(
                Location::ALL.iter().map(|location| (*location, 1.0)).collect(),
            ),
            health: HealthModel::default(),
            course: LifeCourse::default(),
            education: ByLocation {
                rural: education_table(0.75, 0.20, 0.05),
                suburban: education_table(0.60, 0.35, 0.05),
                urban: education_table(0.50, 0.40, 0.10),
            },
            occupations: ByEducation {
                high_school: careers(HIGH_SCHOOL_CAREERS),
                college: careers(COLLEGE_CAREERS),
                graduate: careers(GRADUATE_CAREERS),
            },
            events: EventTable::default(),
            mortality: MortalityTable::default(),
        }
    }
}
