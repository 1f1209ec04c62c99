//! Property tests for simulator module
//!
//! Property 7: Seeded generation is deterministic
//! Property 8: Every life is well formed (milestones, ages, income lookup)
//! Property 9: Batches return exactly the requested number of lives

use proptest::prelude::*;

use crate::config::{
    ByEducation, ByLocation, Education, IncomeEntry, IncomeTable, LifeEventKind, LifeTables,
    Location, MortalityModel, TableBundle,
};
use crate::error::LyfSimError;
use crate::rng::seeded;
use crate::sampling::ProbabilityTable;
use crate::simulator::{generate_batch, generate_life, StageKind, MAX_BATCH};

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// One location, one education path, one occupation "X" paid 50000, death at 80
fn single_path_bundle() -> TableBundle {
    let education = || ProbabilityTable::new(vec![(Education::College, 1.0)]).unwrap();
    let occupation = || ProbabilityTable::new(vec![("X".to_string(), 1.0)]).unwrap();

    let mut tables = LifeTables::default();
    tables.locations = ProbabilityTable::new(vec![(Location::Suburban, 1.0)]).unwrap();
    tables.education = ByLocation {
        rural: education(),
        suburban: education(),
        urban: education(),
    };
    tables.occupations = ByEducation {
        high_school: occupation(),
        college: occupation(),
        graduate: occupation(),
    };
    tables.mortality.model = MortalityModel::Fixed { age: 80 };

    let income = IncomeTable::new(vec![IncomeEntry::new("X", 50_000)]).unwrap();
    TableBundle::new(tables, income).unwrap()
}

fn mean_death_age(bundle: &TableBundle, seed: u64, lives: usize) -> f64 {
    let mut rng = seeded(seed);
    let total: u64 = (0..lives)
        .map(|_| generate_life(&mut rng, bundle).unwrap().death_age as u64)
        .sum();
    total as f64 / lives as f64
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property 7: identically seeded sources yield identical lives
    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>()) {
        let bundle = TableBundle::built_in().unwrap();
        let first = generate_life(&mut seeded(seed), &bundle).unwrap();
        let second = generate_life(&mut seeded(seed), &bundle).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property 8: lives are well formed under the built-in tables
    #[test]
    fn prop_life_is_well_formed(seed in any::<u64>()) {
        let bundle = TableBundle::built_in().unwrap();
        let course = &bundle.tables().course;
        let record = generate_life(&mut seeded(seed), &bundle).unwrap();

        prop_assert!(record.death_age >= course.graduation_age);
        prop_assert!(record.death_age <= bundle.tables().mortality.model.age_limit());

        let entry = bundle.income().get(&record.occupation);
        prop_assert!(entry.is_some(), "{} has no income entry", record.occupation);
        prop_assert_eq!(record.income, entry.map(|e| e.median).unwrap_or_default());

        prop_assert_eq!(record.stages.first().map(|s| s.kind), Some(StageKind::Birth));
        prop_assert_eq!(record.stages.last().map(|s| s.kind), Some(StageKind::Death));
        prop_assert!(record.stages.iter().any(|s| s.kind == StageKind::Career));
        prop_assert!(record.stages.windows(2).all(|w| w[0].age <= w[1].age));

        prop_assert!((0..=100).contains(&record.final_health));
        prop_assert!(record.lowest_health <= record.final_health);
        prop_assert!(record.peak_income <= record.lifetime_earnings);
    }

    /// Property 9: a batch of k holds exactly k lives
    #[test]
    fn prop_batch_len_matches_request(count in 1..=MAX_BATCH, seed in any::<u64>()) {
        let bundle = single_path_bundle();
        let lives = generate_batch(&mut seeded(seed), &bundle, count).unwrap();
        prop_assert_eq!(lives.len(), count);
    }

    /// Property 9.2: out-of-range batch sizes are rejected
    #[test]
    fn prop_batch_out_of_range_rejected(count in (MAX_BATCH + 1)..10_000usize) {
        let bundle = single_path_bundle();
        let result = generate_batch(&mut seeded(0), &bundle, count);
        prop_assert!(matches!(result, Err(LyfSimError::InvalidBatchSize(n)) if n == count));
    }

    /// End-to-end: a single-path bundle always yields the same shape of life
    #[test]
    fn prop_single_path_life(seed in any::<u64>()) {
        let bundle = single_path_bundle();
        let record = generate_life(&mut seeded(seed), &bundle).unwrap();

        prop_assert_eq!(record.occupation.as_str(), "X");
        prop_assert_eq!(record.income, 50_000);
        prop_assert_eq!(record.death_age, 80);
        prop_assert_eq!(record.location, Location::Suburban);
        prop_assert_eq!(record.education, Education::College);
    }
}

#[test]
fn test_batch_bounds_are_exact() {
    let bundle = single_path_bundle();
    let mut rng = seeded(0);
    assert!(matches!(
        generate_batch(&mut rng, &bundle, 0),
        Err(LyfSimError::InvalidBatchSize(0))
    ));
    assert!(matches!(
        generate_batch(&mut rng, &bundle, 101),
        Err(LyfSimError::InvalidBatchSize(101))
    ));
    assert_eq!(generate_batch(&mut rng, &bundle, 1).unwrap().len(), 1);
}

#[test]
fn test_health_issues_shorten_lives() {
    let mut calm = LifeTables::default();
    calm.events.annual_chance = 0.0;

    let mut sickly = LifeTables::default();
    sickly.events.annual_chance = 0.5;
    sickly.events.pool = ProbabilityTable::new(vec![(LifeEventKind::HealthIssue, 1.0)]).unwrap();

    let income = || IncomeTable::new(crate::config::income_entries()).unwrap();
    let calm = TableBundle::new(calm, income()).unwrap();
    let sickly = TableBundle::new(sickly, income()).unwrap();

    let calm_mean = mean_death_age(&calm, 0xca1d, 500);
    let sickly_mean = mean_death_age(&sickly, 0xca1d, 500);
    assert!(
        sickly_mean + 5.0 < calm_mean,
        "sickly lives average {:.1}, calm lives {:.1}",
        sickly_mean,
        calm_mean
    );
}
