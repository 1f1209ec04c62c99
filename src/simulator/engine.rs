//! Main simulation engine

use crate::config::{Education, IncomeEntry, MortalityModel, TableBundle};
use crate::error::{LyfSimError, Result};
use crate::event::{apply_event, roll_event};
use crate::person::LifeState;
use log::trace;
use rand::Rng;

use super::{LifeRecord, StageKind, StageOutcome};

/// Smallest batch a single call may request
pub const MIN_BATCH: usize = 1;
/// Largest batch a single call may request
pub const MAX_BATCH: usize = 100;

/// Generates lives from one validated table bundle
#[derive(Debug, Clone, Copy)]
pub struct LifeGenerator<'a> {
    bundle: &'a TableBundle,
}

impl<'a> LifeGenerator<'a> {
    pub fn new(bundle: &'a TableBundle) -> Self {
        Self { bundle }
    }

    /// Run one complete life, birth to death
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LifeRecord> {
        let tables = self.bundle.tables();

        // Birth
        let location = *tables.locations.sample(rng);
        let name = tables.names.get(location).generate(rng);
        let starting_health = tables.health.starting_health(location, rng);

        // Education and career path
        let education = *tables.education.get(location).sample(rng);
        let occupation = tables.occupations.get(education).sample(rng);
        let income = self.bundle.income().lookup(occupation)?;

        let mut state = LifeState::new(tables.course.start_age, starting_health);
        let mut stages = Vec::with_capacity(16);
        stages.push(StageOutcome::new(
            state.age,
            StageKind::Birth,
            format!("Born in {} area with health {}", location, starting_health),
        ));

        loop {
            self.simulate_year(rng, &mut state, education, occupation, income, &mut stages);
            if self.life_ends(rng, &state) {
                break;
            }
        }

        let cause = tables
            .mortality
            .sample_cause(rng, state.health_events)
            .ok_or_else(|| {
                LyfSimError::InvalidTable("cause of death weights sum to zero".to_string())
            })?;
        stages.push(StageOutcome::new(
            state.age,
            StageKind::Death,
            format!("Died at age {} ({})", state.age, cause),
        ));

        trace!(
            "Generated {} ({}, {}, {}), died at {} of {}",
            name,
            location,
            education,
            occupation,
            state.age,
            cause
        );

        Ok(LifeRecord {
            name,
            location,
            education,
            occupation: occupation.clone(),
            income: income.median,
            employment: income.employment,
            starting_health,
            final_health: state.health,
            lowest_health: state.lowest_health,
            health_events: state.health_events,
            final_income: state.income,
            peak_income: state.peak_income,
            lifetime_earnings: state.lifetime_earnings,
            death_age: state.age,
            death_cause: cause,
            stages,
        })
    }

    fn simulate_year<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        state: &mut LifeState,
        education: Education,
        occupation: &str,
        income: &IncomeEntry,
        stages: &mut Vec<StageOutcome>,
    ) {
        let tables = self.bundle.tables();
        let course = &tables.course;

        state.advance_year();
        let age = state.age;

        if age == course.graduation_age {
            stages.push(StageOutcome::new(
                age,
                StageKind::Education,
                format!("Completed {}", education),
            ));
            stages.push(StageOutcome::new(
                age,
                StageKind::Career,
                format!("Started career as {}", occupation),
            ));
        }

        if age >= course.graduation_age {
            let pay = self.yearly_pay(rng, income, age, state.pay_multiplier);
            state.record_income(pay);
        }

        let health = &tables.health;
        if age > health.decline_onset_age {
            let decline = rng.gen_range(0..=health.max_annual_decline);
            state.change_health(-decline);
        }

        if let Some(kind) = roll_event(rng, &tables.events) {
            let outcome = apply_event(rng, state, &tables.events, kind);
            stages.push(StageOutcome::new(
                age,
                StageKind::Event(kind),
                outcome.narrative(),
            ));
        }
    }

    /// Pay for one year: uniform in the experience-scaled range, then scaled
    /// by the running pay multiplier
    fn yearly_pay<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        income: &IncomeEntry,
        age: u32,
        pay_multiplier: f64,
    ) -> u64 {
        let experience = self.bundle.tables().course.experience_multiplier(age);
        let low = (income.min as f64 * experience) as u64;
        let high = (income.max as f64 * experience) as u64;
        let base = if low < high {
            rng.gen_range(low..=high)
        } else {
            low
        };
        (base as f64 * pay_multiplier).round() as u64
    }

    fn life_ends<R: Rng + ?Sized>(&self, rng: &mut R, state: &LifeState) -> bool {
        let tables = self.bundle.tables();
        let model = &tables.mortality.model;

        if let MortalityModel::Fixed { age } = model {
            return state.age >= *age;
        }
        // Careers always start before mortality applies
        if state.age < tables.course.graduation_age {
            return false;
        }
        if state.is_depleted() || state.age >= model.age_limit() {
            return true;
        }
        model
            .yearly_hazard(state.age, state.health)
            .is_some_and(|hazard| rng.gen::<f64>() < hazard)
    }
}

/// Generate one life from `tables`
pub fn generate_life<R: Rng + ?Sized>(rng: &mut R, tables: &TableBundle) -> Result<LifeRecord> {
    LifeGenerator::new(tables).generate(rng)
}

/// Generate `count` lives in sequence from the same random source.
///
/// `count` must lie in `MIN_BATCH..=MAX_BATCH`; anything else is rejected
/// before a single draw is made.
pub fn generate_batch<R: Rng + ?Sized>(
    rng: &mut R,
    tables: &TableBundle,
    count: usize,
) -> Result<Vec<LifeRecord>> {
    if !(MIN_BATCH..=MAX_BATCH).contains(&count) {
        return Err(LyfSimError::InvalidBatchSize(count));
    }
    let generator = LifeGenerator::new(tables);
    (0..count).map(|_| generator.generate(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{income_entries, IncomeTable, LifeEventKind, LifeTables};
    use crate::rng::seeded;
    use crate::sampling::ProbabilityTable;

    fn fixed_bundle(death_age: u32) -> TableBundle {
        let mut tables = LifeTables::default();
        tables.mortality.model = MortalityModel::Fixed { age: death_age };
        TableBundle::new(
            tables,
            IncomeTable::new(income_entries()).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_life_has_milestones_in_order() {
        let bundle = TableBundle::built_in().unwrap();
        let mut rng = seeded(42);
        let record = generate_life(&mut rng, &bundle).unwrap();

        assert_eq!(record.stages.first().unwrap().kind, StageKind::Birth);
        assert_eq!(record.stages.last().unwrap().kind, StageKind::Death);
        assert!(record
            .stages
            .iter()
            .any(|stage| stage.kind == StageKind::Career && stage.age == 22));
        assert!(record.stages.windows(2).all(|w| w[0].age <= w[1].age));
    }

    #[test]
    fn test_fixed_lifespan() {
        let bundle = fixed_bundle(80);
        let mut rng = seeded(7);
        for _ in 0..20 {
            let record = generate_life(&mut rng, &bundle).unwrap();
            assert_eq!(record.death_age, 80);
            assert!(record.lifetime_earnings >= record.peak_income);
            assert!(record.peak_income >= record.final_income);
        }
    }

    #[test]
    fn test_income_is_occupation_median() {
        let bundle = TableBundle::built_in().unwrap();
        let mut rng = seeded(3);
        for _ in 0..50 {
            let record = generate_life(&mut rng, &bundle).unwrap();
            let entry = bundle.income().get(&record.occupation).unwrap();
            assert_eq!(record.income, entry.median);
            assert_eq!(record.employment, entry.employment);
        }
    }

    #[test]
    fn test_quiet_life_has_no_events() {
        let mut tables = LifeTables::default();
        tables.events.annual_chance = 0.0;
        let bundle = TableBundle::new(tables, IncomeTable::new(income_entries()).unwrap()).unwrap();
        let mut rng = seeded(5);

        for _ in 0..20 {
            let record = generate_life(&mut rng, &bundle).unwrap();
            assert_eq!(record.major_events().count(), 0);
            assert_eq!(record.health_events, 0);
            // Milestones only: birth, education, career, death
            assert_eq!(record.stages.len(), 4);
            assert!((22..=95).contains(&record.death_age));
        }
    }

    #[test]
    fn test_batch_size_bounds() {
        let bundle = TableBundle::built_in().unwrap();
        let mut rng = seeded(1);

        assert!(matches!(
            generate_batch(&mut rng, &bundle, 0),
            Err(LyfSimError::InvalidBatchSize(0))
        ));
        assert!(matches!(
            generate_batch(&mut rng, &bundle, 101),
            Err(LyfSimError::InvalidBatchSize(101))
        ));
        assert_eq!(generate_batch(&mut rng, &bundle, 1).unwrap().len(), 1);
        assert_eq!(generate_batch(&mut rng, &bundle, 100).unwrap().len(), 100);
    }

    #[test]
    fn test_rejected_batch_draws_nothing() {
        let bundle = TableBundle::built_in().unwrap();
        let mut used = seeded(9);
        let mut fresh = seeded(9);

        assert!(generate_batch(&mut used, &bundle, 0).is_err());
        assert_eq!(
            generate_life(&mut used, &bundle).unwrap(),
            generate_life(&mut fresh, &bundle).unwrap()
        );
    }

    #[test]
    fn test_health_issues_wear_down_health() {
        let mut tables = LifeTables::default();
        tables.events.annual_chance = 1.0;
        tables.events.pool =
            ProbabilityTable::new(vec![(LifeEventKind::HealthIssue, 1.0)]).unwrap();
        let bundle = TableBundle::new(
            tables,
            IncomeTable::new(income_entries()).unwrap(),
        )
        .unwrap();

        let mut rng = seeded(11);
        let record = generate_life(&mut rng, &bundle).unwrap();
        assert!(record.health_events >= 1);
        assert_eq!(record.major_events().count() as u32, record.health_events);
        assert!(record.lowest_health < record.starting_health);
    }
}
