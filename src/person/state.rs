//! Running state of one simulated life

/// Lowest pay multiplier setbacks can push a career to
pub const MIN_PAY_MULTIPLIER: f64 = 0.5;

const MAX_HEALTH: i32 = 100;

/// Mutable state carried through the yearly ticks of a single life
#[derive(Debug, Clone, PartialEq)]
pub struct LifeState {
    pub age: u32,
    pub health: i32, // 0-100
    /// Scales yearly pay; promotions raise it, setbacks lower it
    pub pay_multiplier: f64,
    /// Pay for the most recent working year
    pub income: u64,
    /// Adverse health events so far
    pub health_events: u32,

    // Extremes and totals
    pub lowest_health: i32,
    pub peak_income: u64,
    pub lifetime_earnings: u64,
}

impl LifeState {
    #[inline]
    pub fn new(start_age: u32, health: i32) -> Self {
        let health = health.clamp(0, MAX_HEALTH);
        Self {
            age: start_age,
            health,
            pay_multiplier: 1.0,
            income: 0,
            health_events: 0,
            lowest_health: health,
            peak_income: 0,
            lifetime_earnings: 0,
        }
    }

    #[inline]
    pub fn advance_year(&mut self) {
        self.age += 1;
    }

    /// Shift health by `delta`, keeping it in [0, 100]
    #[inline]
    pub fn change_health(&mut self, delta: i32) {
        self.health = (self.health + delta).clamp(0, MAX_HEALTH);
        self.lowest_health = self.lowest_health.min(self.health);
    }

    #[inline]
    pub fn record_health_event(&mut self) {
        self.health_events += 1;
    }

    /// Shift the pay multiplier, never below [`MIN_PAY_MULTIPLIER`]
    #[inline]
    pub fn adjust_pay(&mut self, delta: f64) {
        self.pay_multiplier = (self.pay_multiplier + delta).max(MIN_PAY_MULTIPLIER);
    }

    /// Book one year of pay
    #[inline]
    pub fn record_income(&mut self, pay: u64) {
        self.income = pay;
        self.peak_income = self.peak_income.max(pay);
        self.lifetime_earnings = self.lifetime_earnings.saturating_add(pay);
    }

    /// Health has run out
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health <= 0
    }
}
