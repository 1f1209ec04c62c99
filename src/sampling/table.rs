//! Weighted categorical distributions over a fixed label set

use crate::error::{LyfSimError, Result};
use crate::sampling::selector::weighted_index;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered set of `(label, weight)` pairs for one decision axis.
///
/// Weights are finite and non-negative with a positive total, so every
/// draw yields a label. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable<T> {
    labels: Vec<T>,
    weights: Vec<f64>,
    total_weight: f64,
}

impl<T> ProbabilityTable<T> {
    /// Build a table, rejecting empty tables, invalid weights and a zero total
    pub fn new(entries: Vec<(T, f64)>) -> Result<Self> {
        let table = Self::builtin(entries);
        table.validate()?;
        Ok(table)
    }

    /// Build a table from trusted built-in data; checked later by [`Self::validate`]
    pub(crate) fn builtin(entries: Vec<(T, f64)>) -> Self {
        let (labels, weights): (Vec<T>, Vec<f64>) = entries.into_iter().unzip();
        let total_weight = weights.iter().sum();
        Self {
            labels,
            weights,
            total_weight,
        }
    }

    /// Check the table invariants
    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(LyfSimError::InvalidTable(
                "probability table has no entries".to_string(),
            ));
        }
        if let Some((position, weight)) = self
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(LyfSimError::InvalidTable(format!(
                "entry {} has invalid weight {}",
                position, weight
            )));
        }
        if self.total_weight <= 0.0 {
            return Err(LyfSimError::InvalidTable(
                "probability table weights sum to zero".to_string(),
            ));
        }
        if !self.total_weight.is_finite() {
            return Err(LyfSimError::InvalidTable(
                "probability table weights overflow when summed".to_string(),
            ));
        }
        Ok(())
    }

    /// Equal weight for every label
    pub fn uniform(labels: Vec<T>) -> Result<Self> {
        Self::new(labels.into_iter().map(|label| (label, 1.0)).collect())
    }

    /// Draw one label
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        // Construction guarantees a positive total, so the index always exists
        let index = weighted_index(rng, &self.weights).unwrap_or(0);
        &self.labels[index]
    }

    pub fn labels(&self) -> impl Iterator<Item = &T> {
        self.labels.iter()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&T, f64)> {
        self.labels.iter().zip(self.weights.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }
}

impl<T: PartialEq> ProbabilityTable<T> {
    /// Selection probability of `label`, summed over duplicate entries
    pub fn probability(&self, label: &T) -> f64 {
        let weight: f64 = self
            .entries()
            .filter(|(candidate, _)| *candidate == label)
            .map(|(_, weight)| weight)
            .sum();
        weight / self.total_weight
    }

    pub fn contains(&self, label: &T) -> bool {
        self.labels.contains(label)
    }
}

impl<T: Serialize> Serialize for ProbabilityTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ProbabilityTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<(T, f64)>::deserialize(deserializer)?;
        ProbabilityTable::new(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rejects_empty_table() {
        let result = ProbabilityTable::<&str>::new(vec![]);
        assert!(matches!(result, Err(LyfSimError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_negative_and_nan_weights() {
        assert!(ProbabilityTable::new(vec![("a", 1.0), ("b", -0.5)]).is_err());
        assert!(ProbabilityTable::new(vec![("a", f64::NAN)]).is_err());
        assert!(ProbabilityTable::new(vec![("a", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_rejects_zero_total() {
        let result = ProbabilityTable::new(vec![("a", 0.0), ("b", 0.0)]);
        assert!(matches!(result, Err(LyfSimError::InvalidTable(_))));
    }

    #[test]
    fn test_rejects_overflowing_total() {
        let result = ProbabilityTable::new(vec![("a", 1e308), ("b", 1e308)]);
        assert!(matches!(result, Err(LyfSimError::InvalidTable(_))));

        let result: std::result::Result<ProbabilityTable<String>, _> =
            serde_json::from_str(r#"[["a", 1e308], ["b", 1e308]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_large_finite_weights_stay_fair() {
        let table = ProbabilityTable::new(vec![("a", 1e307), ("b", 1e307)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let drawn_a = (0..10_000).filter(|_| *table.sample(&mut rng) == "a").count();
        assert!((4_500..=5_500).contains(&drawn_a), "a drawn {} times", drawn_a);
    }

    #[test]
    fn test_probability() {
        let table = ProbabilityTable::new(vec![("a", 1.0), ("b", 3.0)]).unwrap();
        assert!((table.probability(&"a") - 0.25).abs() < 1e-12);
        assert!((table.probability(&"b") - 0.75).abs() < 1e-12);
        assert_eq!(table.probability(&"c"), 0.0);
        assert_eq!(table.total_weight(), 4.0);
    }

    #[test]
    fn test_zero_weight_label_never_drawn() {
        let table = ProbabilityTable::new(vec![("never", 0.0), ("always", 1.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            assert_eq!(*table.sample(&mut rng), "always");
        }
    }

    #[test]
    fn test_deserialize_pairs() {
        let table: ProbabilityTable<String> =
            serde_json::from_str(r#"[["college", 0.35], ["graduate", 0.05]]"#).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains(&"college".to_string()));
    }

    #[test]
    fn test_deserialize_rejects_invalid_weights() {
        let result: std::result::Result<ProbabilityTable<String>, _> =
            serde_json::from_str(r#"[["college", -1.0]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_as_pairs() {
        let table = ProbabilityTable::new(vec![("a".to_string(), 2.0)]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[["a",2.0]]"#);
    }
}
