//! Weighted random selection

use rand::Rng;
use smallvec::SmallVec;

#[inline]
fn usable(weight: f64) -> bool {
    weight.is_finite() && weight > 0.0
}

/// Pick an index from `weights` with probability `weight / total`.
///
/// Draws `u` in [0, 1) and walks the cumulative weights until the running
/// sum exceeds `u * total`. Zero, negative and non-finite weights are never
/// picked. Returns `None` when no weight is usable.
#[inline]
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().copied().filter(|w| usable(*w)).sum();
    if total <= 0.0 {
        return None;
    }

    let target = rng.gen::<f64>() * total;
    let mut running = 0.0;
    let mut last_usable = None;

    for (index, weight) in weights.iter().copied().enumerate() {
        if !usable(weight) {
            continue;
        }
        running += weight;
        last_usable = Some(index);
        if running > target {
            return Some(index);
        }
    }

    // Float rounding can leave the target just past the final running sum
    last_usable
}

/// Perform weighted random selection over `(item, weight)` pairs
#[inline]
pub fn weighted_random<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [(T, f64)],
) -> Option<&'a T> {
    let weights: SmallVec<[f64; 8]> = items.iter().map(|(_, w)| *w).collect();
    weighted_index(rng, &weights).map(|index| &items[index].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weighted_random_single() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = vec![("only", 1.0)];
        assert_eq!(weighted_random(&mut rng, &items), Some(&"only"));
    }

    #[test]
    fn test_weighted_random_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items: Vec<(&str, f64)> = vec![];
        assert_eq!(weighted_random(&mut rng, &items), None);
    }

    #[test]
    fn test_all_zero_weights_yield_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(weighted_index(&mut rng, &[0.0, 0.0]), None);
        assert_eq!(weighted_index(&mut rng, &[f64::NAN, -1.0]), None);
    }

    #[test]
    fn test_lowest_draw_skips_leading_zero_weight() {
        // StepRng(0, 0) always yields u = 0.0
        let mut rng = StepRng::new(0, 0);
        assert_eq!(weighted_index(&mut rng, &[0.0, 2.0, 1.0]), Some(1));
    }

    #[test]
    fn test_highest_draw_lands_on_last_usable() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(weighted_index(&mut rng, &[1.0, 1.0, 0.0]), Some(1));
    }

    #[test]
    fn test_weighted_random_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let items = vec![(0usize, 1.0), (1usize, 1.0)];
        let mut counts = [0, 0];

        for _ in 0..1000 {
            if let Some(id) = weighted_random(&mut rng, &items) {
                counts[*id] += 1;
            }
        }

        let ratio = counts[0] as f64 / counts[1] as f64;
        assert!(ratio > 0.6 && ratio < 1.4);
    }
}
