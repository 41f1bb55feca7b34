//! Roulette-Wheel Selection
//!
//! Agents are drawn with probability proportional to fitness. Draws are
//! independent, so the same agent can be picked more than once.

use rand::Rng;

/// Draws `count` population indices by roulette wheel over `scores`.
///
/// Each draw samples a point in `[0, total)` and walks the population in
/// order until the running total passes it. When the total fitness is not
/// positive the wheel is undefined and every draw is uniform instead.
pub fn roulette_select<R: Rng + ?Sized>(scores: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    if scores.is_empty() {
        return Vec::new();
    }

    let total: f64 = scores.iter().map(|&s| s.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        return (0..count).map(|_| rng.gen_range(0..scores.len())).collect();
    }

    // Rounding can leave the last running total a hair under the point
    let fallback = scores.iter().rposition(|&s| s > 0.0).unwrap_or(scores.len() - 1);

    (0..count)
        .map(|_| {
            let point = rng.gen_range(0.0..total);
            let mut running = 0.0;
            scores
                .iter()
                .position(|&score| {
                    running += score.max(0.0);
                    running > point
                })
                .unwrap_or(fallback)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_fit_agent_always_selected() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(roulette_select(&[1.0, 0.0, 0.0, 0.0], 4, &mut rng), vec![0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_zero_fitness_agents_never_selected() {
        let mut rng = SmallRng::seed_from_u64(7);
        let picks = roulette_select(&[0.0, 2.5, 0.0, 1.5], 400, &mut rng);
        assert!(picks.iter().all(|&i| i == 1 || i == 3));
        assert!(picks.contains(&1));
        assert!(picks.contains(&3));
    }

    #[test]
    fn test_zero_total_falls_back_to_uniform() {
        let mut rng = SmallRng::seed_from_u64(9);
        let picks = roulette_select(&[0.0; 5], 200, &mut rng);
        assert_eq!(picks.len(), 200);
        assert!(picks.iter().all(|&i| i < 5));
        // Uniform draws reach more than one agent
        assert!(picks.iter().any(|&i| i != picks[0]));
    }

    #[test]
    fn test_selection_is_deterministic_per_seed() {
        let scores = [3.1, 1.2, 0.4, 2.2, 1.9];
        let a = roulette_select(&scores, 4, &mut SmallRng::seed_from_u64(11));
        let b = roulette_select(&scores, 4, &mut SmallRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_population() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(roulette_select(&[], 4, &mut rng).is_empty());
    }
}
