//! This module defines [RandomGenerator].

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use linejoin_physical::tabular::relation::Value;

/// Source of random values for the experiments
///
/// All randomness is derived from a single seed,
/// such that experiments can be reproduced.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    seed: u64,
    rng: StdRng,
}

impl RandomGenerator {
    /// Create a new [RandomGenerator].
    ///
    /// If no seed is given, one is chosen randomly.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());

        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Return the seed of this generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return a random integer between `lower` and `upper` (inclusive).
    ///
    /// # Panics
    /// Panics if `lower > upper`.
    pub fn random_int(&mut self, lower: Value, upper: Value) -> Value {
        self.rng.gen_range(lower..=upper)
    }

    /// Randomly permute the given slice.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod test {
    use super::RandomGenerator;
    use test_log::test;

    #[test]
    fn same_seed_same_values() {
        let mut first = RandomGenerator::new(Some(7));
        let mut second = RandomGenerator::new(Some(7));

        let first_values = (0..20)
            .map(|_| first.random_int(1, 5000))
            .collect::<Vec<_>>();
        let second_values = (0..20)
            .map(|_| second.random_int(1, 5000))
            .collect::<Vec<_>>();

        assert_eq!(first.seed(), 7);
        assert_eq!(first_values, second_values);
        assert!(first_values.iter().all(|value| (1..=5000).contains(value)));
    }

    #[test]
    fn shuffle_is_permutation() {
        let mut generator = RandomGenerator::new(None);
        let mut values = (0..100).collect::<Vec<i64>>();

        generator.shuffle(&mut values);
        values.sort_unstable();

        assert_eq!(values, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut generator = RandomGenerator::new(Some(1));
        assert_eq!(generator.random_int(3, 3), 3);
    }
}
