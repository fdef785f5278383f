//! Run parameters and their validation.

use crate::error::{EvolverError, Result};

/// Parameters of one evolution run
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub games_per_genome: u32,
    pub workers: usize,
    /// The first `population_size / elite_divisor` genomes get the elite rate
    pub elite_divisor: usize,
    pub elite_mutation_rate: f32,
    pub mutation_rate: f32,
    /// Master seed. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 2000,
            generations: 10_000,
            games_per_genome: 200,
            workers: 8,
            elite_divisor: 5,
            elite_mutation_rate: 0.01,
            mutation_rate: 0.05,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Number of genomes mutated at the elite rate
    pub fn elite_count(&self) -> usize {
        self.population_size / self.elite_divisor.max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolverError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(EvolverError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }
        if self.elite_divisor == 0 {
            return Err(EvolverError::Configuration(
                "Elite divisor must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("Elite mutation rate", self.elite_mutation_rate),
            ("Mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(EvolverError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        Ok(())
    }
}
