//! Generational loop: tiered mutation, parallel evaluation, lifetime ranking.

use crate::config::EvolutionConfig;
use crate::error::Result;
use crate::evaluator::FitnessEvaluator;
use crate::genome::Genome;

/// Observer notified after each generation has been ranked
pub trait ProgressCallback {
    fn on_generation_complete(&mut self, generation: usize, population: &[Genome]);
}

impl ProgressCallback for () {
    fn on_generation_complete(&mut self, _generation: usize, _population: &[Genome]) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_complete(&mut self, generation: usize, population: &[Genome]) {
        (**self).on_generation_complete(generation, population)
    }
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
    population: Vec<Genome>,
    rng: fastrand::Rng,
    seed: u64,
}

impl EvolutionEngine {
    /// Validates the config, builds the worker pool and a random population.
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = fastrand::Rng::with_seed(seed);
        let evaluator = FitnessEvaluator::new(config.workers)?;
        let population = (0..config.population_size)
            .map(|_| Genome::random(&mut rng))
            .collect();

        log::info!(
            "population {}, generations {}, games {}, workers {}, seed {}",
            config.population_size,
            config.generations,
            config.games_per_genome,
            config.workers,
            seed
        );

        Ok(Self {
            config,
            evaluator,
            population,
            rng,
            seed,
        })
    }

    /// Master seed in use; pass it back through the config to replay a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// One generation: mutate, evaluate, rank.
    pub fn step(&mut self) {
        let elite = self.config.elite_count().min(self.population.len());
        let (top, rest) = self.population.split_at_mut(elite);
        for genome in top.iter_mut() {
            genome.mutate(self.config.elite_mutation_rate, &mut self.rng);
        }
        for genome in rest.iter_mut() {
            genome.mutate(self.config.mutation_rate, &mut self.rng);
        }

        let generation_seed = self.rng.u64(..);
        let evaluated = self.evaluator.evaluate(
            &mut self.population,
            self.config.games_per_genome,
            generation_seed,
        );
        log::debug!("evaluated {} genomes (seed {})", evaluated, generation_seed);

        // Stable: equal lifetime scores keep their previous order
        self.population
            .sort_by(|a, b| b.lifetime_score.cmp(&a.lifetime_score));
    }

    /// Runs every configured generation and returns the final ranked population.
    pub fn run<C: ProgressCallback>(mut self, mut callback: C) -> Vec<Genome> {
        for generation in 0..self.config.generations {
            self.step();
            callback.on_generation_complete(generation, &self.population);
        }
        self.population
    }
}
