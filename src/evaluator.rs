//! Concurrent fitness evaluation over contiguous population shards.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::deck::InfiniteDeck;
use crate::engine::BlackjackEngine;
use crate::error::{EvolverError, Result};
use crate::genome::Genome;

/// Contiguous shard ranges covering `0..len`. Every shard but the last holds
/// `len / workers` genomes; the last absorbs the remainder.
pub fn shard_bounds(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = len / workers;
    let mut bounds: Vec<Range<usize>> = (0..workers - 1).map(|i| i * chunk..(i + 1) * chunk).collect();
    bounds.push((workers - 1) * chunk..len);
    bounds
}

/// Per-shard RNG seed
#[inline]
pub fn shard_seed(generation_seed: u64, shard: usize) -> u64 {
    generation_seed ^ shard as u64
}

/// Runs every genome's games on a fixed pool of worker threads
pub struct FitnessEvaluator {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl FitnessEvaluator {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(EvolverError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("fitness-{}", i))
            .build()?;
        Ok(FitnessEvaluator { pool, workers })
    }

    /// Play `games` hands for every genome. Returns once all shards are done.
    pub fn evaluate(&self, population: &mut [Genome], games: u32, generation_seed: u64) -> usize {
        self.run_shards(population, generation_seed, |engine, genome| {
            engine.simulate_batch(genome, games)
        })
    }

    /// Hands each shard to one worker, which visits its genomes in index
    /// order with its own seeded engine. Blocks until every shard reports.
    pub(crate) fn run_shards<F>(&self, population: &mut [Genome], generation_seed: u64, work: F) -> usize
    where
        F: Fn(&mut BlackjackEngine, &mut Genome) + Sync,
    {
        let total = population.len();
        let bounds = shard_bounds(total, self.workers);

        let mut shards = Vec::with_capacity(bounds.len());
        let mut rest = population;
        for range in &bounds {
            let (shard, tail) = rest.split_at_mut(range.len());
            shards.push(shard);
            rest = tail;
        }
        debug_assert!(rest.is_empty());

        let evaluated = AtomicUsize::new(0);
        let finished_shards = AtomicUsize::new(0);
        let work = &work;

        self.pool.scope(|scope| {
            for (index, shard) in shards.into_iter().enumerate() {
                let evaluated = &evaluated;
                let finished_shards = &finished_shards;
                scope.spawn(move |_| {
                    let deck = InfiniteDeck::with_seed(shard_seed(generation_seed, index));
                    let mut engine = BlackjackEngine::with_deck(deck);
                    for genome in shard.iter_mut() {
                        work(&mut engine, genome);
                    }
                    log::trace!("shard {} finished {} genomes", index, shard.len());
                    evaluated.fetch_add(shard.len(), Ordering::Relaxed);
                    finished_shards.fetch_add(1, Ordering::Relaxed);
                });
            }
        });

        let evaluated = evaluated.into_inner();
        debug_assert_eq!(finished_shards.into_inner(), self.workers);
        debug_assert_eq!(evaluated, total, "shards did not cover the population");
        evaluated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{Action, DEALER_UPCARDS, PLAYER_TOTALS};
    use proptest::prelude::*;

    fn population(len: usize) -> Vec<Genome> {
        (0..len)
            .map(|_| Genome::from_table([[Action::Hold; PLAYER_TOTALS]; DEALER_UPCARDS]))
            .collect()
    }

    #[test]
    fn last_shard_absorbs_remainder() {
        assert_eq!(shard_bounds(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(shard_bounds(16, 8).last(), Some(&(14..16)));
    }

    #[test]
    fn more_workers_than_genomes() {
        let bounds = shard_bounds(3, 8);
        assert_eq!(bounds.len(), 8);
        assert!(bounds[..7].iter().all(|r| r.is_empty()));
        assert_eq!(bounds[7], 0..3);
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(matches!(FitnessEvaluator::new(0), Err(EvolverError::Configuration(_))));
    }

    #[test]
    fn every_genome_visited_once() {
        for workers in 1..=9 {
            let evaluator = FitnessEvaluator::new(workers).unwrap();
            for len in [0usize, 1, 7, 8, 23, 64] {
                let mut pop = population(len);
                let evaluated = evaluator.run_shards(&mut pop, 99, |_, genome| genome.generation_score += 1);
                assert_eq!(evaluated, len);
                assert!(pop.iter().all(|g| g.generation_score == 1), "workers {} len {}", workers, len);
            }
        }
    }

    #[test]
    fn same_seed_same_scores() {
        let evaluator = FitnessEvaluator::new(4).unwrap();
        let mut a = population(12);
        let mut b = population(12);
        evaluator.evaluate(&mut a, 50, 1234);
        evaluator.evaluate(&mut b, 50, 1234);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn shards_are_a_disjoint_cover(len in 0usize..5_000, workers in 1usize..64) {
            let bounds = shard_bounds(len, workers);
            prop_assert_eq!(bounds.len(), workers);
            let mut next = 0;
            for range in &bounds {
                prop_assert_eq!(range.start, next);
                next = range.end;
            }
            prop_assert_eq!(next, len);
        }
    }
}
