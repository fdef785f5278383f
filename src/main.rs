//! Blackjack Policy Evolver
//! Evolves a hit/hold table against a dealer who stands on 17.

use blackjack_evolver::report::{best_by_generation, best_by_lifetime, ScoreSheet, StrategyTable};
use blackjack_evolver::{EvolutionConfig, EvolutionEngine, Genome, ProgressCallback, Result};
use clap::Parser;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "blackjack_evolver")]
#[command(about = "Evolve a Blackjack hit/hold policy with a genetic algorithm", long_about = None)]
struct Cli {
    /// Number of genomes per generation
    #[arg(short = 'a', long = "actors", default_value = "2000")]
    population: usize,
    /// Number of generations
    #[arg(short = 'n', long, default_value = "10000")]
    generations: usize,
    /// Number of games per genome per generation
    #[arg(short = 'g', long, default_value = "200")]
    games: u32,
    /// Number of worker threads
    #[arg(short = 'w', long, default_value = "8")]
    workers: usize,
    /// Master seed for a reproducible run
    #[arg(short = 's', long)]
    seed: Option<u64>,
    /// Log progress every N generations (0 disables)
    #[arg(long, default_value = "100")]
    progress_every: usize,
}

/// Logs the leaders every `every` generations
struct LogProgress {
    every: usize,
    started: Instant,
}

impl ProgressCallback for LogProgress {
    fn on_generation_complete(&mut self, generation: usize, population: &[Genome]) {
        if self.every == 0 || (generation + 1) % self.every != 0 {
            return;
        }
        let best = best_by_generation(population).map_or(0, |g| g.generation_score);
        let lifetime = best_by_lifetime(population).map_or(0, |g| g.lifetime_score);
        log::info!(
            "generation {}: best {}, best lifetime {}, elapsed {:.1}s",
            generation + 1,
            best,
            lifetime,
            self.started.elapsed().as_secs_f64()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = EvolutionConfig {
        population_size: cli.population,
        generations: cli.generations,
        games_per_genome: cli.games,
        workers: cli.workers,
        seed: cli.seed,
        ..Default::default()
    };

    println!("============================================================");
    println!("Blackjack Policy Evolver");
    println!("============================================================");
    println!(
        "actors: {}, generations: {}, games: {}, workers: {}",
        config.population_size, config.generations, config.games_per_genome, config.workers
    );

    let start_time = Instant::now();
    let engine = EvolutionEngine::new(config)?;
    let seed = engine.seed();
    let population = engine.run(LogProgress { every: cli.progress_every, started: start_time });
    let elapsed = start_time.elapsed().as_secs_f64();

    println!();
    println!("Evolution complete in {:.1} seconds (seed {})", elapsed, seed);
    println!();
    println!("Final results:");
    print!("{}", ScoreSheet(&population));

    if let Some(best) = best_by_generation(&population) {
        println!();
        println!("best genome - {} - {}", best.generation_score, best.lifetime_score);
        print!("{}", StrategyTable(best));
    }
    if let Some(best) = best_by_lifetime(&population) {
        println!();
        println!("lifetime best genome - {} - {}", best.generation_score, best.lifetime_score);
        print!("{}", StrategyTable(best));
    }

    Ok(())
}
