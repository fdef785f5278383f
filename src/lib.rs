//! Blackjack Policy Evolver
//! Genetic search for a hit/hold table, scored by Monte Carlo play against a fixed dealer.

pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod evolution;
pub mod genome;
pub mod report;

pub use config::EvolutionConfig;
pub use error::{EvolverError, Result};
pub use evolution::{EvolutionEngine, ProgressCallback};
pub use genome::{Action, Genome};
