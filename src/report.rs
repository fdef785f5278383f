//! Final-population summaries: best genomes, score dump, strategy tables.

use std::fmt;

use crate::genome::{Genome, DEALER_UPCARDS};

/// Player totals shown in a strategy table
pub const REPORT_TOTALS: std::ops::RangeInclusive<u8> = 4..=21;

/// Genome with the highest score from the last generation played.
/// Ties go to the earliest genome.
pub fn best_by_generation(population: &[Genome]) -> Option<&Genome> {
    first_max_by_key(population, |g| g.generation_score)
}

/// Genome with the highest accumulated score. Ties go to the earliest genome.
pub fn best_by_lifetime(population: &[Genome]) -> Option<&Genome> {
    first_max_by_key(population, |g| g.lifetime_score)
}

// `Iterator::max_by_key` keeps the last maximum; the report wants the first.
fn first_max_by_key(population: &[Genome], key: impl Fn(&Genome) -> i64) -> Option<&Genome> {
    population.iter().fold(None, |best, genome| match best {
        Some(b) if key(b) >= key(genome) => Some(b),
        _ => Some(genome),
    })
}

/// Dealer upcard column label
fn upcard_label(upcard: u8) -> String {
    if upcard == 1 { "A".to_string() } else { upcard.to_string() }
}

/// Strategy table: dealer upcards as columns, player totals 4..=21 as rows
pub struct StrategyTable<'a>(pub &'a Genome);

impl fmt::Display for StrategyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dealer:")?;
        for upcard in 1..=DEALER_UPCARDS as u8 {
            write!(f, " {:>4}", upcard_label(upcard))?;
        }
        writeln!(f)?;
        for total in REPORT_TOTALS {
            write!(f, "    {:>2}:", total)?;
            for upcard in 1..=DEALER_UPCARDS as u8 {
                write!(f, " {:>4}", self.0.action(upcard, total).name())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One line per genome: generation score, lifetime score
pub struct ScoreSheet<'a>(pub &'a [Genome]);

impl fmt::Display for ScoreSheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for genome in self.0 {
            writeln!(f, "genome - {} - {}", genome.generation_score, genome.lifetime_score)?;
        }
        Ok(())
    }
}
