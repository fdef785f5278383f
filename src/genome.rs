//! Candidate policy: a hit/hold table plus its fitness counters.

use crate::engine::Outcome;

/// Dealer upcards ace..10
pub const DEALER_UPCARDS: usize = 10;
/// Player totals 1..=42. Only 4..=20 are consulted by the heuristic totals;
/// the upper half is room for soft totals.
pub const PLAYER_TOTALS: usize = 42;

/// Possible player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hold,
    Hit,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Hold, Action::Hit];

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Hold => "HOLD",
            Action::Hit => "HIT",
        }
    }

    /// Uniform draw over all actions
    #[inline]
    pub fn random(rng: &mut fastrand::Rng) -> Action {
        Action::ALL[rng.usize(..Action::ALL.len())]
    }
}

pub type PolicyTable = [[Action; PLAYER_TOTALS]; DEALER_UPCARDS];

/// Maps a (dealer upcard, player total) pair to a table cell.
///
/// Out-of-range inputs are a contract violation: they panic in debug builds
/// and clamp to the nearest cell in release builds.
#[inline]
pub fn table_index(upcard: u8, total: u8) -> (usize, usize) {
    debug_assert!(
        (1..=DEALER_UPCARDS).contains(&(upcard as usize)),
        "dealer upcard {} outside table",
        upcard
    );
    debug_assert!(
        (1..=PLAYER_TOTALS).contains(&(total as usize)),
        "player total {} outside table",
        total
    );
    let row = (upcard as usize).clamp(1, DEALER_UPCARDS) - 1;
    let col = (total as usize).clamp(1, PLAYER_TOTALS) - 1;
    (row, col)
}

/// One member of the population
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome {
    table: PolicyTable,
    pub generation_score: i64,
    pub lifetime_score: i64,
}

impl Genome {
    /// Genome with a uniformly random table and zeroed scores
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let mut genome = Genome::from_table([[Action::Hold; PLAYER_TOTALS]; DEALER_UPCARDS]);
        genome.initialize(rng);
        genome
    }

    pub fn from_table(table: PolicyTable) -> Self {
        Genome {
            table,
            generation_score: 0,
            lifetime_score: 0,
        }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Redraws every cell uniformly, then settles the scores.
    pub fn initialize(&mut self, rng: &mut fastrand::Rng) {
        for row in self.table.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Action::random(rng);
            }
        }
        self.settle_scores();
    }

    /// Redraws each cell with probability `rate`, then settles the scores.
    pub fn mutate(&mut self, rate: f32, rng: &mut fastrand::Rng) {
        if rate > 0.0 {
            for row in self.table.iter_mut() {
                for cell in row.iter_mut() {
                    if rng.f32() < rate {
                        *cell = Action::random(rng);
                    }
                }
            }
        }
        self.settle_scores();
    }

    #[inline]
    pub fn action(&self, upcard: u8, total: u8) -> Action {
        let (row, col) = table_index(upcard, total);
        self.table[row][col]
    }

    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        self.generation_score += outcome.delta();
    }

    // Last generation's result moves into the lifetime sum before the next
    // generation starts counting.
    fn settle_scores(&mut self) {
        self.lifetime_score += self.generation_score;
        self.generation_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn initialize_keeps_lifetime_at_zero() {
        let mut rng = fastrand::Rng::with_seed(1);
        let genome = Genome::random(&mut rng);
        assert_eq!(genome.generation_score, 0);
        assert_eq!(genome.lifetime_score, 0);
    }

    #[test]
    fn random_table_uses_both_actions() {
        let mut rng = fastrand::Rng::with_seed(3);
        let genome = Genome::random(&mut rng);
        let hits = genome.table().iter().flatten().filter(|&&a| a == Action::Hit).count();
        let cells = DEALER_UPCARDS * PLAYER_TOTALS;
        assert!(hits > cells / 4 && hits < cells * 3 / 4, "hits = {}", hits);
    }

    #[test]
    fn mutate_moves_generation_score_into_lifetime() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut genome = Genome::random(&mut rng);
        genome.generation_score = 17;
        genome.mutate(0.05, &mut rng);
        assert_eq!(genome.generation_score, 0);
        assert_eq!(genome.lifetime_score, 17);

        genome.generation_score = -4;
        genome.mutate(0.05, &mut rng);
        assert_eq!(genome.lifetime_score, 13);
    }

    #[test]
    fn record_applies_outcome_delta() {
        let mut genome = Genome::from_table([[Action::Hold; PLAYER_TOTALS]; DEALER_UPCARDS]);
        genome.record(Outcome::TwentyOne);
        genome.record(Outcome::Bust);
        genome.record(Outcome::Loss);
        assert_eq!(genome.generation_score, 1);
    }

    #[test]
    fn lookup_uses_upcard_row_and_total_column() {
        let mut table = [[Action::Hold; PLAYER_TOTALS]; DEALER_UPCARDS];
        table[6][11] = Action::Hit;
        let genome = Genome::from_table(table);
        assert_eq!(genome.action(7, 12), Action::Hit);
        assert_eq!(genome.action(7, 13), Action::Hold);
        assert_eq!(genome.action(6, 12), Action::Hold);
    }

    #[test]
    fn table_index_covers_corners() {
        assert_eq!(table_index(1, 1), (0, 0));
        assert_eq!(table_index(10, 42), (9, 41));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn table_index_rejects_out_of_range_total_in_debug() {
        table_index(5, 43);
    }

    proptest! {
        #[test]
        fn mutate_zero_leaves_table_untouched(seed in any::<u64>()) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut genome = Genome::random(&mut rng);
            let before = *genome.table();
            genome.mutate(0.0, &mut rng);
            prop_assert_eq!(&before, genome.table());
        }

        #[test]
        fn mutate_one_resamples_roughly_half(seed in any::<u64>()) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut genome = Genome::random(&mut rng);
            let before = *genome.table();
            genome.mutate(1.0, &mut rng);
            let changed = before
                .iter()
                .flatten()
                .zip(genome.table().iter().flatten())
                .filter(|(a, b)| a != b)
                .count();
            // 420 cells, each changes with probability 1/2
            prop_assert!(changed > 120 && changed < 300, "changed = {}", changed);
        }

        #[test]
        fn mutate_preserves_score_sum(seed in any::<u64>(), rate in 0.0f32..=1.0, score in -10_000i64..10_000) {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut genome = Genome::random(&mut rng);
            genome.lifetime_score = 250;
            genome.generation_score = score;
            genome.mutate(rate, &mut rng);
            prop_assert_eq!(genome.generation_score, 0);
            prop_assert_eq!(genome.lifetime_score, 250 + score);
        }
    }
}
