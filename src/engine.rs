//! Monte Carlo Blackjack simulation engine.
//! Plays a genome's policy against the fixed dealer policy; no heap allocations in the hot path.

use crate::deck::{Hand, InfiniteDeck};
use crate::genome::{Action, Genome};

/// Dealer hits below this total
pub const DEALER_STANDS_ON: u8 = 17;

/// How a single hand ended, in order of resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    TwentyOne,
    Bust,
    DealerBust,
    Win,
    Push,
    Loss,
}

impl Outcome {
    /// Score change for the evaluating genome
    #[inline(always)]
    pub fn delta(&self) -> i64 {
        match self {
            Outcome::TwentyOne => 4,
            Outcome::Bust => -2,
            Outcome::DealerBust => 1,
            Outcome::Win => 2,
            Outcome::Push => 1,
            Outcome::Loss => -1,
        }
    }

    /// Resolve a hand from the player's final total. `dealer_total` is only
    /// consulted when the player neither busted nor reached 21.
    #[inline]
    pub fn resolve(player_total: u8, dealer_total: impl FnOnce() -> u8) -> Outcome {
        if player_total == 21 {
            return Outcome::TwentyOne;
        }
        if player_total > 21 {
            return Outcome::Bust;
        }
        let dealer_total = dealer_total();
        if dealer_total > 21 {
            Outcome::DealerBust
        } else if player_total > dealer_total {
            Outcome::Win
        } else if player_total == dealer_total {
            Outcome::Push
        } else {
            Outcome::Loss
        }
    }
}

/// Blackjack simulation engine
pub struct BlackjackEngine {
    deck: InfiniteDeck,
}

impl BlackjackEngine {
    #[inline(always)]
    pub fn with_deck(deck: InfiniteDeck) -> Self {
        BlackjackEngine { deck }
    }

    /// Two cards each for player and dealer
    #[inline(always)]
    pub fn deal(&mut self) -> (Hand, Hand) {
        let player = Hand::from_cards(self.deck.draw(), self.deck.draw());
        let dealer = Hand::from_cards(self.deck.draw(), self.deck.draw());
        (player, dealer)
    }

    /// Player follows the genome's table until it holds, busts, or reaches 21.
    #[inline]
    pub fn play_hand(&mut self, hand: &mut Hand, genome: &Genome, dealer_upcard: u8) -> u8 {
        loop {
            let total = hand.total();
            if total >= 21 {
                return total;
            }
            match genome.action(dealer_upcard, total) {
                Action::Hold => return total,
                Action::Hit => hand.push(self.deck.draw()),
            }
        }
    }

    /// Dealer hits below 17, no soft-17 distinction
    #[inline(always)]
    pub fn dealer_play(&mut self, hand: &mut Hand) -> u8 {
        loop {
            let total = hand.total();
            if total >= DEALER_STANDS_ON {
                return total;
            }
            hand.push(self.deck.draw());
        }
    }

    /// Deal and play one full hand with the genome's policy
    #[inline]
    pub fn play_round(&mut self, genome: &Genome) -> Outcome {
        let (mut player, mut dealer) = self.deal();
        let player_total = self.play_hand(&mut player, genome, dealer.first());
        Outcome::resolve(player_total, || self.dealer_play(&mut dealer))
    }

    /// Play `games` hands, accumulating each outcome into the genome's generation score
    #[inline]
    pub fn simulate_batch(&mut self, genome: &mut Genome, games: u32) {
        for _ in 0..games {
            let outcome = self.play_round(genome);
            genome.record(outcome);
        }
    }
}
