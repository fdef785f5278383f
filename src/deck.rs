//! Card source and hand arithmetic for the simulation.
//! Infinite deck: every card is drawn independently, so no shoe state is kept.

/// Lowest and highest card ranks. 1 is an ace, 10 stands for every ten-value card.
pub const ACE: u8 = 1;
pub const TEN: u8 = 10;

/// Longest reachable hand: a player can hold at most twenty cards while the
/// hard total stays below 21, and takes one more before stopping.
pub const MAX_HAND_CARDS: usize = 21;

/// Infinite deck - each card drawn independently and uniformly from 1..=10
#[derive(Clone)]
pub struct InfiniteDeck {
    rng: fastrand::Rng,
}

impl InfiniteDeck {
    /// Deck with a reproducible card sequence
    pub fn with_seed(seed: u64) -> Self {
        InfiniteDeck { rng: fastrand::Rng::with_seed(seed) }
    }

    #[inline]
    pub fn draw(&mut self) -> u8 {
        self.rng.u8(ACE..=TEN)
    }
}

/// Result of hand value calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandValue {
    pub total: u8,
    pub is_soft: bool,
}

/// Calculate the value of a hand.
///
/// Cards are taken highest first. An ace counts 11 when the running total plus
/// the number of cards still to be counted (this one included) stays below 12,
/// otherwise 1. This is a one-pass approximation of soft/hard counting: it does
/// not revisit an ace once later cards are added, so a hit can lower the total.
#[inline]
pub fn hand_value(cards: &[u8]) -> HandValue {
    let mut total: u16 = cards.iter().filter(|&&c| c != ACE).map(|&c| c as u16).sum();
    let aces = cards.iter().filter(|&&c| c == ACE).count() as u16;
    let mut is_soft = false;

    // Aces sort last, so the remaining count for the j-th ace is `aces - j`
    for j in 0..aces {
        if total + (aces - j) < 12 {
            total += 11;
            is_soft = true;
        } else {
            total += 1;
        }
    }

    HandValue {
        total: total.min(u8::MAX as u16) as u8,
        is_soft,
    }
}

/// Sum with every ace counted as 1. Strictly increases with each card drawn.
#[inline]
pub fn hard_total(cards: &[u8]) -> u16 {
    cards.iter().map(|&c| c as u16).sum()
}

/// Fixed-capacity hand, kept on the stack so the hot path never allocates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hand {
    cards: [u8; MAX_HAND_CARDS],
    len: usize,
}

impl Hand {
    #[inline]
    pub fn from_cards(first: u8, second: u8) -> Self {
        let mut cards = [0u8; MAX_HAND_CARDS];
        cards[0] = first;
        cards[1] = second;
        Hand { cards, len: 2 }
    }

    /// Adds a card. A full hand is a contract violation: fatal in debug
    /// builds, the card is dropped in release builds.
    #[inline]
    pub fn push(&mut self, card: u8) {
        debug_assert!(self.len < MAX_HAND_CARDS, "hand exceeded {} cards", MAX_HAND_CARDS);
        if self.len < MAX_HAND_CARDS {
            self.cards[self.len] = card;
            self.len += 1;
        }
    }

    #[inline]
    pub fn first(&self) -> u8 {
        self.cards[0]
    }

    #[inline]
    pub fn cards(&self) -> &[u8] {
        &self.cards[..self.len]
    }

    #[inline]
    pub fn value(&self) -> HandValue {
        hand_value(self.cards())
    }

    #[inline]
    pub fn total(&self) -> u8 {
        self.value().total
    }

    #[inline]
    pub fn hard_total(&self) -> u16 {
        hard_total(self.cards())
    }
}
