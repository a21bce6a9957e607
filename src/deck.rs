use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Errors from deck operations.
///
/// A hand never needs more than 52 cards, so [`DeckError::Empty`] always
/// indicates a sequencing bug in the caller and must be propagated, never
/// swallowed. [`DeckError::NotInDeck`] is an ordinary outcome of scripted
/// deals (the named card was already dealt).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("deal requested from an empty deck")]
    Empty,
    #[error("card {0} is not in the deck")]
    NotInDeck(Card),
}

/// A standard 52-card deck.
///
/// Holds the invariant `remaining() + dealt() == 52` from construction or
/// [`reset`](Deck::reset) until the next reset.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    dealt: usize,
}

impl Deck {
    /// Build a full deck in canonical order (suit-major, Two..Ace).
    ///
    /// ```
    /// use holdem_rs::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.remaining(), 52);
    /// assert_eq!(deck.dealt(), 0);
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &s in &Suit::ALL {
            for &r in &Rank::ALL {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards, dealt: 0 }
    }

    /// Rebuild the full 52-card deck in canonical order.
    pub fn reset(&mut self) {
        *self = Deck::new();
    }

    /// Cards still in the deck.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Cards removed since the last reset.
    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card.
    pub fn deal(&mut self) -> Result<Card, DeckError> {
        let card = self.cards.pop().ok_or(DeckError::Empty)?;
        self.dealt += 1;
        Ok(card)
    }

    /// Remove and return the named card wherever it sits, for scripted and
    /// deterministic test deals.
    pub fn deal_specific(&mut self, rank: Rank, suit: Suit) -> Result<Card, DeckError> {
        let target = Card::new(rank, suit);
        let pos = self
            .cards
            .iter()
            .position(|&c| c == target)
            .ok_or(DeckError::NotInDeck(target))?;
        let card = self.cards.remove(pos);
        self.dealt += 1;
        Ok(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
