//! The deck as a value.
//!
//! A `Deck` is never shared or mutated behind the caller's back: removing or
//! drawing cards returns a new deck, so each simulation trial can own its own
//! copy.

use std::fmt;

use rand::Rng;

use super::card::Card;
use crate::error::EngineError;

/// Mask with one bit set for each of the 52 cards.
const FULL_MASK: u64 = (1u64 << 52) - 1;

/// A set of undealt cards.
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    /// Remaining cards in current order.
    cards: Vec<Card>,
    /// Bitmask of remaining cards (for fast membership checks).
    mask: u64,
}

impl Deck {
    /// All 52 cards in standard order.
    pub fn fresh() -> Self {
        Self {
            cards: (0..52).map(Card::from_id).collect(),
            mask: FULL_MASK,
        }
    }

    /// A deck excluding `cards`.
    ///
    /// Every input card must be present in this deck exactly once; a card
    /// that is missing or listed twice fails with `DuplicateCard`.
    pub fn remove(&self, cards: &[Card]) -> Result<Self, EngineError> {
        let mut removed = 0u64;
        for &card in cards {
            if self.mask & card.mask() == 0 || removed & card.mask() != 0 {
                return Err(EngineError::DuplicateCard(card));
            }
            removed |= card.mask();
        }
        Ok(Self {
            cards: self
                .cards
                .iter()
                .copied()
                .filter(|c| removed & c.mask() == 0)
                .collect(),
            mask: self.mask & !removed,
        })
    }

    /// Draw `n` cards uniformly at random without replacement.
    ///
    /// Returns the drawn cards and the reduced deck.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<(Vec<Card>, Deck), EngineError> {
        let mut rest = self.clone();
        let drawn = rest.take_random(n, rng)?;
        Ok((drawn, rest))
    }

    /// In-place draw used by the simulator to avoid rebuilding the deck.
    pub(crate) fn take_random<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, EngineError> {
        if n > self.cards.len() {
            return Err(EngineError::InsufficientCards {
                needed: n,
                available: self.cards.len(),
            });
        }
        // Partial Fisher-Yates over the front `n` slots.
        let len = self.cards.len();
        for i in 0..n {
            let j = rng.gen_range(i..len);
            self.cards.swap(i, j);
        }
        let drawn: Vec<Card> = self.cards.drain(..n).collect();
        for card in &drawn {
            self.mask &= !card.mask();
        }
        Ok(drawn)
    }

    /// Get the number of remaining cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check if a card is still in the deck.
    pub fn contains(&self, card: Card) -> bool {
        self.mask & card.mask() != 0
    }

    /// Get remaining cards as a slice.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::fresh()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fresh_deck() {
        let deck = Deck::fresh();
        assert_eq!(deck.len(), 52);
        let mut ids: Vec<u8> = deck.cards().iter().map(|c| c.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn test_remove() {
        let dead = parse_cards("AsAh").unwrap();
        let deck = Deck::fresh().remove(&dead).unwrap();
        assert_eq!(deck.len(), 50);
        assert!(!deck.contains(dead[0]));
        assert!(!deck.contains(dead[1]));
        assert!(deck.contains("Ad".parse().unwrap()));
    }

    #[test]
    fn test_remove_rejects_duplicates() {
        let dup = parse_cards("AsKdAs").unwrap();
        assert!(matches!(
            Deck::fresh().remove(&dup),
            Err(EngineError::DuplicateCard(c)) if c.to_string() == "As"
        ));

        let deck = Deck::fresh().remove(&parse_cards("Kd").unwrap()).unwrap();
        assert!(matches!(
            deck.remove(&parse_cards("Kd").unwrap()),
            Err(EngineError::DuplicateCard(_))
        ));
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::fresh();
        let (drawn, rest) = deck.draw(10, &mut rng).unwrap();
        assert_eq!(drawn.len(), 10);
        assert_eq!(rest.len(), 42);
        assert_eq!(deck.len(), 52, "source deck is untouched");
        for card in &drawn {
            assert!(!rest.contains(*card));
        }
        let mask = drawn.iter().fold(0u64, |m, c| m | c.mask());
        assert_eq!(mask.count_ones(), 10);
    }

    #[test]
    fn test_draw_insufficient() {
        let mut rng = StdRng::seed_from_u64(7);
        let (_, rest) = Deck::fresh().draw(50, &mut rng).unwrap();
        assert!(matches!(
            rest.draw(3, &mut rng),
            Err(EngineError::InsufficientCards { needed: 3, available: 2 })
        ));
        let (all, empty) = rest.draw(2, &mut rng).unwrap();
        assert_eq!(all.len(), 2);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let deck = Deck::fresh();
        let a = deck.draw(5, &mut StdRng::seed_from_u64(99)).unwrap().0;
        let b = deck.draw(5, &mut StdRng::seed_from_u64(99)).unwrap().0;
        assert_eq!(a, b);
    }
}
