//! A validated equity question: hero hand, known board, opponent count.

use crate::cards::{binomial, Board, Card, Deck, OmahaHand, Street};
use crate::error::EngineError;

/// Fewest opponents a spot can have.
pub const MIN_OPPONENTS: usize = 1;

/// Most opponents a spot can have (nine players in total).
pub const MAX_OPPONENTS: usize = 8;

/// Hero's hand, the known board and the number of opponents, checked for
/// consistency, plus the undealt deck.
///
/// A `Spot` can only be built through [`Spot::new`], so every instance
/// satisfies: four hole cards, a board of 0/3/4/5 cards, 1-8 opponents, no
/// card repeated, and enough undealt cards to finish the deal.
#[derive(Debug, Clone)]
pub struct Spot {
    hero: OmahaHand,
    board: Board,
    opponents: usize,
    deck: Deck,
}

impl Spot {
    /// Validate and build a spot.
    pub fn new(hero: &[Card], board: &[Card], opponents: usize) -> Result<Self, EngineError> {
        if hero.len() != 4 {
            return Err(EngineError::InvalidRequest(format!(
                "expected exactly 4 hole cards, got {}",
                hero.len()
            )));
        }
        Street::from_board_len(board.len())?;
        if !(MIN_OPPONENTS..=MAX_OPPONENTS).contains(&opponents) {
            return Err(EngineError::InvalidRequest(format!(
                "opponent count must be between {} and {}, got {}",
                MIN_OPPONENTS, MAX_OPPONENTS, opponents
            )));
        }

        let known: Vec<Card> = hero.iter().chain(board).copied().collect();
        let deck = Deck::fresh().remove(&known)?;
        let hero = OmahaHand::from_slice(hero)?;
        let board = Board::from_cards(board.to_vec())?;

        let needed = board.missing() + 4 * opponents;
        if needed > deck.len() {
            return Err(EngineError::InsufficientCards {
                needed,
                available: deck.len(),
            });
        }

        Ok(Self {
            hero,
            board,
            opponents,
            deck,
        })
    }

    /// Parse card codes and build a spot.
    pub fn parse(hero: &str, board: &str, opponents: usize) -> Result<Self, EngineError> {
        let hero = crate::cards::parse_cards(hero)?;
        let board = crate::cards::parse_cards(board)?;
        Self::new(&hero, &board, opponents)
    }

    /// Hero's hole cards.
    pub fn hero(&self) -> &OmahaHand {
        &self.hero
    }

    /// Known board cards.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Cards not held by the hero and not on the board.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current street.
    pub fn street(&self) -> Street {
        self.board.street()
    }

    /// Hero plus opponents.
    pub fn num_contenders(&self) -> usize {
        self.opponents + 1
    }

    /// Number of distinct completions: the runout times every ordered
    /// assignment of opponents' hole cards. Saturates at `u128::MAX`.
    pub fn completions(&self) -> u128 {
        let mut remaining = self.deck.len();
        let mut total = binomial(remaining, self.board.missing());
        remaining -= self.board.missing();
        for _ in 0..self.opponents {
            total = total.saturating_mul(binomial(remaining, 4));
            remaining -= 4;
        }
        total
    }
}
