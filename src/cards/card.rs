//! Card representation for Omaha.
//!
//! This module provides the fundamental card types used by the engine:
//! - `Card`: A single playing card with rank and suit
//! - `OmahaHand`: A contender's four private cards
//! - `Board`: Community cards (0, 3, 4 or 5 cards)
//! - `Street`: The betting round implied by the board size
//!
//! Card codes are a rank symbol (`2`-`9`, `10` or `T`, `J`, `Q`, `K`, `A`)
//! followed by a suit letter (`c`, `d`, `h`, `s`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Rank of a two. Ranks run 2-14 (2-A).
pub const RANK_2: u8 = 2;
/// Rank of a three.
pub const RANK_3: u8 = 3;
/// Rank of a four.
pub const RANK_4: u8 = 4;
/// Rank of a five.
pub const RANK_5: u8 = 5;
/// Rank of a six.
pub const RANK_6: u8 = 6;
/// Rank of a seven.
pub const RANK_7: u8 = 7;
/// Rank of an eight.
pub const RANK_8: u8 = 8;
/// Rank of a nine.
pub const RANK_9: u8 = 9;
/// Rank of a ten.
pub const RANK_T: u8 = 10;
/// Rank of a jack.
pub const RANK_J: u8 = 11;
/// Rank of a queen.
pub const RANK_Q: u8 = 12;
/// Rank of a king.
pub const RANK_K: u8 = 13;
/// Rank of an ace.
pub const RANK_A: u8 = 14;

/// Clubs. Suits run 0-3.
pub const SUIT_CLUBS: u8 = 0;
/// Diamonds.
pub const SUIT_DIAMONDS: u8 = 1;
/// Hearts.
pub const SUIT_HEARTS: u8 = 2;
/// Spades.
pub const SUIT_SPADES: u8 = 3;

/// Rank characters for display, indexed by `rank - 2`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    /// Card index 0-51: (rank - 2) * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (2-14) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!((RANK_2..=RANK_A).contains(&rank), "rank must be 2-14");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: (rank - RANK_2) * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (2-14: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4 + RANK_2
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Single-bit mask for this card, for set operations over `u64`.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }

    /// Get rank character for display.
    pub fn rank_char(&self) -> char {
        rank_char(self.rank())
    }

    /// Get suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

/// Display character for a rank in 2-14.
pub fn rank_char(rank: u8) -> char {
    RANK_CHARS[(rank - RANK_2) as usize]
}

fn parse_rank(symbol: &str) -> Option<u8> {
    match symbol.to_ascii_uppercase().as_str() {
        "10" | "T" => Some(RANK_T),
        "J" => Some(RANK_J),
        "Q" => Some(RANK_Q),
        "K" => Some(RANK_K),
        "A" => Some(RANK_A),
        s if s.len() == 1 => {
            let digit = s.chars().next()?.to_digit(10)? as u8;
            (RANK_2..=RANK_9).contains(&digit).then_some(digit)
        }
        _ => None,
    }
}

fn parse_suit(symbol: char) -> Option<u8> {
    let lower = symbol.to_ascii_lowercase();
    SUIT_CHARS.iter().position(|&c| c == lower).map(|s| s as u8)
}

impl FromStr for Card {
    type Err = EngineError;

    /// Parse a card from a code like "As", "Kh", "10d", "Td".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidRequest(format!("invalid card code: {:?}", s));
        let s = s.trim();
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let rank = parse_rank(rank_part).ok_or_else(invalid)?;
        let suit = parse_suit(suit_char).ok_or_else(invalid)?;
        Ok(Self::new(rank, suit))
    }
}

/// Parse a sequence of card codes.
///
/// Codes may be concatenated (`"AhAdKsKd"`, `"10h9h8h"`) or separated by
/// whitespace or commas (`"Ah Ad, Ks Kd"`). Duplicates are not rejected here;
/// that is the deck's job.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EngineError> {
    let mut cards = Vec::new();
    let chars: Vec<char> = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let mut i = 0;
    while i < chars.len() {
        let len = if chars[i] == '1' && chars.get(i + 1) == Some(&'0') { 3 } else { 2 };
        if i + len > chars.len() {
            let rest: String = chars[i..].iter().collect();
            return Err(EngineError::InvalidRequest(format!("invalid card code: {:?}", rest)));
        }
        let code: String = chars[i..i + len].iter().collect();
        cards.push(code.parse()?);
        i += len;
    }
    Ok(cards)
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Card {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// A contender's four Omaha hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct OmahaHand {
    cards: [Card; 4],
}

impl OmahaHand {
    /// Create a hand from four cards, rejecting a card repeated within the hand.
    pub fn new(cards: [Card; 4]) -> Result<Self, EngineError> {
        let mut seen = 0u64;
        for card in cards {
            if seen & card.mask() != 0 {
                return Err(EngineError::DuplicateCard(card));
            }
            seen |= card.mask();
        }
        Ok(Self { cards })
    }

    /// Hand from cards already known to be distinct (dealt from one deck).
    #[inline]
    pub(crate) fn from_distinct(cards: [Card; 4]) -> Self {
        debug_assert!(Self::new(cards).is_ok());
        Self { cards }
    }

    /// Build a hand from a slice, which must hold exactly four cards.
    pub fn from_slice(cards: &[Card]) -> Result<Self, EngineError> {
        let cards: [Card; 4] = cards.try_into().map_err(|_| {
            EngineError::InvalidRequest(format!(
                "expected exactly 4 hole cards, got {}",
                cards.len()
            ))
        })?;
        Self::new(cards)
    }

    /// Get the four cards.
    #[inline]
    pub fn cards(&self) -> &[Card; 4] {
        &self.cards
    }

    /// Bitmask of the four cards.
    pub fn mask(&self) -> u64 {
        self.cards.iter().fold(0, |m, c| m | c.mask())
    }

    /// Check if a card is part of this hand.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl FromStr for OmahaHand {
    type Err = EngineError;

    /// Parse a hand from a string like "AhAdKsKd" or "Ah Ad Ks Kd".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

impl fmt::Display for OmahaHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for OmahaHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(5) }
    }

    /// Create a board from cards. The count must be 0, 3, 4 or 5.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, EngineError> {
        Street::from_board_len(cards.len())?;
        Ok(Self { cards })
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards still to come before the river.
    pub fn missing(&self) -> usize {
        5 - self.cards.len()
    }

    /// Bitmask of the board cards.
    pub fn mask(&self) -> u64 {
        self.cards.iter().fold(0, |m, c| m | c.mask())
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Current street. A board is only ever built at a valid size.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// Append a runout to produce the complete five-card board.
    ///
    /// `runout` must contain exactly `self.missing()` cards.
    pub fn complete(&self, runout: &[Card]) -> [Card; 5] {
        debug_assert_eq!(self.cards.len() + runout.len(), 5);
        let mut full = [Card::from_id(0); 5];
        for (slot, &card) in full.iter_mut().zip(self.cards.iter().chain(runout)) {
            *slot = card;
        }
        full
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse a board from string like "AhKsQd".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cards(parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Street in a poker hand, implied by the number of board cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    /// No board cards.
    Preflop,
    /// Three board cards.
    Flop,
    /// Four board cards.
    Turn,
    /// Five board cards.
    River,
}

impl Street {
    /// Street for a board of the given size.
    pub fn from_board_len(len: usize) -> Result<Self, EngineError> {
        match len {
            0 => Ok(Street::Preflop),
            3 => Ok(Street::Flop),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            n => Err(EngineError::InvalidRequest(format!(
                "board must have 0, 3, 4 or 5 cards, got {}",
                n
            ))),
        }
    }

    /// Number of board cards for this street.
    pub fn num_board_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}
