//! Card and deck model.
//!
//! ## Modules
//!
//! - `card`: Card, Omaha hand, board and street representations
//! - `deck`: The deck as an immutable value with remove/draw
//! - `combinations`: k-subset enumeration used by exact equity

pub mod card;
pub mod combinations;
pub mod deck;

pub use card::{parse_cards, Board, Card, OmahaHand, Street};
pub use combinations::{binomial, combinations, Combinations};
pub use deck::Deck;
