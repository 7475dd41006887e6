//! Poker hand evaluation.
//!
//! This module ranks 5-card poker hands and finds the best Omaha hand under
//! the "exactly two hole cards, exactly three board cards" rule. Hands are
//! compared by category first, then lexicographically by a tiebreak key of
//! descending ranks.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::card::rank_char;
use crate::cards::{combinations, Card, OmahaHand};

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair = 1,
    /// Two pairs.
    TwoPair = 2,
    /// Trips.
    ThreeOfAKind = 3,
    /// Five consecutive ranks.
    Straight = 4,
    /// Five cards of one suit.
    Flush = 5,
    /// Trips plus a pair.
    FullHouse = 6,
    /// Quads.
    FourOfAKind = 7,
    /// Straight in one suit.
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value of a specific five-card combination.
///
/// Field order matters: the derived `Ord` compares `category` first and then
/// `key` lexicographically. Unused trailing key slots are 0. In a wheel the
/// ace is stored as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluatedHand {
    /// Hand category.
    pub category: HandCategory,
    /// Relevant ranks, most significant first.
    pub key: [u8; 5],
}

impl EvaluatedHand {
    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Get the tiebreak key.
    pub fn key(&self) -> &[u8; 5] {
        &self.key
    }

    /// Compare two evaluated hands. Greater is stronger.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category)?;
        let ranks: Vec<String> = self
            .key
            .iter()
            .filter(|&&r| r != 0)
            .map(|&r| if r == 1 { 'A' } else { rank_char(r) }.to_string())
            .collect();
        write!(f, "{})", ranks.join(" "))
    }
}

/// Rank bits of the wheel: A, 2, 3, 4, 5.
const WHEEL_BITS: u16 = (1 << 14) | (1 << 5) | (1 << 4) | (1 << 3) | (1 << 2);

/// The six ways to pick two of four hole cards.
const HOLE_PAIRS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// The ten ways to pick three of five board cards.
const BOARD_TRIPLES: [[usize; 3]; 10] = [
    [0, 1, 2],
    [0, 1, 3],
    [0, 1, 4],
    [0, 2, 3],
    [0, 2, 4],
    [0, 3, 4],
    [1, 2, 3],
    [1, 2, 4],
    [1, 3, 4],
    [2, 3, 4],
];

/// Evaluate a 5-card hand.
///
/// Pure and total over any five distinct cards, and independent of their
/// order.
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    // Build rank counts and a bitmask of ranks present (bit r for rank r).
    let mut rank_counts = [0u8; 15];
    let mut rank_bits = 0u16;
    let first_suit = cards[0].suit();
    let mut is_flush = true;

    for card in cards {
        rank_counts[card.rank() as usize] += 1;
        rank_bits |= 1 << card.rank();
        is_flush &= card.suit() == first_suit;
    }

    if let Some(high) = find_straight(rank_bits) {
        let key = straight_key(high);
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return EvaluatedHand { category, key };
    }

    // Rank groups ordered by multiplicity, then by rank, both descending.
    let mut groups = [(0u8, 0u8); 5];
    let mut num_groups = 0;
    for rank in (2..=14u8).rev() {
        let count = rank_counts[rank as usize];
        if count > 0 {
            groups[num_groups] = (count, rank);
            num_groups += 1;
        }
    }
    // Stable, so equal multiplicities keep descending rank order.
    groups[..num_groups].sort_by(|a, b| b.0.cmp(&a.0));

    let mut key = [0u8; 5];
    for (slot, &(_, rank)) in key.iter_mut().zip(&groups[..num_groups]) {
        *slot = rank;
    }

    let category = match (groups[0].0, groups[1].0) {
        (4, _) => HandCategory::FourOfAKind,
        (3, 2) => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    EvaluatedHand { category, key }
}

/// Find the high card of a straight from a rank bitmask of five cards.
fn find_straight(rank_bits: u16) -> Option<u8> {
    if rank_bits.count_ones() != 5 {
        return None;
    }
    // The wheel is matched explicitly: the ace plays low only here.
    if rank_bits == WHEEL_BITS {
        return Some(5);
    }
    let low = rank_bits.trailing_zeros() as u8;
    if rank_bits == 0b11111 << low {
        Some(low + 4)
    } else {
        None
    }
}

/// Tiebreak key of a straight with the given high card.
fn straight_key(high: u8) -> [u8; 5] {
    [high, high - 1, high - 2, high - 3, high - 4]
}

/// Evaluate the best Omaha hand: exactly two hole cards with exactly three
/// board cards, maximised over all 60 combinations.
pub fn evaluate_omaha(hole: &OmahaHand, board: &[Card; 5]) -> EvaluatedHand {
    let hole = hole.cards();
    let mut best: Option<EvaluatedHand> = None;

    for [h1, h2] in HOLE_PAIRS {
        for [b1, b2, b3] in BOARD_TRIPLES {
            let hand = [hole[h1], hole[h2], board[b1], board[b2], board[b3]];
            let rank = evaluate_five(&hand);
            if best.map_or(true, |b| rank > b) {
                best = Some(rank);
            }
        }
    }

    // HOLE_PAIRS and BOARD_TRIPLES are non-empty, so the loop always ran.
    best.unwrap_or(EvaluatedHand {
        category: HandCategory::HighCard,
        key: [0; 5],
    })
}

/// Best five-card hand from any subset of `cards`, ignoring Omaha's rule.
///
/// Returns `None` for fewer than five cards.
pub fn evaluate_best(cards: &[Card]) -> Option<EvaluatedHand> {
    combinations(cards.len(), 5)
        .map(|idx| {
            evaluate_five(&[
                cards[idx[0]],
                cards[idx[1]],
                cards[idx[2]],
                cards[idx[3]],
                cards[idx[4]],
            ])
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::cards::Deck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn five(s: &str) -> [Card; 5] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1], cards[2], cards[3], cards[4]]
    }

    fn eval(s: &str) -> EvaluatedHand {
        evaluate_five(&five(s))
    }

    fn omaha(hole: &str, board: &str) -> EvaluatedHand {
        evaluate_omaha(&hole.parse().unwrap(), &five(board))
    }

    fn permutations(cards: [Card; 5]) -> Vec<[Card; 5]> {
        let mut out = Vec::new();
        for a in 0..5 {
            for b in 0..5 {
                for c in 0..5 {
                    for d in 0..5 {
                        for e in 0..5 {
                            let idx = [a, b, c, d, e];
                            let mut seen = [false; 5];
                            if idx.iter().all(|&i| !std::mem::replace(&mut seen[i], true)) {
                                out.push(idx.map(|i| cards[i]));
                            }
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_categories() {
        assert_eq!(eval("As Kd Qh Jc 9s").category(), HandCategory::HighCard);
        assert_eq!(eval("As Ad Kh Qc Js").category(), HandCategory::OnePair);
        assert_eq!(eval("As Ad Kh Kc Js").category(), HandCategory::TwoPair);
        assert_eq!(eval("As Ad Ah Kc Js").category(), HandCategory::ThreeOfAKind);
        assert_eq!(eval("Ts 9d 8h 7c 6s").category(), HandCategory::Straight);
        assert_eq!(eval("As Kd Qh Jc 10s").category(), HandCategory::Straight);
        assert_eq!(eval("As Ks 9s 7s 2s").category(), HandCategory::Flush);
        assert_eq!(eval("As Ad Ah Kc Kd").category(), HandCategory::FullHouse);
        assert_eq!(eval("As Ad Ah Ac Ks").category(), HandCategory::FourOfAKind);
        assert_eq!(eval("9s 8s 7s 6s 5s").category(), HandCategory::StraightFlush);
        assert_eq!(eval("As Ks Qs Js Ts").category(), HandCategory::StraightFlush);
    }

    #[test]
    fn test_category_ordering() {
        let ladder = [
            "As Kd Qh Jc 9s",
            "2s 2d 3h 4c 5d",
            "2s 2d 3h 3c 4s",
            "2s 2d 2h 3c 4s",
            "As 2d 3h 4c 5s",
            "2s 3s 4s 5s 7s",
            "2s 2d 2h 3c 3s",
            "2s 2d 2h 2c 3s",
            "As 2s 3s 4s 5s",
        ];
        for pair in ladder.windows(2) {
            assert!(eval(pair[0]) < eval(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_tiebreak_keys() {
        assert_eq!(eval("Ks Kd 4h 4c Js").key(), &[13, 4, 11, 0, 0]);
        assert_eq!(eval("3s 3d 3h Ac Ad").key(), &[3, 14, 0, 0, 0]);
        assert_eq!(eval("9s 9d Ah 4c 7s").key(), &[9, 14, 7, 4, 0]);
        assert_eq!(eval("2h 9h Kh 4h 7h").key(), &[13, 9, 7, 4, 2]);

        // Kickers decide within a category.
        assert!(eval("As Ad Kh Qc Js") > eval("Ah Ac Kd Qs Ts"));
        assert!(eval("Ks Kd 4h 4c Js") > eval("Kh Kc 4s 4d Ts"));
        assert!(eval("Qs Qd Qh 2c 2d") < eval("Ks Kd Kh 2s 2h"));
        assert_eq!(eval("As Kd Qh Jc 9s"), eval("Ad Kh Qc Js 9h"));
    }

    #[test]
    fn test_wheel() {
        let wheel = eval("Ah 2c 3d 4s 5h");
        assert_eq!(wheel.category(), HandCategory::Straight);
        assert_eq!(wheel.key(), &[5, 4, 3, 2, 1]);

        let six_high = eval("2c 3d 4s 5h 6c");
        assert_eq!(six_high.key(), &[6, 5, 4, 3, 2]);
        assert!(wheel < six_high);

        let best_trips = eval("Ah Ac Ad Ks Qh");
        assert!(wheel > best_trips);

        let steel_wheel = eval("As 2s 3s 4s 5s");
        assert_eq!(steel_wheel.category(), HandCategory::StraightFlush);
        assert!(steel_wheel < eval("2s 3s 4s 5s 6s"));

        // Ace-high with no wrap-around.
        assert_eq!(eval("Qh Kc Ad 2s 3h").category(), HandCategory::HighCard);
    }

    #[test]
    fn test_permutation_invariance() {
        let hands = [
            "As Kd Qh Jc 9s",
            "Ah 2c 3d 4s 5h",
            "As Ad Kh Kc Js",
            "2h 9h Kh 4h 7h",
            "3s 3d 3h Ac Ad",
            "9s 8s 7s 6s 5s",
        ];
        for hand in hands {
            let cards = five(hand);
            let expected = evaluate_five(&cards);
            let perms = permutations(cards);
            assert_eq!(perms.len(), 120);
            for perm in perms {
                assert_eq!(evaluate_five(&perm), expected, "{:?}", perm);
            }
        }
    }

    #[test]
    fn test_permutation_invariance_random() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (drawn, _) = Deck::fresh().draw(5, &mut rng).unwrap();
            let cards = [drawn[0], drawn[1], drawn[2], drawn[3], drawn[4]];
            let expected = evaluate_five(&cards);
            let mut reversed = cards;
            reversed.reverse();
            assert_eq!(evaluate_five(&reversed), expected);
            let rotated = [cards[2], cards[4], cards[0], cards[3], cards[1]];
            assert_eq!(evaluate_five(&rotated), expected);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(eval("As Ks 9s 7s 2s").to_string(), "Flush (A K 9 7 2)");
        assert_eq!(eval("Ah 2c 3d 4s 5h").to_string(), "Straight (5 4 3 2 A)");
        assert_eq!(eval("Ks Kd 4h 4c Js").to_string(), "Two Pair (K 4 J)");
    }

    #[test]
    fn test_omaha_cannot_use_four_hole_cards() {
        // Royal flush would need all four hole hearts.
        let hole = "AhKhQhJh";
        let board = "Th 2c 3d 4s 9h";
        let mut all = parse_cards(hole).unwrap();
        all.extend(parse_cards(board).unwrap());

        let unconstrained = evaluate_best(&all).unwrap();
        assert_eq!(unconstrained.category(), HandCategory::StraightFlush);

        let best = omaha(hole, board);
        assert!(best < unconstrained);
        assert!(best.category() < HandCategory::Straight);
    }

    #[test]
    fn test_omaha_cannot_play_the_board() {
        // Quads on board; Omaha may only use three of them.
        let best = omaha("3h4h5d6d", "Kc Kd Kh Ks 2c");
        assert_eq!(best.category(), HandCategory::ThreeOfAKind);
        assert_eq!(best.key(), &[13, 6, 5, 0, 0]);

        // Full house on board, no pair in hand.
        let best = omaha("AsQs3c4d", "Kc Kd Kh 2c 2d");
        assert_eq!(best.category(), HandCategory::ThreeOfAKind);
        assert_eq!(best.key(), &[13, 14, 12, 0, 0]);
    }

    #[test]
    fn test_omaha_needs_two_suited_hole_cards() {
        // Four spades on board plus one in hand is no flush in Omaha, and the
        // 6-high straight would need three hole cards. Only the wheel remains.
        let hole = "Js4h5h6h";
        let board = "As Ks Qs 2s 3d";
        let mut all = parse_cards(hole).unwrap();
        all.extend(parse_cards(board).unwrap());

        let unconstrained = evaluate_best(&all).unwrap();
        assert_eq!(unconstrained.category(), HandCategory::Flush);

        let best = omaha(hole, board);
        assert_eq!(best.category(), HandCategory::Straight);
        assert_eq!(best.key(), &[5, 4, 3, 2, 1]);
        assert!(best < unconstrained);
    }

    #[test]
    fn test_omaha_uses_two_hole_and_three_board() {
        assert_eq!(omaha("AhKh2c3d", "Qh Jh Th 4s 5c").category(), HandCategory::StraightFlush);
        assert_eq!(omaha("AhAd7c8d", "As Kc Kd 2s 3h").category(), HandCategory::FullHouse);
        assert_eq!(omaha("9c9d2h3h", "9h Kc Kd Ks 4s").category(), HandCategory::FullHouse);
    }

    #[test]
    fn test_omaha_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..300 {
            let (drawn, _) = Deck::fresh().draw(9, &mut rng).unwrap();
            let hole = OmahaHand::from_slice(&drawn[..4]).unwrap();
            let board = [drawn[4], drawn[5], drawn[6], drawn[7], drawn[8]];

            let mut expected: Option<EvaluatedHand> = None;
            for h in combinations(4, 2) {
                for b in combinations(5, 3) {
                    let hand = [
                        drawn[h[0]],
                        drawn[h[1]],
                        board[b[0]],
                        board[b[1]],
                        board[b[2]],
                    ];
                    let rank = evaluate_five(&hand);
                    expected = Some(expected.map_or(rank, |e| e.max(rank)));
                }
            }

            let best = evaluate_omaha(&hole, &board);
            assert_eq!(Some(best), expected);
            assert!(best <= evaluate_best(&drawn).unwrap());
        }
    }

    #[test]
    fn test_evaluate_best_requires_five() {
        assert!(evaluate_best(&parse_cards("AhKh").unwrap()).is_none());
        let seven = parse_cards("AhAs Ad Ac Kh Qs Jd").unwrap();
        assert_eq!(evaluate_best(&seven).unwrap().category(), HandCategory::FourOfAKind);
    }
}
