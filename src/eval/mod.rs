//! Hand evaluation.
//!
//! Main entry points:
//!   `evaluate_five(cards) -> EvaluatedHand`
//!   `evaluate_omaha(hole, board) -> EvaluatedHand`

pub mod hand_eval;

pub use hand_eval::{evaluate_best, evaluate_five, evaluate_omaha, EvaluatedHand, HandCategory};
