//! # PLO Equity
//!
//! Equity and call/fold decisions for Pot-Limit Omaha.
//!
//! Given the hero's four hole cards, the known board, the number of
//! opponents and the price of a call, the engine estimates the hero's share
//! of the pot and says whether calling is profitable.
//!
//! ## Features
//!
//! - **Omaha Hand Evaluation**: Best hand using exactly two hole cards and
//!   exactly three board cards
//! - **Exact or Sampled Equity**: Full enumeration when the completion count
//!   is small, parallel Monte Carlo otherwise
//! - **Deterministic Parallelism**: Seeded runs give identical results on
//!   any number of threads
//! - **Cancellation**: A shared token aborts a run between batches
//!
//! ## Quick Start
//!
//! ```
//! use plo_equity::{Calculator, EquityConfig, EquityRequest};
//!
//! let calculator = Calculator::new(EquityConfig::default().with_seed(42).with_trials(2_000));
//! let req = EquityRequest::parse("AhAdKsKd", "", 1, 100.0, 50.0).unwrap();
//! let response = calculator.evaluate(&req).unwrap();
//!
//! assert!(response.equity > 0.55);
//! assert!(response.should_call);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Cards, hands, boards and the deck
//! - [`eval`]: Five-card and Omaha hand evaluation
//! - [`equity`]: Exact and Monte Carlo equity simulation
//! - [`decision`]: Pot odds, EV and the call/fold decision
//! - [`request`]: Request/response boundary and wire types
//! - [`logging`]: Logger setup for binaries
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Request boundary (request)                   │
//! │  - Card code parsing      - Validation before any work          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Equity simulator (equity)                     │
//! │  - Exact enumeration      - Batched Monte Carlo on rayon        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!         ┌─────────────────────┼─────────────────────┐
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌───────────┐
//!    │  Cards  │         │   Hand    │         │ Decision  │
//!    │ & Deck  │         │ Evaluator │         │ (odds/EV) │
//!    └─────────┘         └───────────┘         └───────────┘
//! ```

#![warn(missing_docs)]

/// Card, hand, board and deck model.
pub mod cards;

/// Pot odds and expected value.
pub mod decision;

/// Equity simulation: configuration, spots, results and the simulator.
pub mod equity;

/// Engine error types.
pub mod error;

/// Poker hand evaluation.
pub mod eval;

/// Logger initialisation.
pub mod logging;

/// Request evaluation and wire types.
pub mod request;

// Re-export commonly used types at crate root for convenience
pub use cards::{Board, Card, Deck, OmahaHand, Street};
pub use decision::{decide, Decision};
pub use equity::{
    CancelToken, EquityConfig, EquitySimulator, ModeSelection, SimulationMode, SimulationResult,
    Spot,
};
pub use error::{ConfigError, EngineError, ErrorKind};
pub use eval::{evaluate_five, evaluate_omaha, EvaluatedHand, HandCategory};
pub use request::{
    evaluate_request, Calculator, EquityRequest, EquityResponse, ErrorResponse, HandRequest,
    HandResponse,
};
