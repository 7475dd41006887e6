//! Request/response boundary.
//!
//! An [`EquityRequest`] is validated into a [`Spot`], simulated, and turned
//! into an [`EquityResponse`] carrying equity, pot odds, EV and the
//! call/fold recommendation. [`HandRequest`] and [`ErrorResponse`] are the
//! camelCase wire shapes for callers that speak JSON.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cards::{parse_cards, Card};
use crate::decision::{self, Decision};
use crate::equity::{CancelToken, EquityConfig, EquitySimulator, SimulationMode, Spot};
use crate::error::{EngineError, ErrorKind};

/// A single equity question: hero's hand, the board, the table and the price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityRequest {
    /// Hero's hole cards; exactly four.
    pub hero: Vec<Card>,
    /// Known community cards: none, 3, 4 or 5.
    pub board: Vec<Card>,
    /// Opponents still in the hand, 1-8.
    pub opponents: usize,
    /// Pot before the call.
    pub pot_size: f64,
    /// Amount hero must put in to call.
    pub bet_to_call: f64,
}

impl EquityRequest {
    /// Build a request from card code strings such as `"AhAdKsKd"` and `"7h8sKd"`.
    pub fn parse(
        hero: &str,
        board: &str,
        opponents: usize,
        pot_size: f64,
        bet_to_call: f64,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            hero: parse_cards(hero)?,
            board: parse_cards(board)?,
            opponents,
            pot_size,
            bet_to_call,
        })
    }
}

/// Answer to an [`EquityRequest`]. Also the `HandResponse` wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityResponse {
    /// Hero's share of the pot, 0-1.
    pub equity: f64,
    /// Break-even equity, 0-1.
    pub pot_odds: f64,
    /// Whether calling has positive EV.
    pub should_call: bool,
    /// Expected net gain of calling.
    pub ev: f64,
    /// Exact or estimated.
    pub mode: SimulationMode,
    /// Completions enumerated or trials sampled.
    pub trials: u64,
}

/// Wire name of [`EquityResponse`].
pub type HandResponse = EquityResponse;

/// JSON request as sent by front ends.
///
/// `num_players` counts every player at the table, hero included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRequest {
    /// Hero's four card codes.
    pub hole_cards: Vec<String>,
    /// Board card codes; may be omitted preflop.
    #[serde(default)]
    pub community_cards: Vec<String>,
    /// Players at the table, hero included (2-9).
    pub num_players: usize,
    /// Pot before the call.
    pub pot_size: f64,
    /// Amount to call.
    pub bet_to_call: f64,
}

impl TryFrom<&HandRequest> for EquityRequest {
    type Error = EngineError;

    fn try_from(req: &HandRequest) -> Result<Self, Self::Error> {
        if !(2..=9).contains(&req.num_players) {
            return Err(EngineError::InvalidRequest(format!(
                "numPlayers must be between 2 and 9, got {}",
                req.num_players
            )));
        }
        Ok(Self {
            hero: parse_codes(&req.hole_cards)?,
            board: parse_codes(&req.community_cards)?,
            opponents: req.num_players - 1,
            pot_size: req.pot_size,
            bet_to_call: req.bet_to_call,
        })
    }
}

fn parse_codes(codes: &[String]) -> Result<Vec<Card>, EngineError> {
    codes.iter().map(|code| code.trim().parse()).collect()
}

/// Error body returned in place of a [`HandResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl From<&EngineError> for ErrorResponse {
    fn from(err: &EngineError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<EngineError> for ErrorResponse {
    fn from(err: EngineError) -> Self {
        Self::from(&err)
    }
}

/// Evaluate one request.
///
/// Every request error is reported before any simulation work starts. The
/// RNG supplies the sampling seed.
pub fn evaluate_request<R: Rng + ?Sized>(
    req: &EquityRequest,
    config: &EquityConfig,
    rng: &mut R,
) -> Result<EquityResponse, EngineError> {
    run(req, EquitySimulator::new(config.clone()), rng, |_, _| {})
}

fn run<R, F>(
    req: &EquityRequest,
    simulator: EquitySimulator,
    rng: &mut R,
    progress: F,
) -> Result<EquityResponse, EngineError>
where
    R: Rng + ?Sized,
    F: Fn(u64, u64) + Sync,
{
    let spot = Spot::new(&req.hero, &req.board, req.opponents)?;
    decision::pot_odds(req.pot_size, req.bet_to_call)?;

    log::info!(
        "evaluating {} on [{}] against {} opponent(s), pot {} to call {}",
        spot.hero(),
        spot.board(),
        spot.opponents(),
        req.pot_size,
        req.bet_to_call
    );
    let start = Instant::now();

    let result = simulator.simulate_with_progress(&spot, rng, progress)?;
    let Decision {
        equity,
        pot_odds,
        ev,
        should_call,
    } = decision::decide(result.equity(), req.pot_size, req.bet_to_call)?;

    log::info!(
        "equity {:.4} ({}, {} trials) in {:.2?}: ev {:.2}, {}",
        equity,
        result.mode,
        result.trials,
        start.elapsed(),
        ev,
        if should_call { "call" } else { "fold" }
    );

    Ok(EquityResponse {
        equity,
        pot_odds,
        should_call,
        ev,
        mode: result.mode,
        trials: result.trials,
    })
}

/// Reusable evaluator: a configuration plus an optional cancel token.
///
/// Seeds its RNG from `config.seed` when set, from entropy otherwise.
///
/// # Example
/// ```
/// use plo_equity::{Calculator, EquityConfig, EquityRequest};
///
/// let calculator = Calculator::new(EquityConfig::default().with_seed(1));
/// let req = EquityRequest::parse("AsKs2d3d", "QsJsTs7h4c", 1, 100.0, 50.0).unwrap();
/// let response = calculator.evaluate(&req).unwrap();
/// assert_eq!(response.equity, 1.0);
/// assert!(response.should_call);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: EquityConfig,
    cancel: Option<CancelToken>,
}

impl Calculator {
    /// Create a calculator with the given configuration.
    pub fn new(config: EquityConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attach a cancel token; a cancelled evaluation returns `Cancelled`.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Evaluate one request.
    pub fn evaluate(&self, req: &EquityRequest) -> Result<EquityResponse, EngineError> {
        self.evaluate_with_progress(req, |_, _| {})
    }

    /// Evaluate, reporting `(completed, total)` units of work as they finish.
    pub fn evaluate_with_progress<F>(
        &self,
        req: &EquityRequest,
        progress: F,
    ) -> Result<EquityResponse, EngineError>
    where
        F: Fn(u64, u64) + Sync,
    {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        run(req, self.simulator(), &mut rng, progress)
    }

    /// Evaluate a wire request.
    pub fn evaluate_hand(&self, req: &HandRequest) -> Result<HandResponse, EngineError> {
        self.evaluate(&EquityRequest::try_from(req)?)
    }

    fn simulator(&self) -> EquitySimulator {
        let simulator = EquitySimulator::new(self.config.clone());
        match &self.cancel {
            Some(token) => simulator.with_cancel_token(token.clone()),
            None => simulator,
        }
    }
}
