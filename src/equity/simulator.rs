//! Equity simulation: exact enumeration and Monte Carlo sampling.
//!
//! Both modes split the work into independent units (a batch of trials, or
//! one runout plus one first-opponent hand) that run on a rayon pool. Each
//! unit owns its RNG, deck copy and tally; tallies are merged by integer
//! addition. The cancel token is checked before each unit starts, so a
//! cancelled run never reports partial counts.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::cards::{combinations, Card, OmahaHand};
use crate::equity::config::{EquityConfig, ModeSelection};
use crate::equity::result::{SimulationMode, SimulationResult};
use crate::equity::spot::Spot;
use crate::error::{ConfigError, EngineError};
use crate::eval::{evaluate_omaha, EvaluatedHand};

/// Shared flag a caller can set to stop a running simulation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Work already in flight finishes its unit.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Equity simulator for Omaha spots.
///
/// # Example
/// ```
/// use plo_equity::equity::{EquityConfig, EquitySimulator, Spot};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let spot = Spot::parse("AhAdKsKd", "", 1).unwrap();
/// let simulator = EquitySimulator::new(EquityConfig::default().with_trials(2_000));
/// let result = simulator.simulate(&spot, &mut StdRng::seed_from_u64(1)).unwrap();
/// assert_eq!(result.trials, 2_000);
/// assert!(result.equity() > 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EquitySimulator {
    config: EquityConfig,
    cancel: Option<CancelToken>,
}

impl EquitySimulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: EquityConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attach a cancel token checked between units of work.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Which mode a spot will be simulated with.
    pub fn select_mode(&self, spot: &Spot) -> SimulationMode {
        match self.config.mode {
            ModeSelection::Exhaustive => SimulationMode::Exact,
            ModeSelection::MonteCarlo => SimulationMode::Estimated,
            ModeSelection::Auto => {
                if spot.completions() <= self.config.exhaustive_limit as u128 {
                    SimulationMode::Exact
                } else {
                    SimulationMode::Estimated
                }
            }
        }
    }

    /// Simulate a spot.
    ///
    /// The base seed for sampling is `config.seed` when set, otherwise it is
    /// drawn from the RNG. Either way a fixed seed gives the same result for
    /// any thread count.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        spot: &Spot,
        rng: &mut R,
    ) -> Result<SimulationResult, EngineError> {
        self.simulate_with_progress(spot, rng, |_, _| {})
    }

    /// Simulate a spot, reporting `(completed, total)` units after each batch.
    ///
    /// The callback is invoked from worker threads, in completion order.
    pub fn simulate_with_progress<R, F>(
        &self,
        spot: &Spot,
        rng: &mut R,
        progress: F,
    ) -> Result<SimulationResult, EngineError>
    where
        R: Rng + ?Sized,
        F: Fn(u64, u64) + Sync,
    {
        self.config.validate()?;
        let mode = self.select_mode(spot);
        let base_seed = match self.config.seed {
            Some(seed) => seed,
            None => rng.gen(),
        };

        log::debug!(
            "{} spot, {} opponent(s), {} completions: {:?}",
            spot.street(),
            spot.opponents(),
            spot.completions(),
            mode
        );

        let run = || match mode {
            SimulationMode::Exact => self.enumerate(spot, &progress),
            SimulationMode::Estimated => self.sample(spot, base_seed, &progress),
        };

        let result = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ConfigError::ThreadPool(e.to_string()))?
                .install(run),
            None => run(),
        };

        if let Err(EngineError::Cancelled) = result {
            log::warn!("simulation cancelled before completion");
        }
        result
    }

    fn check_cancelled(&self) -> Result<(), EngineError> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(EngineError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Monte Carlo: `trials` independent deals, in batches of `batch_size`.
    fn sample<F>(
        &self,
        spot: &Spot,
        base_seed: u64,
        progress: &F,
    ) -> Result<SimulationResult, EngineError>
    where
        F: Fn(u64, u64) + Sync,
    {
        let trials = self.config.trials;
        let batch_size = self.config.batch_size;
        let num_batches = trials.div_ceil(batch_size);
        let contenders = spot.num_contenders();
        let done = AtomicU64::new(0);

        (0..num_batches)
            .into_par_iter()
            .map(|batch| -> Result<SimulationResult, EngineError> {
                self.check_cancelled()?;

                let count = batch_size.min(trials - batch * batch_size);
                let mut rng = StdRng::seed_from_u64(batch_seed(base_seed, batch));
                let mut tally = SimulationResult::empty(SimulationMode::Estimated, contenders);
                let mut ranks = Vec::with_capacity(contenders);

                for _ in 0..count {
                    run_trial(spot, &mut rng, &mut ranks)?;
                    tally.record_showdown(&ranks);
                }

                let finished = done.fetch_add(count, Ordering::Relaxed) + count;
                log::debug!("batch {} done ({}/{} trials)", batch, finished, trials);
                progress(finished, trials);
                Ok(tally)
            })
            .try_reduce(
                || SimulationResult::empty(SimulationMode::Estimated, contenders),
                |a, b| Ok(a.merge(b)),
            )
    }

    /// Exact: every runout and every ordered assignment of opponents' hands.
    ///
    /// Work is partitioned by (runout, first opponent hand).
    fn enumerate<F>(&self, spot: &Spot, progress: &F) -> Result<SimulationResult, EngineError>
    where
        F: Fn(u64, u64) + Sync,
    {
        let contenders = spot.num_contenders();
        let total = u64::try_from(spot.completions()).unwrap_or(u64::MAX);
        let done = AtomicU64::new(0);
        let deck = spot.deck().cards();
        let runouts: Vec<Vec<usize>> = combinations(deck.len(), spot.board().missing()).collect();

        runouts
            .par_iter()
            .map(|runout| -> Result<SimulationResult, EngineError> {
                let runout_cards: Vec<Card> = runout.iter().map(|&i| deck[i]).collect();
                let board = spot.board().complete(&runout_cards);
                let hero_rank = evaluate_omaha(spot.hero(), &board);
                let pool: Vec<Card> = deck
                    .iter()
                    .copied()
                    .filter(|c| !runout_cards.contains(c))
                    .collect();
                let first_hands: Vec<Vec<usize>> = combinations(pool.len(), 4).collect();

                let tally = first_hands
                    .par_iter()
                    .map(|first| -> Result<SimulationResult, EngineError> {
                        self.check_cancelled()?;

                        let hand = deal_hand(&pool, first);
                        let rest = without(&pool, first);
                        let mut tally = SimulationResult::empty(SimulationMode::Exact, contenders);
                        let mut ranks = vec![hero_rank, evaluate_omaha(&hand, &board)];
                        let seats = spot.opponents() - 1;
                        enumerate_seats(&rest, &board, seats, &mut ranks, &mut tally);

                        let finished =
                            done.fetch_add(tally.trials, Ordering::Relaxed) + tally.trials;
                        progress(finished, total);
                        Ok(tally)
                    })
                    .try_reduce(
                        || SimulationResult::empty(SimulationMode::Exact, contenders),
                        |a, b| Ok(a.merge(b)),
                    )?;
                log::debug!("runout {:?} done ({} completions)", runout_cards, tally.trials);
                Ok(tally)
            })
            .try_reduce(
                || SimulationResult::empty(SimulationMode::Exact, contenders),
                |a, b| Ok(a.merge(b)),
            )
    }
}

/// One Monte Carlo trial: complete the board, deal every opponent, and leave
/// each contender's best hand in `ranks` (hero first).
fn run_trial<R: Rng>(
    spot: &Spot,
    rng: &mut R,
    ranks: &mut Vec<EvaluatedHand>,
) -> Result<(), EngineError> {
    let mut deck = spot.deck().clone();
    let runout = deck.take_random(spot.board().missing(), rng)?;
    let board = spot.board().complete(&runout);

    ranks.clear();
    ranks.push(evaluate_omaha(spot.hero(), &board));
    for _ in 0..spot.opponents() {
        let cards = deck.take_random(4, rng)?;
        let hand = OmahaHand::from_distinct([cards[0], cards[1], cards[2], cards[3]]);
        ranks.push(evaluate_omaha(&hand, &board));
    }
    Ok(())
}

/// Deal the remaining `seats` opponents every possible hand from `pool`,
/// recording a showdown for each full assignment.
fn enumerate_seats(
    pool: &[Card],
    board: &[Card; 5],
    seats: usize,
    ranks: &mut Vec<EvaluatedHand>,
    tally: &mut SimulationResult,
) {
    if seats == 0 {
        tally.record_showdown(ranks);
        return;
    }
    for idx in combinations(pool.len(), 4) {
        let hand = deal_hand(pool, &idx);
        ranks.push(evaluate_omaha(&hand, board));
        enumerate_seats(&without(pool, &idx), board, seats - 1, ranks, tally);
        ranks.pop();
    }
}

fn deal_hand(pool: &[Card], idx: &[usize]) -> OmahaHand {
    OmahaHand::from_distinct([pool[idx[0]], pool[idx[1]], pool[idx[2]], pool[idx[3]]])
}

/// `pool` minus the cards at the (sorted) positions `idx`.
fn without(pool: &[Card], idx: &[usize]) -> Vec<Card> {
    pool.iter()
        .enumerate()
        .filter(|(i, _)| idx.binary_search(i).is_err())
        .map(|(_, &c)| c)
        .collect()
}

/// Per-batch seed: splitmix64 over the base seed and batch index.
fn batch_seed(base: u64, batch: u64) -> u64 {
    let mut z = base.wrapping_add(batch.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
