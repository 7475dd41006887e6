//! Win/tie tallies produced by one simulation run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::eval::EvaluatedHand;

/// Pot-share units per pot: the least common multiple of 1..=9, so an even
/// split between any number of contenders at a full table is an integer.
pub const SHARE_UNITS: u64 = 2520;

/// Whether the equity is exact or sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    /// Every completion was enumerated.
    Exact,
    /// Monte Carlo estimate.
    Estimated,
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationMode::Exact => write!(f, "exact"),
            SimulationMode::Estimated => write!(f, "estimated"),
        }
    }
}

/// Showdown counts for one contender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContenderStats {
    /// Completions won outright.
    pub wins: u64,
    /// Completions where the pot was split with at least one other contender.
    pub ties: u64,
    /// Pot share won, in `SHARE_UNITS` per pot.
    pub share_units: u64,
}

/// Aggregated outcome of a simulation run.
///
/// Contender 0 is the hero; 1..=N are the opponent seats. Merging two results
/// is plain integer addition, so the total does not depend on the order in
/// which batches finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// How the result was produced.
    pub mode: SimulationMode,
    /// Number of trials (sampled) or completions (exact).
    pub trials: u64,
    /// Per-contender counts, hero first.
    pub contenders: Vec<ContenderStats>,
}

impl SimulationResult {
    /// Empty tally for `num_contenders` (hero plus opponents).
    pub(crate) fn empty(mode: SimulationMode, num_contenders: usize) -> Self {
        Self {
            mode,
            trials: 0,
            contenders: vec![ContenderStats::default(); num_contenders],
        }
    }

    /// Record one showdown. `ranks[0]` is the hero's hand.
    pub(crate) fn record_showdown(&mut self, ranks: &[EvaluatedHand]) {
        debug_assert_eq!(ranks.len(), self.contenders.len());
        self.trials += 1;

        let Some(best) = ranks.iter().max() else {
            return;
        };
        let winners = ranks.iter().filter(|r| *r == best).count() as u64;
        let share = SHARE_UNITS / winners;

        for (stats, rank) in self.contenders.iter_mut().zip(ranks) {
            if rank == best {
                if winners == 1 {
                    stats.wins += 1;
                } else {
                    stats.ties += 1;
                }
                stats.share_units += share;
            }
        }
    }

    /// Add another tally into this one.
    pub(crate) fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.contenders.len(), other.contenders.len());
        self.trials += other.trials;
        for (a, b) in self.contenders.iter_mut().zip(&other.contenders) {
            a.wins += b.wins;
            a.ties += b.ties;
            a.share_units += b.share_units;
        }
        self
    }

    /// Hero's counts.
    pub fn hero(&self) -> &ContenderStats {
        &self.contenders[0]
    }

    /// Number of opponents simulated.
    pub fn num_opponents(&self) -> usize {
        self.contenders.len().saturating_sub(1)
    }

    /// Whether every completion was enumerated.
    pub fn is_exact(&self) -> bool {
        self.mode == SimulationMode::Exact
    }

    /// Hero equity: (wins + tie shares) / trials.
    pub fn equity(&self) -> f64 {
        self.equity_of(0)
    }

    /// Equity of contender `seat` (0 is the hero).
    pub fn equity_of(&self, seat: usize) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.contenders[seat].share_units as f64 / (SHARE_UNITS * self.trials) as f64
    }

    /// Fraction of completions the hero wins outright.
    pub fn win_rate(&self) -> f64 {
        self.rate(self.hero().wins)
    }

    /// Fraction of completions the hero splits.
    pub fn tie_rate(&self) -> f64 {
        self.rate(self.hero().ties)
    }

    /// Fraction of completions the hero loses.
    pub fn loss_rate(&self) -> f64 {
        let hero = self.hero();
        self.rate(self.trials - hero.wins - hero.ties)
    }

    fn rate(&self, count: u64) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 / self.trials as f64
        }
    }
}
