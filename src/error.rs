//! Error types for the equity engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::Card;

/// Failure of a request or a simulation run.
///
/// Every variant except `Cancelled` is a deterministic consequence of the
/// input and is reported before any simulation work starts.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The same card appears twice across hero hand, board or a draw.
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),

    /// Wrong card counts, opponents out of range, bad money values or card codes.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The undealt deck cannot complete the board and deal every opponent.
    #[error("insufficient cards: need {needed}, only {available} remain")]
    InsufficientCards {
        /// Cards required to finish the board and deal every opponent.
        needed: usize,
        /// Cards left in the deck.
        available: usize,
    },

    /// The caller cancelled the run between batches.
    #[error("simulation cancelled")]
    Cancelled,

    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading or validating an `EquityConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `trials` is zero.
    #[error("trial count must be positive")]
    ZeroTrials,

    /// `batch_size` is zero.
    #[error("batch size must be positive")]
    ZeroBatchSize,

    /// `num_threads` is `Some(0)`.
    #[error("thread count must be positive when set")]
    ZeroThreads,

    /// The rayon pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for `EquityConfig`.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable error category, for callers that map failures to a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// See [`EngineError::DuplicateCard`].
    DuplicateCard,
    /// See [`EngineError::InvalidRequest`].
    InvalidRequest,
    /// See [`EngineError::InsufficientCards`].
    InsufficientCards,
    /// See [`EngineError::Cancelled`].
    Cancelled,
    /// See [`EngineError::Config`].
    Config,
}

impl EngineError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::DuplicateCard(_) => ErrorKind::DuplicateCard,
            EngineError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            EngineError::InsufficientCards { .. } => ErrorKind::InsufficientCards,
            EngineError::Cancelled => ErrorKind::Cancelled,
            EngineError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;
