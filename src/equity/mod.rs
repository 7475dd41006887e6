//! Equity simulation engine.
//!
//! Given the hero's Omaha hand, the known board and an opponent count, the
//! engine estimates the hero's share of the pot over every way the runout
//! and the opponents' hole cards can be dealt.
//!
//! # Modes
//!
//! - **Exact**: when the number of completions (runout times every ordered
//!   assignment of opponents' hands) is within `exhaustive_limit`, all of
//!   them are enumerated. There is no sampling error.
//! - **Estimated**: otherwise `trials` random deals are sampled.
//!
//! Ties split the pot evenly among every contender holding the best hand.
//!
//! # Example
//!
//! ```
//! use plo_equity::equity::{EquityConfig, EquitySimulator, SimulationMode, Spot};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let spot = Spot::parse("AsKs2d3d", "QsJsTs7h4c", 1).unwrap();
//! let result = EquitySimulator::new(EquityConfig::default())
//!     .simulate(&spot, &mut StdRng::seed_from_u64(0))
//!     .unwrap();
//! assert_eq!(result.mode, SimulationMode::Exact);
//! assert_eq!(result.equity(), 1.0);
//! ```

pub mod config;
pub mod result;
pub mod simulator;
pub mod spot;

pub use config::{EquityConfig, ModeSelection};
pub use result::{ContenderStats, SimulationMode, SimulationResult, SHARE_UNITS};
pub use simulator::{CancelToken, EquitySimulator};
pub use spot::{Spot, MAX_OPPONENTS, MIN_OPPONENTS};
