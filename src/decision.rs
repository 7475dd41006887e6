//! Pot odds, expected value and the call/fold decision.
//!
//! With `pot` already in the middle and `bet` to call:
//!
//! ```text
//! pot_odds    = bet / (pot + bet)            (0 when bet == 0)
//! ev          = equity * (pot + bet) - bet
//! should_call = ev > 0                       (equivalently equity > pot_odds)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The outcome of weighing a call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Hero's share of the pot, 0-1.
    pub equity: f64,
    /// Break-even equity for calling, 0-1.
    pub pot_odds: f64,
    /// Expected net gain of calling.
    pub ev: f64,
    /// Whether calling is profitable.
    pub should_call: bool,
}

/// Break-even equity for calling `bet` into `pot`.
pub fn pot_odds(pot: f64, bet: f64) -> Result<f64, EngineError> {
    check_amount("pot size", pot)?;
    check_amount("bet to call", bet)?;
    if bet == 0.0 {
        return Ok(0.0);
    }
    Ok(bet / (pot + bet))
}

/// Expected net gain of calling `bet` into `pot` with the given equity.
pub fn expected_value(equity: f64, pot: f64, bet: f64) -> Result<f64, EngineError> {
    check_equity(equity)?;
    check_amount("pot size", pot)?;
    check_amount("bet to call", bet)?;
    Ok(equity * (pot + bet) - bet)
}

/// Pot odds, EV and the call/fold recommendation.
pub fn decide(equity: f64, pot: f64, bet: f64) -> Result<Decision, EngineError> {
    let pot_odds = pot_odds(pot, bet)?;
    let ev = expected_value(equity, pot, bet)?;
    Ok(Decision {
        equity,
        pot_odds,
        ev,
        should_call: ev > 0.0,
    })
}

fn check_amount(name: &str, amount: f64) -> Result<(), EngineError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::InvalidRequest(format!(
            "{} must be a non-negative number, got {}",
            name, amount
        )));
    }
    Ok(())
}

fn check_equity(equity: f64) -> Result<(), EngineError> {
    if !(0.0..=1.0).contains(&equity) {
        return Err(EngineError::InvalidRequest(format!(
            "equity must be between 0 and 1, got {}",
            equity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_pot_odds() {
        assert!((pot_odds(100.0, 50.0).unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(pot_odds(200.0, 200.0).unwrap(), 0.5);
        assert_eq!(pot_odds(100.0, 0.0).unwrap(), 0.0);
        assert_eq!(pot_odds(0.0, 0.0).unwrap(), 0.0);
        assert_eq!(pot_odds(0.0, 10.0).unwrap(), 1.0);
    }

    #[test]
    fn test_pot_odds_monotone_in_bet() {
        for pot in [0.0, 1.0, 75.0, 1000.0] {
            let mut previous = pot_odds(pot, 0.0).unwrap();
            for step in 1..200 {
                let current = pot_odds(pot, step as f64 * 2.5).unwrap();
                assert!(current >= previous, "pot {} step {}", pot, step);
                if pot > 0.0 {
                    assert!(current > previous);
                }
                previous = current;
            }
        }
    }

    #[test]
    fn test_expected_value() {
        // 1/3 equity exactly breaks even at 2:1.
        assert!(expected_value(1.0 / 3.0, 100.0, 50.0).unwrap().abs() < 1e-9);
        assert_eq!(expected_value(0.5, 100.0, 50.0).unwrap(), 25.0);
        assert_eq!(expected_value(0.0, 100.0, 50.0).unwrap(), -50.0);
        assert_eq!(expected_value(0.4, 100.0, 0.0).unwrap(), 40.0);
    }

    #[test]
    fn test_should_call_iff_positive_ev() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10_000 {
            let equity: f64 = rng.gen();
            let pot = rng.gen_range(0.0..500.0);
            let bet = if rng.gen_bool(0.1) { 0.0 } else { rng.gen_range(0.0..500.0) };
            let d = decide(equity, pot, bet).unwrap();
            assert_eq!(d.should_call, d.ev > 0.0);
            if (equity - d.pot_odds).abs() > 1e-9 {
                assert_eq!(d.should_call, equity > d.pot_odds, "{:?}", d);
            }
        }
    }

    #[test]
    fn test_free_check_with_zero_equity_is_not_a_call() {
        let d = decide(0.0, 100.0, 0.0).unwrap();
        assert_eq!(d.pot_odds, 0.0);
        assert_eq!(d.ev, 0.0);
        assert!(!d.should_call);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(decide(0.5, -1.0, 10.0), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(decide(0.5, 10.0, -1.0), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(decide(0.5, f64::NAN, 10.0), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(decide(0.5, 10.0, f64::INFINITY), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(decide(1.5, 10.0, 10.0), Err(EngineError::InvalidRequest(_))));
        assert!(matches!(decide(-0.1, 10.0, 10.0), Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(decide(0.5, 100.0, 50.0).unwrap()).unwrap();
        assert_eq!(json["potOdds"], serde_json::json!(1.0 / 3.0));
        assert_eq!(json["shouldCall"], serde_json::json!(true));
    }
}
