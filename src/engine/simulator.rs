use crate::data::Bar;
use crate::portfolio::{PortfolioState, Position};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SimulationError {
    #[error("Non-positive close ({close}) at step {index} prevents a cash-shares conversion")]
    BadClose { index: usize, close: f64 },
}

//accumulator threaded left to right across the position-change series
#[derive(Debug, Clone, Copy)]
struct Holdings {
    position: Position,
    shares: f64,
    cash: f64,
}

//runs the long/flat state machine over the position-change series
//produces one snapshot per bar; step t depends only on step t-1 and bar t
pub fn simulate(
    bars: &[Bar],
    changes: &[Option<i8>],
    initial_capital: f64,
) -> Result<Vec<PortfolioState>, SimulationError> {
    debug_assert_eq!(bars.len(), changes.len());

    let mut states = Vec::with_capacity(bars.len());
    let mut acc = Holdings {
        position: Position::Flat,
        shares: 0.0,
        cash: initial_capital,
    };

    for (index, (bar, change)) in bars.iter().zip(changes.iter()).enumerate() {
        acc = step(acc, index, bar.close, *change)?;

        //mark to market after the transition
        let holdings = acc.shares * bar.close;
        states.push(PortfolioState {
            date: bar.date,
            position: acc.position,
            shares: acc.shares,
            cash: acc.cash,
            holdings,
            portfolio_value: acc.cash + holdings,
        });
    }

    Ok(states)
}

//single transition of the state machine
fn step(
    acc: Holdings,
    index: usize,
    close: f64,
    change: Option<i8>,
) -> Result<Holdings, SimulationError> {
    let change = match change {
        //undefined change carries the prior state forward unchanged
        None => return Ok(acc),
        Some(c) => c,
    };

    if change > 0 && acc.position == Position::Flat {
        //enter long: convert all cash to shares at this bar's close
        if close <= 0.0 {
            return Err(SimulationError::BadClose { index, close });
        }
        return Ok(Holdings {
            position: Position::Long,
            shares: acc.cash / close,
            cash: 0.0,
        });
    }

    if change < 0 && acc.position == Position::Long {
        //exit long: convert all shares to cash at this bar's close
        if close <= 0.0 {
            return Err(SimulationError::BadClose { index, close });
        }
        return Ok(Holdings {
            position: Position::Flat,
            shares: 0.0,
            cash: acc.shares * close,
        });
    }

    //signal continues in the same direction, or is not actionable from this state
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Bar::new_unchecked(
                    base_date + chrono::Duration::days(i as i64),
                    close,
                    close,
                    close,
                    close,
                    1000,
                    "TEST".to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn round_trip_converts_all_cash_both_ways() {
        let bars = make_bars(&[100.0, 100.0, 110.0, 110.0]);
        let changes = vec![None, Some(1), Some(-1), Some(0)];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        assert_eq!(states[1].position, Position::Long);
        assert_eq!(states[1].shares, 100.0);
        assert_eq!(states[1].cash, 0.0);

        assert_eq!(states[2].position, Position::Flat);
        assert_eq!(states[2].shares, 0.0);
        assert_eq!(states[2].cash, 11000.0);
        assert_eq!(states[3].portfolio_value, 11000.0);
    }

    #[test]
    fn undefined_change_marks_to_market_only() {
        let bars = make_bars(&[100.0, 100.0, 120.0]);
        let changes = vec![None, Some(1), None];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        //only the price term moves while the change is undefined
        assert_eq!(states[2].shares, states[1].shares);
        assert_eq!(states[2].cash, states[1].cash);
        assert_eq!(states[2].portfolio_value, 100.0 * 120.0);
    }

    #[test]
    fn sell_while_flat_is_not_actionable() {
        let bars = make_bars(&[100.0, 100.0, 100.0]);
        let changes = vec![None, Some(-1), Some(-1)];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        for state in &states {
            assert_eq!(state.position, Position::Flat);
            assert_eq!(state.cash, 10000.0);
        }
    }

    #[test]
    fn repeated_buy_does_not_pyramid() {
        let bars = make_bars(&[100.0, 100.0, 50.0]);
        let changes = vec![None, Some(1), Some(1)];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        assert_eq!(states[1].shares, 100.0);
        assert_eq!(states[2].shares, 100.0);
    }

    #[test]
    fn signal_jump_exits_long_without_shorting() {
        //a -2 change (signal jumping +1 to -1) while long exits to flat
        let bars = make_bars(&[100.0, 100.0, 110.0]);
        let changes = vec![None, Some(1), Some(-2)];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        assert_eq!(states[2].position, Position::Flat);
        assert_eq!(states[2].cash, 11000.0);
        assert_eq!(states[2].shares, 0.0);
    }

    #[test]
    fn bad_close_on_entry_is_an_error() {
        let mut bars = make_bars(&[100.0, 100.0]);
        bars[1].close = 0.0;
        let changes = vec![None, Some(1)];

        let result = simulate(&bars, &changes, 10000.0);
        assert_eq!(
            result,
            Err(SimulationError::BadClose {
                index: 1,
                close: 0.0
            })
        );
    }

    #[test]
    fn state_exclusivity_holds_throughout() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0]);
        let changes = vec![None, Some(1), Some(0), Some(-1), Some(1)];

        let states = simulate(&bars, &changes, 10000.0).unwrap();

        for state in &states {
            match state.position {
                Position::Flat => assert_eq!(state.shares, 0.0),
                Position::Long => assert_eq!(state.cash, 0.0),
            }
            assert!(state.cash >= 0.0);
            assert!(state.shares >= 0.0);
            assert_eq!(
                state.portfolio_value,
                state.cash + state.holdings
            );
        }
    }
}
