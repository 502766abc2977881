use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//position side: flat (all cash) or long (fully invested)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Flat,
    Long,
}

//portfolio snapshot for a single time step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioState {
    pub date: NaiveDate,
    pub position: Position,
    pub shares: f64,
    pub cash: f64,
    pub holdings: f64,
    pub portfolio_value: f64,
}

impl PortfolioState {
    //returns true when no position is open
    pub fn is_flat(&self) -> bool {
        self.position == Position::Flat
    }

    //returns true when fully invested
    pub fn is_long(&self) -> bool {
        self.position == Position::Long
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_predicates() {
        let state = PortfolioState {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            position: Position::Long,
            shares: 100.0,
            cash: 0.0,
            holdings: 10000.0,
            portfolio_value: 10000.0,
        };
        assert!(state.is_long());
        assert!(!state.is_flat());
    }
}
