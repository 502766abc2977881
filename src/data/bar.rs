use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Non-positive price: {0}")]
    NonPositivePrice(f64),
}

//represents a single daily ohlcv bar of market data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub symbol: String,
}

impl Bar {
    //creates a new bar with validation
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        symbol: String,
    ) -> Result<Self, BarError> {
        //validate all prices positive
        for price in [open, high, low, close] {
            if price <= 0.0 {
                return Err(BarError::NonPositivePrice(price));
            }
        }

        //validate high >= low
        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        Ok(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
            symbol,
        })
    }

    //creates a bar without validation
    pub fn new_unchecked(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        symbol: String,
    ) -> Self {
        Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
            symbol,
        }
    }
}

//extracts the close price series from a slice of bars
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|bar| bar.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn valid_bar_passes_validation() {
        let bar = Bar::new(date(2), 100.0, 105.0, 99.0, 102.0, 1000, "AAPL".to_string());
        assert!(bar.is_ok());
    }

    #[test]
    fn high_below_low_rejected() {
        let bar = Bar::new(date(2), 100.0, 99.0, 105.0, 100.0, 1000, "AAPL".to_string());
        assert!(matches!(bar, Err(BarError::InvalidHighLow { .. })));
    }

    #[test]
    fn close_outside_range_rejected() {
        let bar = Bar::new(date(2), 100.0, 105.0, 99.0, 110.0, 1000, "AAPL".to_string());
        assert!(matches!(bar, Err(BarError::InvalidClose { .. })));
    }

    #[test]
    fn non_positive_price_rejected() {
        let bar = Bar::new(date(2), 0.0, 105.0, 99.0, 100.0, 1000, "AAPL".to_string());
        assert!(matches!(bar, Err(BarError::NonPositivePrice(_))));
    }

    #[test]
    fn closes_extracts_in_order() {
        let bars = vec![
            Bar::new_unchecked(date(2), 100.0, 101.0, 99.0, 100.5, 10, "AAPL".to_string()),
            Bar::new_unchecked(date(3), 100.5, 102.0, 100.0, 101.0, 10, "AAPL".to_string()),
        ];
        assert_eq!(closes(&bars), vec![100.5, 101.0]);
    }
}
