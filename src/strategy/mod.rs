pub mod crossover;
pub mod rsi_threshold;

use crate::config::StrategyConfig;
use crate::data::{closes, Bar};
use crate::indicators::IndicatorError;

pub use crossover::{crossover_signals, ema_cross_signals, sma_cross_signals};
pub use rsi_threshold::rsi_threshold_signals;

//generates the per-bar signal series for the configured strategy
//+1 bullish, -1 bearish, 0 neutral or indicator undefined
pub fn generate_signals(bars: &[Bar], config: &StrategyConfig) -> Result<Vec<i8>, IndicatorError> {
    let closes = closes(bars);

    match config {
        StrategyConfig::SmaCross(p) => sma_cross_signals(&closes, p.short_window, p.long_window),
        StrategyConfig::EmaCross(p) => ema_cross_signals(&closes, p.short_span, p.long_span),
        StrategyConfig::RsiThreshold(p) => {
            rsi_threshold_signals(&closes, p.window, p.oversold, p.overbought)
        }
    }
}

//first difference of the signal series, marking entry and exit candidates
//index 0 has no prior signal and is undefined
pub fn position_changes(signals: &[i8]) -> Vec<Option<i8>> {
    signals
        .iter()
        .enumerate()
        .map(|(i, &signal)| {
            if i == 0 {
                None
            } else {
                Some(signal - signals[i - 1])
            }
        })
        .collect()
}
