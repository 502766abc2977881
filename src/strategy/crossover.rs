use crate::indicators::{ema, sma, IndicatorError};

//signal from the relative ordering of two average series
//+1 where short is above long, -1 where below, 0 where equal or either undefined
pub fn crossover_signals(short: &[Option<f64>], long: &[Option<f64>]) -> Vec<i8> {
    short
        .iter()
        .zip(long.iter())
        .map(|(short_value, long_value)| match (short_value, long_value) {
            (Some(s), Some(l)) if s > l => 1,
            (Some(s), Some(l)) if s < l => -1,
            _ => 0,
        })
        .collect()
}

//sma crossover signals over close prices
pub fn sma_cross_signals(
    closes: &[f64],
    short_window: usize,
    long_window: usize,
) -> Result<Vec<i8>, IndicatorError> {
    let short = sma(closes, short_window)?;
    let long = sma(closes, long_window)?;
    Ok(crossover_signals(&short, &long))
}

//ema crossover signals over close prices
pub fn ema_cross_signals(
    closes: &[f64],
    short_span: usize,
    long_span: usize,
) -> Result<Vec<i8>, IndicatorError> {
    let short = ema(closes, short_span)?;
    let long = ema(closes, long_span)?;
    Ok(crossover_signals(&short, &long))
}
