use crate::indicators::{rsi, IndicatorError};

//rsi threshold signals over close prices
//+1 when oversold, -1 when overbought, 0 in the neutral band or while rsi is undefined
pub fn rsi_threshold_signals(
    closes: &[f64],
    window: usize,
    oversold: f64,
    overbought: f64,
) -> Result<Vec<i8>, IndicatorError> {
    let values = rsi(closes, window)?;

    Ok(values
        .iter()
        .map(|value| match value {
            Some(v) if *v < oversold => 1,
            Some(v) if *v > overbought => -1,
            _ => 0,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversold_after_losses_goes_bullish() {
        let closes = [104.0, 103.0, 102.0, 101.0, 100.0];
        let signals = rsi_threshold_signals(&closes, 3, 30.0, 70.0).unwrap();
        //rsi is 0 once defined, well below the oversold threshold
        assert_eq!(signals[3], 1);
        assert_eq!(signals[4], 1);
    }

    #[test]
    fn overbought_after_gains_goes_bearish() {
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0];
        let signals = rsi_threshold_signals(&closes, 3, 30.0, 70.0).unwrap();
        assert_eq!(signals[3], -1);
        assert_eq!(signals[4], -1);
    }

    #[test]
    fn undefined_rsi_stays_neutral() {
        let closes = [100.0, 100.0, 100.0, 100.0, 100.0];
        let signals = rsi_threshold_signals(&closes, 3, 30.0, 70.0).unwrap();
        assert_eq!(signals, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn neutral_band_stays_neutral() {
        //alternating closes keep rsi at 50
        let closes = [100.0, 101.0, 100.0, 101.0, 100.0];
        let signals = rsi_threshold_signals(&closes, 4, 30.0, 70.0).unwrap();
        assert_eq!(signals[4], 0);
    }
}
