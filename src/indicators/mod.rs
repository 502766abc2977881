use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Window must be at least 1")]
    InvalidWindow,
    #[error("Span must be at least 1")]
    InvalidSpan,
}

//simple moving average over the trailing window of closes
//undefined until a full window of data is available
pub fn sma(closes: &[f64], window: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow);
    }

    let mut values = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if i + 1 < window {
            values.push(None);
        } else {
            let sum: f64 = closes[i + 1 - window..=i].iter().sum();
            values.push(Some(sum / window as f64));
        }
    }

    Ok(values)
}

//exponential moving average with smoothing factor 2/(span+1)
//seeded with the first close, so every step is defined
pub fn ema(closes: &[f64], span: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if span == 0 {
        return Err(IndicatorError::InvalidSpan);
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;

    for &close in closes {
        let next = match prev {
            None => close,
            Some(p) => alpha * close + (1.0 - alpha) * p,
        };
        values.push(Some(next));
        prev = Some(next);
    }

    Ok(values)
}

//relative strength index from simple rolling means of gains and losses
//undefined until a full window of close-to-close deltas is available,
//and when the window is completely flat (no gains and no losses)
pub fn rsi(closes: &[f64], window: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    if window == 0 {
        return Err(IndicatorError::InvalidWindow);
    }

    let mut values = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if i < window {
            values.push(None);
            continue;
        }

        let mut gain = 0.0;
        let mut loss = 0.0;

        for j in i + 1 - window..=i {
            let delta = closes[j] - closes[j - 1];
            if delta > 0.0 {
                gain += delta;
            } else {
                loss += -delta;
            }
        }

        let avg_gain = gain / window as f64;
        let avg_loss = loss / window as f64;

        if avg_gain == 0.0 && avg_loss == 0.0 {
            values.push(None);
        } else if avg_loss == 0.0 {
            values.push(Some(100.0));
        } else {
            let rs = avg_gain / avg_loss;
            values.push(Some(100.0 - 100.0 / (1.0 + rs)));
        }
    }

    Ok(values)
}
