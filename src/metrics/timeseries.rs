//step-to-step percentage change of a value series
//the first step has no prior value and produces no return
pub fn calculate_returns(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return vec![];
    }

    let mut returns = Vec::with_capacity(values.len() - 1);
    for i in 1..values.len() {
        let ret = (values[i] - values[i - 1]) / values[i - 1];
        returns.push(ret);
    }
    returns
}

//largest peak-to-trough decline as a percentage of the running peak
//zero or negative; zero when the series never declines
pub fn max_drawdown_pct(values: &[f64]) -> f64 {
    let mut peak = match values.first() {
        Some(&value) => value,
        None => return 0.0,
    };

    let mut worst = 0.0f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        let drawdown = (value - peak) / peak * 100.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    worst
}

//rounds to two decimal places for reporting
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_skip_the_first_step() {
        let returns = calculate_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn returns_of_short_series_are_empty() {
        assert!(calculate_returns(&[100.0]).is_empty());
        assert!(calculate_returns(&[]).is_empty());
    }

    #[test]
    fn drawdown_is_zero_for_monotonic_rise() {
        assert_eq!(max_drawdown_pct(&[100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn drawdown_measures_from_running_peak() {
        //peak 120, trough 90: (90 - 120) / 120 = -25%
        let worst = max_drawdown_pct(&[100.0, 120.0, 90.0, 110.0]);
        assert!((worst + 25.0).abs() < 1e-12);
    }

    #[test]
    fn drawdown_of_flat_series_is_zero() {
        assert_eq!(max_drawdown_pct(&[100.0, 100.0, 100.0]), 0.0);
    }

    #[test]
    fn round2_rounds_to_two_places() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(-3.333), -3.33);
    }
}
