use crate::config::{ConfigError, StrategyConfig};
use crate::data::Bar;
use crate::engine::simulator::{simulate, SimulationError};
use crate::indicators::IndicatorError;
use crate::metrics::MetricsRecord;
use crate::portfolio::PortfolioState;
use crate::strategy::{generate_signals, position_changes};
use indexmap::IndexMap;
use rayon::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("Price series is empty")]
    InsufficientData,
}

//result of a backtest run
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub metrics: MetricsRecord,
    pub portfolio: Vec<PortfolioState>,
    pub signals: Vec<i8>,
    pub changes: Vec<Option<i8>>,
}

//runs a single synchronous backtest over the given bars
//either the whole run completes and returns metrics, or it fails with no result
pub fn run_backtest(
    bars: &[Bar],
    config: &StrategyConfig,
    initial_capital: f64,
) -> Result<BacktestResult, BacktestError> {
    if initial_capital <= 0.0 {
        return Err(ConfigError::NonPositiveCapital(initial_capital).into());
    }
    config.validate()?;

    if bars.is_empty() {
        return Err(BacktestError::InsufficientData);
    }

    let signals = generate_signals(bars, config)?;
    let changes = position_changes(&signals);
    let portfolio = simulate(bars, &changes, initial_capital)?;
    let metrics = MetricsRecord::from_backtest(bars, &portfolio, &changes, initial_capital);

    Ok(BacktestResult {
        metrics,
        portfolio,
        signals,
        changes,
    })
}

//runs independent configurations in parallel over a shared read-only series
//each run owns its own signal and portfolio series; results keep input order
pub fn run_many(
    bars: &[Bar],
    configs: &[(String, StrategyConfig)],
    initial_capital: f64,
) -> Result<IndexMap<String, BacktestResult>, BacktestError> {
    let results: Vec<(String, BacktestResult)> = configs
        .par_iter()
        .map(|(label, config)| {
            run_backtest(bars, config, initial_capital).map(|result| (label.clone(), result))
        })
        .collect::<Result<_, _>>()?;

    Ok(results.into_iter().collect())
}
