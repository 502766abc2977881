pub mod backtest_config;

pub use backtest_config::{
    BacktestConfiguration, ConfigError, EmaParams, RsiParams, SmaParams, StrategyConfig,
    StrategyType,
};
