pub mod backtest;
pub mod simulator;

pub use backtest::{run_backtest, run_many, BacktestError, BacktestResult};
pub use simulator::{simulate, SimulationError};
