pub mod summary;
pub mod timeseries;

pub use summary::MetricsRecord;
pub use timeseries::{calculate_returns, max_drawdown_pct, round2};
